use thiserror::Error;

pub type Result<T> = std::result::Result<T, FetchError>;

/// Internal error type; the public operations collapse it into a
/// [`FetchStatus`](crate::FetchStatus) at the crate boundary.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("background fetch failed: {0}")]
    Background(String),
}
