use serde::{Deserialize, Serialize};
use std::time::Duration;

/// User-agent sent on every request. Deliberately an old desktop browser
/// string so fetches blend in with unremarkable traffic.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/4.0 (compatible; MSIE 6.0; Windows NT 5.1; SV1; .NET CLR 1.0.3705; .NET CLR 1.1.4322";

/// Reserved pseudo-TLD that marks a hidden-service host.
pub const HIDDEN_SUFFIX: &str = ".onion";

/// Local SOCKS5 relay; the `socks5h` scheme resolves hostnames proxy-side,
/// which is what makes hidden-service hosts reachable at all.
pub const DEFAULT_PROXY_ADDR: &str = "socks5h://127.0.0.1:9050";

/// HTTP method of a [`Request`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Method {
    Get,
    Post,
}

/// One fetch request. Immutable once constructed; a body is attached exactly
/// when the method is POST, which the constructors enforce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    url: String,
    method: Method,
    body: Option<String>,
}

impl Request {
    pub fn get(url: &str) -> Self {
        Self {
            url: url.to_owned(),
            method: Method::Get,
            body: None,
        }
    }

    pub fn post(url: &str, body: &str) -> Self {
        Self {
            url: url.to_owned(),
            method: Method::Post,
            body: Some(body.to_owned()),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }
}

/// Outcome of one fetch operation.
///
/// Keeps the classic coarse contract: callers that only care about the
/// integer form use [`code`](Self::code), which yields the HTTP status,
/// `0` for a completed transfer whose status could not be read back, and
/// `-1` for any setup or transport failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FetchStatus {
    /// Setup or transport failure; sink contents must not be trusted
    /// (a download target may still hold partial bytes).
    Failed,
    /// Transfer completed but the response status could not be determined.
    Unknown,
    /// Transfer completed with this HTTP status.
    Http(u16),
}

impl FetchStatus {
    /// Legacy integer form: -1 / 0 / HTTP status.
    pub fn code(self) -> i32 {
        match self {
            Self::Failed => -1,
            Self::Unknown => 0,
            Self::Http(code) => i32::from(code),
        }
    }

    /// True for a 2xx response.
    pub fn is_success(self) -> bool {
        matches!(self, Self::Http(code) if (200..300).contains(&code))
    }
}

/// Fetch policy knobs, all injectable so tests can point a
/// [`Fetcher`](crate::Fetcher) at a loopback server and a fake proxy.
///
/// The defaults reproduce the classic behavior: spoofed MSIE 6.0 user-agent,
/// `.onion` hosts routed through the local SOCKS5 relay, no timeout (a hung
/// transfer blocks its thread until the peer gives up).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetcherConfig {
    pub user_agent: String,
    pub proxy_suffix: String,
    pub proxy_addr: String,
    pub timeout: Option<Duration>,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            proxy_suffix: HIDDEN_SUFFIX.to_owned(),
            proxy_addr: DEFAULT_PROXY_ADDR.to_owned(),
            timeout: None,
        }
    }
}
