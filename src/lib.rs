#![doc = include_str!("../README.md")]

pub mod cli;
pub mod error;
pub mod fetcher;
mod runtime;

pub use error::{FetchError, Result};
pub use fetcher::*;
