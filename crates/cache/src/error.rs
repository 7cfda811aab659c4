//! Cache Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A cache error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for cache operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// The cache file could not be read or written.
    #[display("cache file I/O error: {}", _0.display())]
    Io(#[error(not(source))] PathBuf),
    /// The cache file exists but does not contain a valid cache bin.
    #[display("invalid cache data: {}", _0.display())]
    InvalidData(#[error(not(source))] PathBuf),
    /// A max age outside the representable range was supplied.
    #[display("invalid max age: {_0}")]
    InvalidMaxAge(#[error(not(source))] i64),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}
