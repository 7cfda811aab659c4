//! Render Error Types
//!
//! Rendering itself never fails; problems end up as messages in the output.
//! The kinds below provide those messages, plus the one genuine failure of
//! turning output into JSON.

use derive_more::{Display, Error};

/// A render error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for render operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// Discovery failed for the directory or the version.
    #[display("The Swagger UI library is missing, incorrectly defined or not supported.")]
    LibraryUnavailable,
    /// No URL could be produced for a field item.
    #[display("Could not create URL to file.")]
    FileUrl,
    #[display("could not serialize rendered output")]
    Serialize,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        false
    }
}
