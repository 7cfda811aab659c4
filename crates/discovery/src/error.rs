//! Discovery Error Types
//!
//! Every failure a caller can see while resolving the library. All of them are
//! user-correctable (wrong install, stale version); the expected reaction is
//! to degrade to a "library unavailable" state, never to crash.

use crate::manifest::ManifestFile;
use derive_more::{Display, Error};
use std::path::PathBuf;

/// A discovery error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for discovery operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// The candidate path does not exist, is not a directory, or escapes the
    /// application root.
    #[display("The provided \"{}\" Swagger UI library directory is invalid.", _0.display())]
    InvalidDirectory(#[error(not(source))] PathBuf),
    /// The directory exists but one of the required files does not.
    #[display("The Swagger UI library directory is invalid because the required \"{}\" file is not found.", _0.display())]
    RequiredFileMissing(#[error(not(source))] PathBuf),
    /// The manifest could not be read, or was empty.
    #[display("Cannot read the content of the Swagger UI library's {_0} file in \"{}\".", _1.display())]
    ManifestUnreadable(#[error(not(source))] ManifestFile, #[error(not(source))] PathBuf),
    /// The manifest is not valid JSON.
    #[display("Cannot decode the Swagger UI library's {file} file in \"{}\": \"{message}\".", path.display())]
    ManifestUndecodable {
        #[error(not(source))]
        file: ManifestFile,
        #[error(not(source))]
        path: PathBuf,
        #[error(not(source))]
        message: String,
    },
    /// The manifest decoded but carries no version.
    #[display("The Swagger UI library version is not found in \"{}\".", _0.display())]
    VersionFieldMissing(#[error(not(source))] PathBuf),
    /// The library is older than the minimum supported version (or its
    /// version cannot be understood at all).
    #[display("The Swagger UI library version v{actual} is lower than the minimally supported v{minimum}.")]
    VersionUnsupported {
        #[error(not(source))]
        actual: String,
        #[error(not(source))]
        minimum: String,
    },
    /// The filesystem could not answer (permissions, I/O).
    #[display("filesystem error while inspecting the Swagger UI library")]
    Storage,
    /// The cache backend failed.
    #[display("cache error while resolving the Swagger UI library")]
    Cache,
}

impl ErrorKind {
    /// Stable numeric code for the error kind.
    pub fn code(&self) -> u8 {
        match self {
            Self::InvalidDirectory(_) => 1,
            Self::RequiredFileMissing(_) => 2,
            Self::ManifestUnreadable(..) => 3,
            Self::ManifestUndecodable { .. } => 4,
            Self::VersionFieldMissing(_) => 5,
            Self::VersionUnsupported { .. } => 6,
            Self::Storage => 7,
            Self::Cache => 8,
        }
    }

    /// Returns `true` if retrying might succeed.
    ///
    /// Installation problems stay problems until someone fixes the install;
    /// only the dependency kinds can be transient.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Storage | Self::Cache)
    }
}
