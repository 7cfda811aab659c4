//! Application Error Types
//!
//! Failures of the command line front-end itself. Discovery failures are not
//! errors at this level: they are reported and turned into an exit code.

use derive_more::{Display, Error};
use std::path::PathBuf;

pub type Error = exn::Exn<ErrorKind>;
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    #[display("could not load configuration")]
    Config,
    /// The application root could not be opened.
    #[display("invalid application root: {}", _0.display())]
    Root(#[error(not(source))] PathBuf),
    #[display("could not open the cache")]
    Cache,
    #[display("could not read formatter settings from {}", _0.display())]
    Settings(#[error(not(source))] PathBuf),
    #[display("could not write output")]
    Output,
}
