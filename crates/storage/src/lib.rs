//! Filesystem read layer.
//!
//! Discovery only ever needs to answer three questions about the application
//! root: does a path exist, is it a file or a directory, and what are its
//! contents. [`Filesystem`] captures exactly that, and every path handed to
//! it is relative to the root it was configured with.

pub mod backend;
pub mod error;
mod models;
mod path;

pub use crate::backend::Filesystem;
pub use crate::models::EntryKind;
pub use crate::path::validate as validate_path;
use std::sync::Arc;

pub type FilesystemHandle = Arc<dyn Filesystem + Send + Sync>;
