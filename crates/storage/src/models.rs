//! Storage models.

/// What a path points at, as reported by [`Filesystem::kind`](crate::Filesystem::kind).
///
/// Anything that is neither a regular file nor a directory (sockets, FIFOs,
/// dangling symlinks) is reported as absent by the backends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntryKind {
    File,
    Directory,
}
impl EntryKind {
    pub fn is_file(&self) -> bool {
        matches!(self, Self::File)
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, Self::Directory)
    }
}
