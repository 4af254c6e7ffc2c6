use std::fs::Metadata;
use std::path::PathBuf;

/// A single filesystem object discovered during traversal.
///
/// Created fresh for every object visited and never shared between branches.
/// `metadata` always comes from a symlink-non-following stat, so a symlink
/// reports itself here even when the traversal followed it.
#[derive(Debug, Clone)]
pub struct Entry {
    /// Path of the entry, anchored at the root the caller asked for.
    /// When the object was reached through a followed symlink this is the
    /// link-relative path, never the resolved one.
    pub path: PathBuf,

    /// The entry's file name.
    pub name: String,

    /// What kind of entry this is.
    pub kind: EntryKind,

    /// How deep below the requested root this entry was found. Root = 0.
    pub depth: usize,

    /// Metadata from `symlink_metadata`.
    pub metadata: Metadata,
}

impl Entry {
    pub(crate) fn new(path: PathBuf, metadata: Metadata, depth: usize) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Self {
            kind: EntryKind::from(&metadata),
            path,
            name,
            depth,
            metadata,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }

    pub fn is_symlink(&self) -> bool {
        self.kind == EntryKind::Symlink
    }

    /// Size in bytes as reported by the non-following stat.
    pub fn size(&self) -> u64 {
        self.metadata.len()
    }
}

/// The kind of a traversed entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A regular file.
    File,

    /// A directory.
    Dir,

    /// A symbolic link.
    Symlink,

    /// Anything else (device files, pipes, sockets, etc.).
    Other,
}

impl From<&Metadata> for EntryKind {
    fn from(metadata: &Metadata) -> Self {
        let ft = metadata.file_type();
        if ft.is_symlink() {
            EntryKind::Symlink
        } else if ft.is_dir() {
            EntryKind::Dir
        } else if ft.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        }
    }
}
