use std::path::PathBuf;

use derive_more::Display;

/// Whether an enumerated entry is a folder or a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum EntryKind {
    #[display("folder")]
    Folder,
    #[display("file")]
    File,
}

impl EntryKind {
    pub fn is_folder(self) -> bool {
        matches!(self, EntryKind::Folder)
    }
}

/// What the sorter, the filters and masks get to see about a child entry.
///
/// `path` is a filesystem path for real directories and the `/`-joined node
/// path for in-memory trees. `depth` is relative to the rendered root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInfo {
    pub name: String,
    pub path: PathBuf,
    pub kind: EntryKind,
    pub depth: usize,
}

impl EntryInfo {
    pub fn is_folder(&self) -> bool {
        self.kind.is_folder()
    }
}
