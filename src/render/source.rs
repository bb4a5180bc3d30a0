use std::fs;
use std::path::{Path, PathBuf};

use snafu::{ResultExt, Snafu};
use tracing::trace;

use crate::entry::{EntryInfo, EntryKind};
use crate::ext::BestEffortPathExt;
use crate::sorting::SortItem;

/// One child produced by a [`TreeSource`], with the handle needed to list it
/// in turn.
#[derive(Debug, Clone)]
pub struct SourceEntry<H> {
    pub info: EntryInfo,
    pub handle: H,
}

impl<H> SortItem for SourceEntry<H> {
    fn sort_name(&self) -> &str {
        &self.info.name
    }

    fn sort_kind(&self) -> EntryKind {
        self.info.kind
    }
}

/// Directory-enumeration capability consumed by the renderer.
///
/// `list` may be called any number of times for the same folder and must not
/// rely on earlier calls.
pub trait TreeSource {
    type Handle: Clone;

    fn root(&self) -> Self::Handle;

    fn root_name(&self) -> String;

    /// Whether listings are sorted when the configuration does not say.
    fn sorted_by_default(&self) -> bool {
        false
    }

    /// Immediate children of `folder`. `depth` is the depth of the children
    /// relative to the root and is copied into every [`EntryInfo`].
    fn list(
        &self,
        folder: &Self::Handle,
        depth: usize,
    ) -> Result<Vec<SourceEntry<Self::Handle>>, EnumerationError>;
}

#[derive(Debug, Snafu)]
#[snafu(display("Failed to list directory {}", path.best_effort_path_display()))]
pub struct EnumerationError {
    path: PathBuf,
    source: std::io::Error,
}

/// A directory on the real filesystem.
#[derive(Debug, Clone)]
pub struct RealDir {
    root: PathBuf,
}

impl RealDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path(&self) -> &Path {
        &self.root
    }
}

impl TreeSource for RealDir {
    type Handle = PathBuf;

    fn root(&self) -> PathBuf {
        self.root.clone()
    }

    fn root_name(&self) -> String {
        self.root.best_effort_file_name()
    }

    /// `read_dir` order depends on the filesystem.
    fn sorted_by_default(&self) -> bool {
        true
    }

    fn list(&self, folder: &PathBuf, depth: usize) -> Result<Vec<SourceEntry<PathBuf>>, EnumerationError> {
        trace!("Listing {}", folder.display());
        let read_dir = fs::read_dir(folder).context(EnumerationSnafu { path: folder.clone() })?;
        read_dir
            .map(|dir_entry| {
                let dir_entry = dir_entry.context(EnumerationSnafu { path: folder.clone() })?;
                let path = dir_entry.path();
                // Follows symlinks, so a link to a directory is listed as a folder.
                let kind = if path.is_dir() {
                    EntryKind::Folder
                } else {
                    EntryKind::File
                };
                Ok(SourceEntry {
                    info: EntryInfo {
                        name: dir_entry.file_name().to_string_lossy().into_owned(),
                        path: path.clone(),
                        kind,
                        depth,
                    },
                    handle: path,
                })
            })
            .collect()
    }
}
