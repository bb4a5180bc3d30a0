use std::fmt;
use std::sync::Arc;

use crate::entry::EntryInfo;
use crate::filter::NameMatcher;

/// Arbitrary predicate over an entry; returning `false` drops the entry.
#[derive(Clone)]
pub struct Mask(Arc<dyn Fn(&EntryInfo) -> bool + Send + Sync>);

impl Mask {
    pub fn new(predicate: impl Fn(&EntryInfo) -> bool + Send + Sync + 'static) -> Self {
        Self(Arc::new(predicate))
    }

    pub fn admits(&self, entry: &EntryInfo) -> bool {
        (self.0)(entry)
    }
}

impl fmt::Debug for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Mask(..)")
    }
}

/// Name filters for folders and files plus an optional mask.
///
/// Folder filters never apply to files and vice versa. An entry has to pass
/// every filter that is present.
#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    pub include_folders: Option<NameMatcher>,
    pub exclude_folders: Option<NameMatcher>,
    pub include_files: Option<NameMatcher>,
    pub exclude_files: Option<NameMatcher>,
    pub mask: Option<Mask>,
}

impl EntryFilter {
    pub fn is_empty(&self) -> bool {
        self.include_folders.is_none()
            && self.exclude_folders.is_none()
            && self.include_files.is_none()
            && self.exclude_files.is_none()
            && self.mask.is_none()
    }

    pub fn admits(&self, entry: &EntryInfo) -> bool {
        let (include, exclude) = if entry.is_folder() {
            (&self.include_folders, &self.exclude_folders)
        } else {
            (&self.include_files, &self.exclude_files)
        };
        if include.as_ref().is_some_and(|m| !m.is_match(&entry.name)) {
            return false;
        }
        if exclude.as_ref().is_some_and(|m| m.is_match(&entry.name)) {
            return false;
        }
        self.mask.as_ref().is_none_or(|mask| mask.admits(entry))
    }

    pub fn retain(&self, entries: &mut Vec<EntryInfo>) {
        if !self.is_empty() {
            entries.retain(|entry| self.admits(entry));
        }
    }
}
