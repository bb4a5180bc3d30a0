use std::fmt;
use std::sync::Arc;

use clap::ValueEnum;

use crate::entry::{EntryInfo, EntryKind};
use crate::sorting::natural_cmp;

/// Anything the sorter can order: it needs a name and a kind.
pub trait SortItem {
    fn sort_name(&self) -> &str;
    fn sort_kind(&self) -> EntryKind;
}

impl SortItem for EntryInfo {
    fn sort_name(&self) -> &str {
        &self.name
    }

    fn sort_kind(&self) -> EntryKind {
        self.kind
    }
}

/// Which kind of entry is listed first, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Grouping {
    #[default]
    None,
    #[value(name = "folders")]
    FoldersFirst,
    #[value(name = "files")]
    FilesFirst,
}

/// Maps a name to the string that is actually compared.
#[derive(Clone)]
pub struct SortKey(Arc<dyn Fn(&str) -> String + Send + Sync>);

impl SortKey {
    pub fn new(key: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        Self(Arc::new(key))
    }

    fn apply(&self, name: &str) -> String {
        (self.0)(name)
    }
}

impl fmt::Debug for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SortKey(..)")
    }
}

#[derive(Debug, Clone, Default)]
pub struct SortOptions {
    /// `None` leaves the choice to the source being listed: real folders are
    /// sorted, in-memory trees keep insertion order.
    pub enabled: Option<bool>,
    pub grouping: Grouping,
    pub reverse: bool,
    pub key: Option<SortKey>,
}

impl SortOptions {
    /// Grouping, reversing or keying only make sense on a sorted listing.
    pub fn is_active(&self) -> bool {
        self.enabled == Some(true) || self.grouping != Grouping::None || self.reverse || self.key.is_some()
    }
}

fn sort_group<T: SortItem>(items: &mut [T], options: &SortOptions) {
    match &options.key {
        Some(key) => items.sort_by_cached_key(|item| NaturalKey(key.apply(item.sort_name()))),
        None => items.sort_by(|a, b| natural_cmp(a.sort_name(), b.sort_name())),
    }
    if options.reverse {
        items.reverse();
    }
}

#[derive(PartialEq, Eq)]
struct NaturalKey(String);

impl PartialOrd for NaturalKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for NaturalKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        natural_cmp(&self.0, &other.0)
    }
}

/// Orders a folder's children.
///
/// When grouping is requested the listing is split into folders and files
/// first, and each group is sorted (and reversed) on its own. Equal keys keep
/// their enumeration order.
pub fn sort_entries<T: SortItem>(mut items: Vec<T>, options: &SortOptions) -> Vec<T> {
    if !options.is_active() {
        return items;
    }
    match options.grouping {
        Grouping::None => {
            sort_group(&mut items, options);
            items
        }
        Grouping::FoldersFirst | Grouping::FilesFirst => {
            let (mut folders, mut files): (Vec<T>, Vec<T>) = items
                .into_iter()
                .partition(|item| item.sort_kind().is_folder());
            sort_group(&mut folders, options);
            sort_group(&mut files, options);
            if options.grouping == Grouping::FoldersFirst {
                folders.extend(files);
                folders
            } else {
                files.extend(folders);
                files
            }
        }
    }
}
