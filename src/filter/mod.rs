//! Inclusion/exclusion of entries by name and by arbitrary predicate.
//!
//! The renderer, the in-memory tree listing and the real-directory snapshot
//! all go through [`EntryFilter::admits`], so an entry is kept or dropped the
//! same way everywhere.

mod entry_filter;
mod matcher;

pub use entry_filter::{EntryFilter, Mask};
pub use matcher::{MatchMode, NameMatcher, PatternError};
