//! Ordering of sibling entries.
//!
//! Names are compared in "human" order, so that `file2` sorts before
//! `file10`. On top of that comparator the sorter can group folders and files,
//! reverse the order, and sort on a caller-supplied key.

mod natural;
mod sorter;

pub use natural::natural_cmp;
pub use sorter::{Grouping, SortItem, SortKey, SortOptions, sort_entries};
