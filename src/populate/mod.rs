//! Pseudo-random trees for demos and tests.
//!
//! Every draw goes through one seeded generator in a fixed order, so the same
//! options always grow the same tree.

mod options;
mod populate;
mod words;

use snafu::Snafu;

pub use options::PopulateOptions;
pub use populate::{populate, random_tree};

use crate::filesystem::TreeError;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum PopulateError {
    #[snafu(transparent)]
    Tree { source: TreeError },
    #[snafu(display("'{}' must be between 0 and 1, got {}", name, value))]
    InvalidChance { name: &'static str, value: f64 },
    #[snafu(display("Breadth range {}..={} is empty", start, end))]
    EmptyBreadth { start: usize, end: usize },
    #[snafu(display("Depth must be at least 1"))]
    ZeroDepth,
    #[snafu(display("At least one file extension is required"))]
    NoExtensions,
}
