//! Reconstructs a [`crate::filesystem::FakeTree`] from a rendered diagram or
//! from a plain indented listing.

mod options;
mod parser;

use snafu::Snafu;

pub use options::ParseOptions;
pub use parser::{parse_tree, read_tree};

use crate::filesystem::TreeError;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ParseError {
    #[snafu(display("Line {}: indentation of {} does not match any enclosing level", line, width))]
    MisalignedIndent { line: usize, width: usize },
    #[snafu(display(
        "Line {}: indented by {} where this listing uses steps of {}",
        line,
        step,
        unit
    ))]
    InconsistentIndent { line: usize, step: usize, unit: usize },
    #[snafu(display("Line {}: entry has no name", line))]
    EmptyName { line: usize },
    #[snafu(display("Line {}: '{}' appears twice in the same folder", line, name))]
    DuplicateName { line: usize, name: String },
    #[snafu(display("Line {}: cannot add '{}'", line, name))]
    InvalidEntry {
        line: usize,
        name: String,
        source: TreeError,
    },
    #[snafu(display("Failed to read diagram file: {}", file_path))]
    ReadError {
        file_path: String,
        source: std::io::Error,
    },
}
