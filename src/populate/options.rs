use std::ops::RangeInclusive;

use snafu::ensure;

use crate::populate::{
    EmptyBreadthSnafu, InvalidChanceSnafu, NoExtensionsSnafu, PopulateError, ZeroDepthSnafu,
};

/// Shape of a generated tree.
#[derive(Debug, Clone, PartialEq)]
pub struct PopulateOptions {
    /// Levels below the filled folder. Entries on the last level are files.
    pub depth: usize,
    /// Number of entries drawn for each folder.
    pub breadth: RangeInclusive<usize>,
    /// Chance that an entry above the last level is a folder.
    pub folder_chance: f64,
    /// Chance that a generated folder is left empty.
    pub stop_chance: f64,
    pub extensions: Vec<String>,
    /// Fixed seed for reproducible trees; drawn from entropy when unset.
    pub seed: Option<u64>,
}

impl Default for PopulateOptions {
    fn default() -> Self {
        Self {
            depth: 3,
            breadth: 1..=4,
            folder_chance: 0.4,
            stop_chance: 0.5,
            extensions: ["txt", "py", "md", "csv", "json"]
                .into_iter()
                .map(String::from)
                .collect(),
            seed: None,
        }
    }
}

impl PopulateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    pub fn breadth(mut self, breadth: RangeInclusive<usize>) -> Self {
        self.breadth = breadth;
        self
    }

    pub fn folder_chance(mut self, chance: f64) -> Self {
        self.folder_chance = chance;
        self
    }

    pub fn stop_chance(mut self, chance: f64) -> Self {
        self.stop_chance = chance;
        self
    }

    pub fn extensions<I: IntoIterator<Item = S>, S: Into<String>>(mut self, extensions: I) -> Self {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    pub(crate) fn validate(&self) -> Result<(), PopulateError> {
        ensure!(self.depth > 0, ZeroDepthSnafu);
        ensure!(
            !self.breadth.is_empty(),
            EmptyBreadthSnafu {
                start: *self.breadth.start(),
                end: *self.breadth.end(),
            }
        );
        for (name, value) in [
            ("folder_chance", self.folder_chance),
            ("stop_chance", self.stop_chance),
        ] {
            ensure!((0.0..=1.0).contains(&value), InvalidChanceSnafu { name, value });
        }
        ensure!(!self.extensions.is_empty(), NoExtensionsSnafu);
        Ok(())
    }
}
