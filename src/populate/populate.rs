use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use snafu::ensure;
use tracing::debug;

use crate::filesystem::{FakeTree, NodeId, NotAFolderSnafu};
use crate::populate::words::WORDS;
use crate::populate::{PopulateError, PopulateOptions};

const REDRAWS: usize = 8;

struct Populator<'a> {
    tree: &'a mut FakeTree,
    rng: StdRng,
    options: &'a PopulateOptions,
}

impl Populator<'_> {
    fn fill(&mut self, folder: NodeId, level: usize) -> Result<(), PopulateError> {
        let slots = self.rng.gen_range(self.options.breadth.clone());
        for _ in 0..slots {
            let is_folder = level < self.options.depth && self.rng.gen_bool(self.options.folder_chance);
            let name = self.draw_name(folder, is_folder)?;
            if is_folder {
                let child = self.tree.create_folder(folder, name)?;
                if !self.rng.gen_bool(self.options.stop_chance) {
                    self.fill(child, level + 1)?;
                }
            } else {
                self.tree.create_file(folder, name)?;
            }
        }
        Ok(())
    }

    fn draw_name(&mut self, folder: NodeId, is_folder: bool) -> Result<String, PopulateError> {
        let mut name = String::new();
        for _ in 0..REDRAWS {
            let word = WORDS.choose(&mut self.rng).copied().unwrap_or("item");
            name = if is_folder {
                word.to_string()
            } else {
                let extension = self
                    .options
                    .extensions
                    .choose(&mut self.rng)
                    .map(String::as_str)
                    .unwrap_or("txt");
                format!("{word}.{extension}")
            };
            if !self.is_taken(folder, &name)? {
                return Ok(name);
            }
        }

        let (stem, extension) = match name.split_once('.') {
            Some((stem, extension)) => (stem.to_string(), format!(".{extension}")),
            None => (name.clone(), String::new()),
        };
        let mut suffix = 2;
        loop {
            let candidate = format!("{stem}_{suffix}{extension}");
            if !self.is_taken(folder, &candidate)? {
                return Ok(candidate);
            }
            suffix += 1;
        }
    }

    fn is_taken(&self, folder: NodeId, name: &str) -> Result<bool, PopulateError> {
        Ok(self.tree.try_node(folder)?.child(name).is_some())
    }
}

/// Adds random entries under `folder`, keeping whatever it already holds.
pub fn populate(
    tree: &mut FakeTree,
    folder: NodeId,
    options: &PopulateOptions,
) -> Result<(), PopulateError> {
    options.validate()?;
    let target = tree.try_node(folder)?;
    ensure!(target.is_folder(), NotAFolderSnafu { path: target.path() });

    let rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    debug!("Populating '{}' with seed {:?}", target.path(), options.seed);

    let before = tree.len();
    Populator {
        tree: &mut *tree,
        rng,
        options,
    }
    .fill(folder, 1)?;
    debug!("Generated {} nodes", tree.len() - before);
    Ok(())
}

/// Builds a new tree named `name` and fills it.
pub fn random_tree(name: &str, options: &PopulateOptions) -> Result<FakeTree, PopulateError> {
    let mut tree = FakeTree::new(name)?;
    let root = tree.root();
    populate(&mut tree, root, options)?;
    Ok(tree)
}
