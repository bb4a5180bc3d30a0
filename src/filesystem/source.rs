use std::path::Path;

use tracing::{debug, warn};

use crate::config::RenderConfig;
use crate::entry::EntryInfo;
use crate::filesystem::{FakeTree, NodeId, TreeError};
use crate::render::{EnumerationError, RealDir, SourceEntry, TreeSource, enumerate, render};

/// A node of a [`FakeTree`] seen as the root of a renderable tree.
#[derive(Debug, Clone, Copy)]
pub struct FakeSubtree<'a> {
    tree: &'a FakeTree,
    root: NodeId,
}

impl TreeSource for FakeSubtree<'_> {
    type Handle = NodeId;

    fn root(&self) -> NodeId {
        self.root
    }

    fn root_name(&self) -> String {
        self.tree
            .node(self.root)
            .map(|node| node.name().to_string())
            .unwrap_or_default()
    }

    fn list(&self, folder: &NodeId, depth: usize) -> Result<Vec<SourceEntry<NodeId>>, EnumerationError> {
        let Some(folder) = self.tree.node(*folder) else {
            return Ok(Vec::new());
        };
        Ok(folder
            .children()
            .map(|child| SourceEntry {
                info: EntryInfo {
                    name: child.name().to_string(),
                    path: child.path().into(),
                    kind: child.kind(),
                    depth,
                },
                handle: child.id(),
            })
            .collect())
    }
}

impl FakeTree {
    pub fn subtree(&self, root: NodeId) -> Result<FakeSubtree<'_>, TreeError> {
        self.try_node(root)?;
        Ok(FakeSubtree { tree: self, root })
    }

    /// Renders the subtree under `node` exactly as a real directory of the
    /// same shape would be rendered.
    pub fn render(&self, node: NodeId, config: &RenderConfig) -> Result<String, TreeError> {
        Ok(render(&self.subtree(node)?, config)?)
    }

    /// Snapshots a real directory.
    ///
    /// Filters, mask, sorting and the depth limit of `config` decide what is
    /// copied; the item limit and beyond policy only concern rendering and
    /// are ignored. Subfolders that cannot be read are skipped with a warning.
    pub fn from_real(path: impl AsRef<Path>, config: &RenderConfig) -> Result<FakeTree, TreeError> {
        let source = RealDir::new(path.as_ref());
        let mut tree = FakeTree::new(source.root_name())?;
        let mut pending = vec![(source.root(), tree.root(), 0usize)];

        while let Some((dir, folder, depth)) = pending.pop() {
            if config.depth_limit.is_some_and(|limit| depth >= limit) {
                continue;
            }
            let entries = match enumerate(&source, &dir, depth + 1, config) {
                Ok(entries) => entries,
                Err(err) if depth > 0 => {
                    warn!("Skipping unreadable folder {}: {}", dir.display(), err);
                    continue;
                }
                Err(err) => return Err(err.into()),
            };
            for entry in entries {
                let id = tree.create(folder, entry.info.name, entry.info.kind)?;
                if entry.info.kind.is_folder() {
                    pending.push((entry.handle, id, depth + 1));
                }
            }
        }

        debug!("Snapshot of {} holds {} nodes", source.path().display(), tree.len());
        Ok(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderOptions;
    use crate::entry::EntryKind;
    use crate::filter::Mask;
    use crate::sorting::Grouping;
    use std::fs;
    use tempfile::TempDir;

    const NO_INIT: &str = "mypkg/
    app.py
    view.py
    test/
        test_app.py
        test_view.py";

    fn mypkg() -> FakeTree {
        let mut tree = FakeTree::new("mypkg").unwrap();
        for path in ["__init__.py", "app.py", "view.py"] {
            tree.insert_path(path, EntryKind::File).unwrap();
        }
        for path in ["test/__init__.py", "test/test_app.py", "test/test_view.py"] {
            tree.insert_path(path, EntryKind::File).unwrap();
        }
        tree
    }

    #[test]
    fn renders_in_insertion_order_by_default() {
        let tree = mypkg();
        let config = RenderOptions::new()
            .style("spaces")
            .indent(4)
            .mask(Mask::new(|entry| !entry.name.starts_with('_')))
            .build()
            .unwrap();
        assert_eq!(tree.render(tree.root(), &config).unwrap(), NO_INIT);
    }

    #[test]
    fn renders_a_subtree_with_relative_depth() {
        let tree = mypkg();
        let test = tree.get("test").unwrap().id();
        let config = RenderOptions::new().depth_limit(1).build().unwrap();
        let expected = "test/
├─__init__.py
├─test_app.py
└─test_view.py";
        assert_eq!(tree.render(test, &config).unwrap(), expected);
    }

    #[test]
    fn mask_receives_node_paths() {
        let tree = mypkg();
        let config = RenderOptions::new()
            .mask(Mask::new(|entry| entry.path.starts_with("mypkg/test") || entry.is_folder()))
            .build()
            .unwrap();
        let rendered = tree.render(tree.root(), &config).unwrap();
        assert!(!rendered.contains("─app.py"));
        assert!(rendered.contains("test_app.py"));
    }

    #[test]
    fn rendering_a_deleted_node_fails() {
        let mut tree = mypkg();
        let test = tree.get("test").unwrap().id();
        tree.delete(test).unwrap();
        let result = tree.render(test, &RenderConfig::default());
        assert!(matches!(result, Err(TreeError::UnknownNode { .. })));
    }

    #[test]
    fn snapshot_of_a_real_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path().join("proj");
        fs::create_dir_all(root.join("src/nested")).unwrap();
        fs::write(root.join("Cargo.toml"), "").unwrap();
        fs::write(root.join("src/lib.rs"), "").unwrap();
        fs::write(root.join("src/nested/deep.rs"), "").unwrap();

        let config = RenderOptions::new()
            .first(Grouping::FoldersFirst)
            .depth_limit(2)
            .build()
            .unwrap();
        let tree = FakeTree::from_real(&root, &config).unwrap();

        assert_eq!(tree.root_node().name(), "proj");
        assert_eq!(tree.root_node().child_names(), vec!["src", "Cargo.toml"]);
        assert_eq!(tree.get("src").unwrap().child_names(), vec!["nested", "lib.rs"]);
        assert!(tree.get("src/nested").unwrap().child_names().is_empty());
        assert_eq!(
            tree.render(tree.root(), &config).unwrap(),
            render(&RealDir::new(&root), &config).unwrap()
        );
    }

    #[test]
    fn snapshot_keeps_the_sorted_order_of_the_real_folder() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path().join("files");
        fs::create_dir_all(&root).unwrap();
        for file in ["note10.md", "note1.md", "note2.md"] {
            fs::write(root.join(file), "").unwrap();
        }

        let config = RenderConfig::default();
        let tree = FakeTree::from_real(&root, &config).unwrap();
        assert_eq!(
            tree.root_node().child_names(),
            vec!["note1.md", "note2.md", "note10.md"]
        );
    }

    #[test]
    fn in_memory_trees_are_not_sorted_by_default() {
        let mut tree = FakeTree::new("root").unwrap();
        let root = tree.root();
        tree.create_file(root, "z.txt").unwrap();
        tree.create_file(root, "a.txt").unwrap();
        let rendered = tree.render(root, &RenderConfig::default()).unwrap();
        assert_eq!(rendered, "root/\n├─z.txt\n└─a.txt");

        let sorted = RenderOptions::new().sorted(true).build().unwrap();
        assert_eq!(tree.render(root, &sorted).unwrap(), "root/\n├─a.txt\n└─z.txt");
    }

    #[test]
    fn snapshot_with_mask_rejecting_everything_is_empty() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        fs::write(temp_dir.path().join("a.txt"), "").unwrap();
        let config = RenderOptions::new().mask(Mask::new(|_| false)).build().unwrap();
        let tree = FakeTree::from_real(temp_dir.path(), &config).unwrap();
        assert!(tree.is_empty());
    }

    #[test]
    fn snapshot_of_missing_directory_fails() {
        let result = FakeTree::from_real("/this/path/does/not/exist", &RenderConfig::default());
        assert!(matches!(result, Err(TreeError::Render { .. })));
    }
}
