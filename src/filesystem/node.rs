use derive_more::Display;

use crate::entry::EntryKind;
use crate::filesystem::tree::{FakeTree, Node};
use crate::filesystem::{LookupError, TreeError};

/// Index of a node inside its [`FakeTree`]. Ids of deleted nodes are never
/// reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[display("#{_0}")]
pub struct NodeId(pub(crate) usize);

/// Read-only view of a live node.
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    pub(crate) tree: &'a FakeTree,
    pub(crate) id: NodeId,
    pub(crate) node: &'a Node,
}

impl<'a> NodeRef<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &'a str {
        &self.node.name
    }

    pub fn kind(&self) -> EntryKind {
        self.node.kind()
    }

    pub fn is_folder(&self) -> bool {
        self.kind().is_folder()
    }

    pub fn is_file(&self) -> bool {
        !self.is_folder()
    }

    pub fn parent(self) -> Option<NodeRef<'a>> {
        self.node.parent.and_then(|parent| self.tree.node(parent))
    }

    /// Number of ancestors; the root has depth 0.
    pub fn depth(&self) -> usize {
        self.ancestors().count()
    }

    /// Ancestors from the parent up to the root.
    pub fn ancestors(self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        std::iter::successors(self.parent(), |node| node.parent())
    }

    /// Names from the root down to this node, joined with `/`.
    pub fn path(&self) -> String {
        let mut names: Vec<&str> = self.ancestors().map(|node| node.name()).collect();
        names.reverse();
        names.push(self.name());
        names.join("/")
    }

    /// Children in insertion order; empty for files.
    pub fn children(self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let tree = self.tree;
        let node: &'a Node = self.node;
        node.children()
            .into_iter()
            .flatten()
            .filter_map(move |id| tree.node(*id))
    }

    pub fn child_names(&self) -> Vec<String> {
        self.children().map(|child| child.name().to_string()).collect()
    }

    pub fn child(self, name: &str) -> Option<NodeRef<'a>> {
        self.children().find(|child| child.name() == name)
    }

    /// Other children of this node's parent, in insertion order.
    pub fn siblings(self) -> Vec<NodeRef<'a>> {
        let id = self.id;
        self.parent()
            .map(|parent| parent.children().filter(|node| node.id != id).collect())
            .unwrap_or_default()
    }

    pub fn is_ancestor_of(&self, other: &NodeRef<'_>) -> bool {
        other.ancestors().any(|node| node.id == self.id)
    }

    /// Resolves a `/`-separated path relative to this node.
    ///
    /// Empty segments are ignored, `.` stays put and `..` moves to the parent.
    /// No segment, `.` and `..` included, may follow a file.
    pub fn get(self, path: &str) -> Result<NodeRef<'a>, LookupError> {
        let mut current = self;
        for segment in path.split('/').filter(|segment| !segment.is_empty()) {
            if current.is_file() {
                return Err(LookupError::TraversesFile {
                    file: current.path(),
                });
            }
            current = match segment {
                "." => current,
                ".." => current.parent().ok_or_else(|| LookupError::AboveRoot {
                    root: current.name().to_string(),
                })?,
                name => current.child(name).ok_or_else(|| LookupError::MissingSegment {
                    segment: name.to_string(),
                    folder: current.path(),
                })?,
            };
        }
        Ok(current)
    }
}

/// Mutable access to one node that cannot change the shape of the tree.
///
/// Handed out by [`FakeTree::walk_apply`]: renaming is allowed, moving,
/// creating and deleting are not.
#[derive(Debug)]
pub struct NodeMut<'a> {
    pub(crate) tree: &'a mut FakeTree,
    pub(crate) id: NodeId,
}

impl NodeMut<'_> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn view(&self) -> Result<NodeRef<'_>, TreeError> {
        self.tree.try_node(self.id)
    }

    pub fn name(&self) -> Result<&str, TreeError> {
        self.view().map(|node| node.name())
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), TreeError> {
        self.tree.rename(self.id, name)
    }
}

pub fn count_folders<'a>(nodes: impl IntoIterator<Item = NodeRef<'a>>) -> usize {
    nodes.into_iter().filter(NodeRef::is_folder).count()
}

pub fn count_files<'a>(nodes: impl IntoIterator<Item = NodeRef<'a>>) -> usize {
    nodes.into_iter().filter(NodeRef::is_file).count()
}
