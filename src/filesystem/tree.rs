use hashlink::LinkedHashSet;
use snafu::{OptionExt, ensure};
use tracing::{debug, trace};

use crate::entry::{EntryInfo, EntryKind};
use crate::filesystem::{
    CyclicMoveSnafu, InvalidNameSnafu, LookupError, NameCollisionSnafu, NodeId, NodeMut, NodeRef,
    NotAFolderSnafu, RootNodeSnafu, TreeError, UnknownNodeSnafu,
};
use crate::filter::EntryFilter;

#[derive(Debug, Clone)]
pub(crate) enum NodeKind {
    Folder { children: LinkedHashSet<NodeId> },
    File,
}

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) name: String,
    pub(crate) parent: Option<NodeId>,
    pub(crate) kind: NodeKind,
}

impl Node {
    fn new(name: String, parent: Option<NodeId>, kind: EntryKind) -> Self {
        let kind = match kind {
            EntryKind::Folder => NodeKind::Folder {
                children: LinkedHashSet::new(),
            },
            EntryKind::File => NodeKind::File,
        };
        Self { name, parent, kind }
    }

    pub(crate) fn kind(&self) -> EntryKind {
        match self.kind {
            NodeKind::Folder { .. } => EntryKind::Folder,
            NodeKind::File => EntryKind::File,
        }
    }

    pub(crate) fn children(&self) -> Option<&LinkedHashSet<NodeId>> {
        match &self.kind {
            NodeKind::Folder { children } => Some(children),
            NodeKind::File => None,
        }
    }

    fn children_mut(&mut self) -> Option<&mut LinkedHashSet<NodeId>> {
        match &mut self.kind {
            NodeKind::Folder { children } => Some(children),
            NodeKind::File => None,
        }
    }
}

fn validate_name(name: &str) -> Result<(), TreeError> {
    ensure!(
        !name.is_empty() && name != "." && name != ".." && !name.contains('/'),
        InvalidNameSnafu { name }
    );
    Ok(())
}

/// An in-memory folder hierarchy that can be rendered like a real directory.
#[derive(Debug, Clone)]
pub struct FakeTree {
    nodes: Vec<Option<Node>>,
    root: NodeId,
}

impl FakeTree {
    /// Creates a tree holding a single, empty root folder.
    pub fn new(root_name: impl Into<String>) -> Result<Self, TreeError> {
        let root_name = root_name.into();
        validate_name(&root_name)?;
        Ok(Self {
            nodes: vec![Some(Node::new(root_name, None, EntryKind::Folder))],
            root: NodeId(0),
        })
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn root_node(&self) -> NodeRef<'_> {
        self.node_unchecked(self.root)
    }

    fn node_unchecked(&self, id: NodeId) -> NodeRef<'_> {
        match self.node(id) {
            Some(node) => node,
            None => unreachable!("the root of a FakeTree is always live"),
        }
    }

    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_>> {
        let node = self.nodes.get(id.0)?.as_ref()?;
        Some(NodeRef {
            tree: self,
            id,
            node,
        })
    }

    pub fn try_node(&self, id: NodeId) -> Result<NodeRef<'_>, TreeError> {
        self.node(id).context(UnknownNodeSnafu { id })
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Looks up a node by a `/`-separated path relative to the root.
    pub fn get(&self, path: &str) -> Result<NodeRef<'_>, LookupError> {
        self.root_node().get(path)
    }

    /// Number of live nodes, the root included.
    pub fn len(&self) -> usize {
        self.nodes.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.root_node().children().next().is_none()
    }

    fn data_mut(&mut self, id: NodeId) -> Result<&mut Node, TreeError> {
        self.nodes
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .context(UnknownNodeSnafu { id })
    }

    fn children_mut(&mut self, folder: NodeId) -> Result<&mut LinkedHashSet<NodeId>, TreeError> {
        let path = self.try_node(folder)?.path();
        self.data_mut(folder)?
            .children_mut()
            .context(NotAFolderSnafu { path })
    }

    fn ensure_free(&self, folder: NodeId, name: &str, ignore: Option<NodeId>) -> Result<(), TreeError> {
        let folder = self.try_node(folder)?;
        ensure!(folder.is_folder(), NotAFolderSnafu { path: folder.path() });
        let taken = folder
            .children()
            .any(|child| child.name() == name && Some(child.id()) != ignore);
        ensure!(
            !taken,
            NameCollisionSnafu {
                folder: folder.path(),
                name
            }
        );
        Ok(())
    }

    /// Creates a node under `parent`, failing if the name is taken.
    pub fn create(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        kind: EntryKind,
    ) -> Result<NodeId, TreeError> {
        let name = name.into();
        validate_name(&name)?;
        self.ensure_free(parent, &name, None)?;

        let id = NodeId(self.nodes.len());
        trace!("Creating {} '{}' as {} under {}", kind, name, id, parent);
        self.nodes.push(Some(Node::new(name, Some(parent), kind)));
        self.children_mut(parent)?.insert(id);
        Ok(id)
    }

    pub fn create_folder(&mut self, parent: NodeId, name: impl Into<String>) -> Result<NodeId, TreeError> {
        self.create(parent, name, EntryKind::Folder)
    }

    pub fn create_file(&mut self, parent: NodeId, name: impl Into<String>) -> Result<NodeId, TreeError> {
        self.create(parent, name, EntryKind::File)
    }

    /// Creates every missing folder along `path` and then the final entry.
    ///
    /// An existing final entry of the same kind is returned as is; one of the
    /// other kind is a collision.
    pub fn insert_path(&mut self, path: &str, kind: EntryKind) -> Result<NodeId, TreeError> {
        let mut components = path.split('/').filter(|c| !c.is_empty()).peekable();
        let mut current = self.root;

        while let Some(name) = components.next() {
            let is_last = components.peek().is_none();
            let wanted = if is_last { kind } else { EntryKind::Folder };
            let node = self.try_node(current)?;
            if node.is_file() {
                return Err(LookupError::TraversesFile { file: node.path() }.into());
            }
            current = match node.child(name) {
                Some(existing) if existing.kind() == wanted => existing.id(),
                Some(_) => {
                    return Err(NameCollisionSnafu {
                        folder: node.path(),
                        name,
                    }
                    .build()
                    .into());
                }
                None => self.create(current, name, wanted)?,
            };
        }

        Ok(current)
    }

    pub fn rename(&mut self, id: NodeId, name: impl Into<String>) -> Result<(), TreeError> {
        let name = name.into();
        validate_name(&name)?;
        if let Some(parent) = self.try_node(id)?.parent() {
            self.ensure_free(parent.id(), &name, Some(id))?;
        }
        self.data_mut(id)?.name = name;
        Ok(())
    }

    /// Moves `id` to the end of `new_parent`'s children.
    ///
    /// The depth and path of the node and its descendants follow from the new
    /// position.
    pub fn set_parent(&mut self, id: NodeId, new_parent: NodeId) -> Result<(), TreeError> {
        let node = self.try_node(id)?;
        let target = self.try_node(new_parent)?;
        let old_parent = node.parent().context(RootNodeSnafu)?.id();
        ensure!(
            node.id() != target.id() && !node.is_ancestor_of(&target),
            CyclicMoveSnafu {
                node: node.path(),
                target: target.path()
            }
        );
        let name = node.name().to_string();
        self.ensure_free(new_parent, &name, Some(id))?;

        debug!("Moving {} from {} to {}", id, old_parent, new_parent);
        self.children_mut(old_parent)?.remove(&id);
        self.children_mut(new_parent)?.insert(id);
        self.data_mut(id)?.parent = Some(new_parent);
        Ok(())
    }

    /// Ids of `start` and all its descendants, parents before children.
    pub fn descendants(&self, start: NodeId) -> Result<Vec<NodeId>, TreeError> {
        let mut order = Vec::new();
        let mut stack = vec![self.try_node(start)?];
        while let Some(node) = stack.pop() {
            order.push(node.id());
            let mut children: Vec<_> = node.children().collect();
            children.reverse();
            stack.extend(children);
        }
        Ok(order)
    }

    /// Detaches `id` and drops it together with its whole subtree.
    pub fn delete(&mut self, id: NodeId) -> Result<(), TreeError> {
        let parent = self.try_node(id)?.parent().context(RootNodeSnafu)?.id();
        let doomed = self.descendants(id)?;
        self.children_mut(parent)?.remove(&id);
        for doomed_id in &doomed {
            self.nodes[doomed_id.0] = None;
        }
        debug!("Deleted {} and {} descendants", id, doomed.len() - 1);
        Ok(())
    }

    /// Deletes several nodes. Every id is checked before anything is removed;
    /// ids that disappear along with an earlier node's subtree are skipped.
    pub fn delete_nodes(&mut self, ids: &[NodeId]) -> Result<(), TreeError> {
        for id in ids {
            ensure!(self.try_node(*id)?.parent().is_some(), RootNodeSnafu);
        }
        for id in ids {
            if self.contains(*id) {
                self.delete(*id)?;
            }
        }
        Ok(())
    }

    /// Deletes children of `folder` by name. Every name must exist.
    pub fn delete_names<S: AsRef<str>>(&mut self, folder: NodeId, names: &[S]) -> Result<(), TreeError> {
        let folder = self.try_node(folder)?;
        let ids = names
            .iter()
            .map(|name| {
                folder
                    .child(name.as_ref())
                    .map(|child| child.id())
                    .ok_or_else(|| LookupError::MissingSegment {
                        segment: name.as_ref().to_string(),
                        folder: folder.path(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.delete_nodes(&ids)
    }

    /// What filters and masks see for `id`, with depth measured from `base`.
    pub(crate) fn entry_info(&self, id: NodeId, base_depth: usize) -> Option<EntryInfo> {
        let node = self.node(id)?;
        Some(EntryInfo {
            name: node.name().to_string(),
            path: node.path().into(),
            kind: node.kind(),
            depth: node.depth().saturating_sub(base_depth),
        })
    }

    /// Children of `folder` that pass `filter`, in insertion order.
    pub fn list(&self, folder: NodeId, filter: &EntryFilter) -> Result<Vec<NodeId>, TreeError> {
        let folder = self.try_node(folder)?;
        let base_depth = folder.depth();
        Ok(folder
            .children()
            .filter(|child| {
                self.entry_info(child.id(), base_depth)
                    .is_some_and(|info| filter.admits(&info))
            })
            .map(|child| child.id())
            .collect())
    }

    /// Calls `apply` on `start` and every descendant, parents first.
    ///
    /// The order is fixed before the first call, and [`NodeMut`] only permits
    /// renames, so the walk never observes a half-changed structure.
    pub fn walk_apply<F>(&mut self, start: NodeId, mut apply: F) -> Result<(), TreeError>
    where
        F: FnMut(&mut NodeMut<'_>) -> Result<(), TreeError>,
    {
        for id in self.descendants(start)? {
            apply(&mut NodeMut { tree: &mut *self, id })?;
        }
        Ok(())
    }

    /// Makes `id` the root, dropping everything outside its subtree.
    pub(crate) fn reroot(&mut self, id: NodeId) -> Result<(), TreeError> {
        let keep = self.descendants(id)?;
        let mut nodes: Vec<Option<Node>> = vec![None; self.nodes.len()];
        for kept in keep {
            nodes[kept.0] = self.nodes[kept.0].take();
        }
        self.nodes = nodes;
        self.data_mut(id)?.parent = None;
        self.root = id;
        Ok(())
    }

    /// Changes a childless file into an empty folder.
    pub(crate) fn make_folder(&mut self, id: NodeId) -> Result<(), TreeError> {
        let node = self.data_mut(id)?;
        if matches!(node.kind, NodeKind::File) {
            node.kind = NodeKind::Folder {
                children: LinkedHashSet::new(),
            };
        }
        Ok(())
    }
}
