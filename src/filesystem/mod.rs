//! In-memory filesystem tree.
//!
//! A [`FakeTree`] owns every node in an arena. Folders own their children
//! through an insertion-ordered set of ids; each node points back at its
//! folder through a plain id, so there is never more than one owner. Reads go
//! through [`NodeRef`], renames during a walk through [`NodeMut`], and every
//! structural change through `&mut FakeTree`.

mod node;
mod source;
mod tree;

use snafu::Snafu;

use crate::render::RenderError;

pub use node::{NodeId, NodeMut, NodeRef, count_files, count_folders};
pub use source::FakeSubtree;
pub use tree::FakeTree;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum LookupError {
    #[snafu(display("No entry named '{}' in '{}'", segment, folder))]
    MissingSegment { segment: String, folder: String },
    #[snafu(display("Path continues past the file '{}'", file))]
    TraversesFile { file: String },
    #[snafu(display("Path climbs above the root '{}'", root))]
    AboveRoot { root: String },
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
#[snafu(display("'{}' already contains an entry named '{}'", folder, name))]
pub struct NameCollisionError {
    pub folder: String,
    pub name: String,
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum TreeError {
    #[snafu(transparent)]
    Lookup { source: LookupError },
    #[snafu(transparent)]
    NameCollision { source: NameCollisionError },
    #[snafu(transparent)]
    Render { source: RenderError },
    #[snafu(display("Invalid node name '{}'", name))]
    InvalidName { name: String },
    #[snafu(display("Node {} is not part of this tree", id))]
    UnknownNode { id: NodeId },
    #[snafu(display("'{}' is a file, not a folder", path))]
    NotAFolder { path: String },
    #[snafu(display("Cannot move '{}' into its own subtree at '{}'", node, target))]
    CyclicMove { node: String, target: String },
    #[snafu(display("The root node cannot be moved or deleted"))]
    RootNode,
}
