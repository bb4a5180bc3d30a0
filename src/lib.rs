//! Draws folder trees as text diagrams.
//!
//! A tree is rendered either straight from disk ([`render::render_path`]) or
//! from the in-memory model in [`filesystem`], which can also be parsed back
//! from a diagram ([`parser`]) or grown at random ([`populate`]).

#![allow(clippy::enum_variant_names)]

pub mod application;
pub mod cli;
pub mod config;
pub mod entry;
mod ext;
pub mod filesystem;
pub mod filter;
pub mod parser;
pub mod populate;
pub mod render;
pub mod sorting;

pub use config::{RenderConfig, RenderOptions};
pub use entry::{EntryInfo, EntryKind};
pub use filesystem::{FakeTree, NodeId, NodeRef};
pub use parser::{ParseOptions, parse_tree};
pub use populate::{PopulateOptions, populate, random_tree};
pub use render::{render, render_path};
