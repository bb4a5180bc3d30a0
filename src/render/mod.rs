//! The tree renderer.
//!
//! Rendering walks a [`TreeSource`] depth-first and produces the whole diagram
//! as one string. Sources are either real directories ([`RealDir`]) or the
//! in-memory model in [`crate::filesystem`].

mod header;
mod renderer;
mod source;

use snafu::Snafu;

pub(crate) use renderer::enumerate;
pub use renderer::{Renderer, render, render_path};
pub use source::{EnumerationError, RealDir, SourceEntry, TreeSource};

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum RenderError {
    #[snafu(display("Failed to enumerate a folder while rendering"))]
    EnumerateError { source: EnumerationError },
}
