mod cli;
mod render_args;

pub use cli::{Cli, Command};
pub use render_args::{ColorChoice, RenderArgs};
