use std::path::PathBuf;

use crate::cli::{Cli, Command, RenderArgs};
use crate::populate::PopulateOptions;

/// Where the tree to render comes from.
#[derive(Debug, Clone)]
pub enum TreeInput {
    Directory(PathBuf),
    /// A diagram file, or standard input when `None`.
    Diagram {
        file: Option<PathBuf>,
        parse_comments: bool,
    },
    Random {
        name: String,
        options: PopulateOptions,
    },
}

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub input: TreeInput,
    pub render: RenderArgs,
}

impl From<Cli> for RuntimeConfig {
    fn from(cli: Cli) -> Self {
        match cli.command {
            Command::Render { path, render } => Self {
                input: TreeInput::Directory(path),
                render,
            },
            Command::Reformat {
                input,
                keep_comments,
                render,
            } => Self {
                input: TreeInput::Diagram {
                    file: (input != "-").then(|| PathBuf::from(input)),
                    parse_comments: !keep_comments,
                },
                render,
            },
            Command::Random {
                seed,
                depth,
                name,
                render,
            } => {
                let mut options = PopulateOptions::new().depth(depth);
                options.seed = seed;
                Self {
                    input: TreeInput::Random { name, options },
                    render,
                }
            }
        }
    }
}
