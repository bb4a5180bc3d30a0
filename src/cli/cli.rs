use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::application::data::LogLevel;
use crate::cli::RenderArgs;

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Draws folder trees and converts diagrams between styles")]
pub struct Cli {
    #[clap(long, short, default_value = "warn", value_enum, global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Render a directory on disk
    Render {
        #[arg(default_value = ".")]
        path: PathBuf,
        #[command(flatten)]
        render: RenderArgs,
    },
    /// Read a diagram or an indented listing and render it again
    Reformat {
        /// Diagram file, or `-` for standard input
        #[arg(default_value = "-")]
        input: String,
        /// Keep `#` and whatever follows it as part of the names
        #[arg(long)]
        keep_comments: bool,
        #[command(flatten)]
        render: RenderArgs,
    },
    /// Render a randomly generated tree
    Random {
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value_t = 3)]
        depth: usize,
        #[arg(long, default_value = "random")]
        name: String,
        #[command(flatten)]
        render: RenderArgs,
    },
}
