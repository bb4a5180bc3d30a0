use std::path::PathBuf;

use clap::{Args, ValueEnum};

use crate::config::RenderOptions;
use crate::sorting::Grouping;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    /// Resolves `auto` against the capabilities of standard output.
    pub fn enabled(self) -> bool {
        match self {
            ColorChoice::Auto => supports_color::on(supports_color::Stream::Stdout).is_some(),
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        }
    }
}

/// Render settings shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct RenderArgs {
    /// Built-in style: lines, dash, spaces, arrow, plus or emoji
    #[arg(long)]
    pub style: Option<String>,
    /// Width of one indentation level
    #[arg(long)]
    pub indent: Option<usize>,
    /// Draw every indentation glyph with this text
    #[arg(long)]
    pub uniform: Option<String>,
    #[arg(long)]
    pub depth_limit: Option<usize>,
    #[arg(long)]
    pub item_limit: Option<usize>,
    /// What to show for hidden entries: ellipsis, content or custom:<text>
    #[arg(long)]
    pub beyond: Option<String>,
    #[arg(long, value_enum)]
    pub first: Option<Grouping>,
    #[arg(long)]
    pub sort: bool,
    #[arg(long)]
    pub sort_reverse: bool,
    #[arg(long, num_args = 1..)]
    pub include_folders: Vec<String>,
    #[arg(long, num_args = 1..)]
    pub exclude_folders: Vec<String>,
    #[arg(long, num_args = 1..)]
    pub include_files: Vec<String>,
    #[arg(long, num_args = 1..)]
    pub exclude_files: Vec<String>,
    /// Compare filter patterns as whole names instead of regexes
    #[arg(long)]
    pub literal: bool,
    /// YAML file with render settings
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Override a single setting, applied after every other layer
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub overrides: Vec<String>,
    #[arg(long, value_enum, default_value = "auto")]
    pub color: ColorChoice,
}

impl RenderArgs {
    /// The settings given as flags, as one option layer.
    pub fn flag_layer(&self) -> RenderOptions {
        let mut options = RenderOptions::new();
        options.style = self.style.clone();
        options.indent = self.indent;
        options.uniform = self.uniform.clone();
        options.depth_limit = self.depth_limit.map(Some);
        options.item_limit = self.item_limit.map(Some);
        options.beyond = self.beyond.clone().map(Some);
        options.first = self.first;
        options.sort = self.sort.then_some(true);
        options.sort_reverse = self.sort_reverse.then_some(true);
        options.regex = self.literal.then_some(false);

        let filters = [
            (&self.include_folders, &mut options.include_folders),
            (&self.exclude_folders, &mut options.exclude_folders),
            (&self.include_files, &mut options.include_files),
            (&self.exclude_files, &mut options.exclude_files),
        ];
        for (patterns, slot) in filters {
            if !patterns.is_empty() {
                *slot = Some(Some(patterns.clone()));
            }
        }
        options
    }
}
