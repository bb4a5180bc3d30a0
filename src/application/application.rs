use colored::Colorize;
use snafu::Snafu;
use snafu::prelude::*;
use tracing::debug;
use tracing::info;

use crate::application::{RuntimeConfig, TreeInput};
use crate::cli::RenderArgs;
use crate::config::{ConfigError, RenderConfig, RenderOptions};
use crate::ext::{AsyncTryInto, BestEffortPathExt};
use crate::filesystem::TreeError;
use crate::parser::{ParseError, ParseOptions, parse_tree, read_tree};
use crate::populate::{PopulateError, random_tree};
use crate::render::{RenderError, render_path};

pub struct Application;

impl Application {
    pub async fn run(runtime_config: impl Into<RuntimeConfig>) -> Result<(), ApplicationError> {
        let runtime_config: RuntimeConfig = runtime_config.into();
        let config = Self::load_config(&runtime_config.render).await?;

        let rendered = Self::render_input(&runtime_config.input, &config).await?;

        let output = if runtime_config.render.color.enabled() {
            colored::control::set_override(true);
            colorize_folders(&rendered, &config)
        } else {
            rendered
        };
        println!("{output}");

        Ok(())
    }

    /// Stacks the layers: defaults, config file, flags, then `--set` pairs.
    pub async fn load_config(args: &RenderArgs) -> Result<RenderConfig, ApplicationError> {
        let mut options = RenderOptions::new();
        if let Some(path) = &args.config {
            let file_layer = AsyncTryInto::<RenderOptions>::async_try_into(path.as_path())
                .await
                .context(ConfigSnafu)?;
            options = options.merge(file_layer);
        }
        options = options.merge(args.flag_layer());
        for pair in &args.overrides {
            options.set_pair(pair).context(ConfigSnafu)?;
        }
        debug!("Merged render options: {:?}", options);

        options.build().context(ConfigSnafu)
    }

    async fn render_input(input: &TreeInput, config: &RenderConfig) -> Result<String, ApplicationError> {
        match input {
            TreeInput::Directory(path) => {
                info!("Rendering directory {}", path.best_effort_path_display());
                render_path(path, config).context(RenderSnafu)
            }
            TreeInput::Diagram { file, parse_comments } => {
                let parse_options = ParseOptions::default().parse_comments(*parse_comments);
                let tree = match file {
                    Some(path) => {
                        info!("Reformatting {}", path.best_effort_path_display());
                        read_tree(path, &parse_options).await
                    }
                    None => {
                        info!("Reformatting standard input");
                        let text = std::io::read_to_string(std::io::stdin()).context(StdinSnafu)?;
                        parse_tree(&text, &parse_options)
                    }
                }
                .context(ParseSnafu)?;
                tree.render(tree.root(), config).context(TreeSnafu)
            }
            TreeInput::Random { name, options } => {
                info!("Rendering a random tree with seed {:?}", options.seed);
                let tree = random_tree(name, options).context(PopulateSnafu)?;
                tree.render(tree.root(), config).context(TreeSnafu)
            }
        }
    }
}

/// Paints folder names, leaving the branch glyphs untouched.
fn colorize_folders(rendered: &str, config: &RenderConfig) -> String {
    if config.separator.is_empty() {
        return rendered.to_string();
    }
    let header_chars = ParseOptions::for_config(config).header_chars;
    rendered
        .lines()
        .map(|line| {
            if !line.ends_with(config.separator.as_str()) {
                return line.to_string();
            }
            let start = line
                .char_indices()
                .find(|(_, c)| !header_chars.contains(c))
                .map_or(line.len(), |(i, _)| i);
            let (header, name) = line.split_at(start);
            format!("{header}{}", name.blue().bold())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Critical failure encountered during configuration stage"))]
    ConfigError { source: ConfigError },
    #[snafu(display("Failed to render the directory"))]
    RenderError { source: RenderError },
    #[snafu(display("Failed to read the diagram"))]
    ParseError { source: ParseError },
    #[snafu(display("Failed to generate a random tree"))]
    PopulateError { source: PopulateError },
    #[snafu(display("Failed to render the tree"))]
    TreeError { source: TreeError },
    #[snafu(display("Failed to read standard input"))]
    StdinError { source: std::io::Error },
}
