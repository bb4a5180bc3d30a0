//! Render configuration: the style table, layered option sets and their
//! validation into a [`RenderConfig`].

mod beyond;
mod config_file;
mod options;
mod style;

use snafu::Snafu;

pub use beyond::BeyondPolicy;
pub use config_file::options_from_yaml;
pub use options::{OptionKey, OptionValue, RenderConfig, RenderOptions};
pub use style::{BASE_INDENT, STYLE_NAMES, StyleGlyphs, style_glyphs};

use crate::filter::PatternError;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ConfigError {
    #[snafu(display("Unknown style '{}'", name))]
    UnknownStyle { name: String },
    #[snafu(display("Unrecognized configuration key '{}'", key))]
    UnknownKey { key: String },
    #[snafu(display(
        "Invalid beyond policy '{}': expected 'ellipsis', 'content', or text starting with 'custom:' or '_'",
        value
    ))]
    InvalidBeyond { value: String },
    #[snafu(display("Invalid value for '{}': expected {}, found {}", key, expected, found))]
    InvalidValue {
        key: String,
        expected: &'static str,
        found: String,
    },
    #[snafu(display("Invalid pattern for '{}'", key))]
    InvalidPattern {
        key: &'static str,
        source: PatternError,
    },
    #[snafu(display("Failed to read the config file: {}", file_path))]
    ReadError {
        file_path: String,
        source: std::io::Error,
    },
    #[snafu(display("Failed to parse the config file"))]
    YamlError { source: saphyr::ScanError },
    #[snafu(display("Top level of config should be a map"))]
    TopLevelNotMap,
    #[snafu(display("Config key should be a string"))]
    KeyNotString,
}
