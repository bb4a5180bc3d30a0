use std::path::Path;

use saphyr::{LoadableYamlNode, Scalar, Yaml};
use snafu::prelude::*;
use tracing::debug;

use crate::config::{
    ConfigError, KeyNotStringSnafu, OptionValue, ReadSnafu, RenderOptions, TopLevelNotMapSnafu,
    YamlSnafu,
};
use crate::ext::{AsyncTryFrom, BestEffortPathExt};

fn option_value(key: &str, value: &Yaml) -> Result<OptionValue, ConfigError> {
    let unsupported = || ConfigError::InvalidValue {
        key: key.to_string(),
        expected: "a string, integer, boolean, null or list of strings",
        found: format!("{value:?}"),
    };
    match value {
        Yaml::Value(Scalar::Null) => Ok(OptionValue::Null),
        Yaml::Value(Scalar::Boolean(b)) => Ok(OptionValue::Bool(*b)),
        Yaml::Value(Scalar::Integer(i)) => Ok(OptionValue::Int(*i)),
        Yaml::Value(Scalar::String(s)) => Ok(OptionValue::Text(s.to_string())),
        Yaml::Sequence(items) => items
            .iter()
            .map(|item| item.as_str().map(str::to_string))
            .collect::<Option<Vec<_>>>()
            .map(OptionValue::List)
            .ok_or_else(unsupported),
        _ => Err(unsupported()),
    }
}

/// Reads one configuration layer from YAML text.
///
/// The document must be a mapping of recognized keys; an empty document
/// yields an empty layer.
pub fn options_from_yaml(contents: &str) -> Result<RenderOptions, ConfigError> {
    let documents = Yaml::load_from_str(contents).context(YamlSnafu)?;
    let Some(document) = documents.first() else {
        debug!("Config file is empty");
        return Ok(RenderOptions::default());
    };
    let mapping = document.as_mapping().context(TopLevelNotMapSnafu)?;

    let mut options = RenderOptions::new();
    for (key, value) in mapping {
        let key = key.as_str().context(KeyNotStringSnafu)?;
        options.set(key, option_value(key, value)?)?;
    }
    Ok(options)
}

impl AsyncTryFrom<&Path> for RenderOptions {
    type Error = ConfigError;

    async fn async_try_from(path: &Path) -> Result<Self, Self::Error> {
        debug!("Opening config file: {}", path.best_effort_path_display());
        let bytes = compio::fs::read(path).await.context(ReadSnafu {
            file_path: path.best_effort_path_display(),
        })?;
        debug!("Successfully read config file: {} bytes", bytes.len());
        options_from_yaml(&String::from_utf8_lossy(&bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn reads_scalars_lists_and_nulls() {
        let yaml = r#"
style: dash
indent: 4
depth_limit: 2
item_limit: null
beyond: content
first: folders
sort_reverse: true
exclude_files:
  - '__init__\.py'
  - '\.pyc$'
"#;
        let options = options_from_yaml(yaml).unwrap();
        assert_eq!(options.style.as_deref(), Some("dash"));
        assert_eq!(options.indent, Some(4));
        assert_eq!(options.depth_limit, Some(Some(2)));
        assert_eq!(options.item_limit, Some(None));
        assert_eq!(options.sort_reverse, Some(true));
        assert_eq!(
            options.exclude_files,
            Some(Some(vec![r"__init__\.py".to_string(), r"\.pyc$".to_string()]))
        );
        let config = options.build().unwrap();
        assert_eq!(config.glyphs.split, "|---");
    }

    #[test]
    fn empty_document_is_an_empty_layer() {
        let options = options_from_yaml("").unwrap();
        assert!(options.style.is_none());
    }

    #[test]
    fn unknown_key_in_file_fails() {
        let err = options_from_yaml("spacing: false").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownKey { .. }));
    }

    #[test]
    fn top_level_must_be_a_map() {
        let err = options_from_yaml("- item1\n- item2").unwrap_err();
        assert!(matches!(err, ConfigError::TopLevelNotMap));
    }

    #[test]
    fn invalid_yaml_is_reported() {
        let err = options_from_yaml("invalid: yaml: content: [unclosed").unwrap_err();
        assert!(matches!(err, ConfigError::YamlError { .. }));
    }

    #[test]
    fn nested_maps_are_not_values() {
        let err = options_from_yaml("style:\n  name: lines").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[compio::test]
    async fn loads_a_layer_from_disk() {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        writeln!(file, "style: plus\nsort: true").expect("Failed to write to temp file");

        let options = RenderOptions::async_try_from(file.path()).await.unwrap();
        assert_eq!(options.style.as_deref(), Some("plus"));
        assert_eq!(options.sort, Some(true));
    }

    #[compio::test]
    async fn missing_file_is_a_read_error() {
        let result = RenderOptions::async_try_from(Path::new("nonexistent.yaml")).await;
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }
}
