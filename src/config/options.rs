use std::str::FromStr;

use snafu::ResultExt;
use tracing::debug;

use crate::config::{
    BASE_INDENT, BeyondPolicy, ConfigError, InvalidPatternSnafu, StyleGlyphs, style_glyphs,
};
use crate::filter::{EntryFilter, Mask, MatchMode, NameMatcher};
use crate::sorting::{Grouping, SortKey, SortOptions};

/// Every key a configuration layer may set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKey {
    Style,
    Indent,
    Uniform,
    Split,
    Extend,
    Space,
    Final,
    FolderStart,
    FileStart,
    Separator,
    DepthLimit,
    ItemLimit,
    Beyond,
    First,
    Sort,
    SortReverse,
    IncludeFolders,
    ExcludeFolders,
    IncludeFiles,
    ExcludeFiles,
    Regex,
}

impl FromStr for OptionKey {
    type Err = ConfigError;

    /// Accepts `depth_limit`, `depth-limit` and `depthlimit` alike.
    fn from_str(key: &str) -> Result<Self, Self::Err> {
        let normalized: String = key
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();
        let key = match normalized.as_str() {
            "style" => OptionKey::Style,
            "indent" => OptionKey::Indent,
            "uniform" => OptionKey::Uniform,
            "split" => OptionKey::Split,
            "extend" => OptionKey::Extend,
            "space" => OptionKey::Space,
            "final" => OptionKey::Final,
            "folderstart" => OptionKey::FolderStart,
            "filestart" => OptionKey::FileStart,
            "separator" => OptionKey::Separator,
            "depthlimit" => OptionKey::DepthLimit,
            "itemlimit" => OptionKey::ItemLimit,
            "beyond" => OptionKey::Beyond,
            "first" => OptionKey::First,
            "sort" => OptionKey::Sort,
            "sortreverse" => OptionKey::SortReverse,
            "includefolders" => OptionKey::IncludeFolders,
            "excludefolders" => OptionKey::ExcludeFolders,
            "includefiles" => OptionKey::IncludeFiles,
            "excludefiles" => OptionKey::ExcludeFiles,
            "regex" => OptionKey::Regex,
            _ => {
                return Err(ConfigError::UnknownKey {
                    key: key.to_string(),
                });
            }
        };
        Ok(key)
    }
}

/// A loosely typed value coming from a YAML file or a `key=value` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    Null,
    Bool(bool),
    Int(i64),
    Text(String),
    List(Vec<String>),
}

impl OptionValue {
    /// Interprets a command-line string. Numbers and booleans are recognized,
    /// `none`/`null` clear a setting, anything else stays text.
    pub fn from_cli(raw: &str) -> Self {
        match raw {
            "none" | "null" | "~" => OptionValue::Null,
            "true" => OptionValue::Bool(true),
            "false" => OptionValue::Bool(false),
            _ => raw
                .parse::<i64>()
                .map(OptionValue::Int)
                .unwrap_or_else(|_| OptionValue::Text(raw.to_string())),
        }
    }

    fn describe(&self) -> String {
        match self {
            OptionValue::Null => "null".to_string(),
            OptionValue::Bool(b) => b.to_string(),
            OptionValue::Int(i) => i.to_string(),
            OptionValue::Text(t) => format!("'{t}'"),
            OptionValue::List(items) => format!("{items:?}"),
        }
    }

    fn invalid(&self, key: OptionKey, expected: &'static str) -> ConfigError {
        ConfigError::InvalidValue {
            key: format!("{key:?}"),
            expected,
            found: self.describe(),
        }
    }

    fn into_text(self, key: OptionKey) -> Result<String, ConfigError> {
        match self {
            OptionValue::Text(text) => Ok(text),
            OptionValue::Int(i) => Ok(i.to_string()),
            other => Err(other.invalid(key, "a string")),
        }
    }

    fn into_bool(self, key: OptionKey) -> Result<bool, ConfigError> {
        match self {
            OptionValue::Bool(b) => Ok(b),
            other => Err(other.invalid(key, "a boolean")),
        }
    }

    fn into_count(self, key: OptionKey) -> Result<usize, ConfigError> {
        match self {
            OptionValue::Int(i) if i >= 0 => Ok(i as usize),
            other => Err(other.invalid(key, "a non-negative integer")),
        }
    }

    fn into_optional_count(self, key: OptionKey) -> Result<Option<usize>, ConfigError> {
        match self {
            OptionValue::Null => Ok(None),
            other => other.into_count(key).map(Some),
        }
    }

    fn into_optional_text(self, key: OptionKey) -> Result<Option<String>, ConfigError> {
        match self {
            OptionValue::Null => Ok(None),
            other => other.into_text(key).map(Some),
        }
    }

    fn into_patterns(self, key: OptionKey) -> Result<Option<Vec<String>>, ConfigError> {
        match self {
            OptionValue::Null => Ok(None),
            OptionValue::List(items) => Ok(Some(items)),
            other => other.into_text(key).map(|text| Some(vec![text])),
        }
    }

    fn into_grouping(self, key: OptionKey) -> Result<Grouping, ConfigError> {
        match &self {
            OptionValue::Null => Ok(Grouping::None),
            OptionValue::Text(text) => match text.as_str() {
                "folders" | "folders-first" => Ok(Grouping::FoldersFirst),
                "files" | "files-first" => Ok(Grouping::FilesFirst),
                "none" => Ok(Grouping::None),
                _ => Err(self.invalid(key, "'folders', 'files' or null")),
            },
            _ => Err(self.invalid(key, "'folders', 'files' or null")),
        }
    }
}

/// One layer of render settings; unset fields defer to earlier layers.
///
/// Fields holding an `Option<Option<_>>` distinguish "not mentioned in this
/// layer" from "explicitly cleared".
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub style: Option<String>,
    pub indent: Option<usize>,
    pub uniform: Option<String>,
    pub split: Option<String>,
    pub extend: Option<String>,
    pub space: Option<String>,
    pub last: Option<String>,
    pub folder_start: Option<String>,
    pub file_start: Option<String>,
    pub separator: Option<String>,
    pub depth_limit: Option<Option<usize>>,
    pub item_limit: Option<Option<usize>>,
    pub beyond: Option<Option<String>>,
    pub first: Option<Grouping>,
    pub sort: Option<bool>,
    pub sort_reverse: Option<bool>,
    pub sort_key: Option<SortKey>,
    pub include_folders: Option<Option<Vec<String>>>,
    pub exclude_folders: Option<Option<Vec<String>>>,
    pub include_files: Option<Option<Vec<String>>>,
    pub exclude_files: Option<Option<Vec<String>>>,
    pub regex: Option<bool>,
    pub mask: Option<Mask>,
}

fn patterns<I, S>(patterns: I) -> Option<Option<Vec<String>>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Some(Some(patterns.into_iter().map(Into::into).collect()))
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn style(mut self, name: impl Into<String>) -> Self {
        self.style = Some(name.into());
        self
    }

    pub fn indent(mut self, indent: usize) -> Self {
        self.indent = Some(indent);
        self
    }

    pub fn depth_limit(mut self, limit: usize) -> Self {
        self.depth_limit = Some(Some(limit));
        self
    }

    pub fn item_limit(mut self, limit: usize) -> Self {
        self.item_limit = Some(Some(limit));
        self
    }

    pub fn beyond(mut self, policy: impl Into<String>) -> Self {
        self.beyond = Some(Some(policy.into()));
        self
    }

    pub fn first(mut self, grouping: Grouping) -> Self {
        self.first = Some(grouping);
        self
    }

    pub fn sorted(mut self, sort: bool) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn sort_reverse(mut self, reverse: bool) -> Self {
        self.sort_reverse = Some(reverse);
        self
    }

    pub fn sort_key(mut self, key: SortKey) -> Self {
        self.sort_key = Some(key);
        self
    }

    pub fn include_folders<I: IntoIterator<Item = S>, S: Into<String>>(mut self, p: I) -> Self {
        self.include_folders = patterns(p);
        self
    }

    pub fn exclude_folders<I: IntoIterator<Item = S>, S: Into<String>>(mut self, p: I) -> Self {
        self.exclude_folders = patterns(p);
        self
    }

    pub fn include_files<I: IntoIterator<Item = S>, S: Into<String>>(mut self, p: I) -> Self {
        self.include_files = patterns(p);
        self
    }

    pub fn exclude_files<I: IntoIterator<Item = S>, S: Into<String>>(mut self, p: I) -> Self {
        self.exclude_files = patterns(p);
        self
    }

    pub fn regex(mut self, regex: bool) -> Self {
        self.regex = Some(regex);
        self
    }

    pub fn mask(mut self, mask: Mask) -> Self {
        self.mask = Some(mask);
        self
    }

    /// Sets one recognized key from a loosely typed value.
    pub fn set(&mut self, key: &str, value: OptionValue) -> Result<(), ConfigError> {
        let key: OptionKey = key.parse()?;
        match key {
            OptionKey::Style => self.style = Some(value.into_text(key)?),
            OptionKey::Indent => self.indent = Some(value.into_count(key)?),
            OptionKey::Uniform => self.uniform = value.into_optional_text(key)?,
            OptionKey::Split => self.split = Some(value.into_text(key)?),
            OptionKey::Extend => self.extend = Some(value.into_text(key)?),
            OptionKey::Space => self.space = Some(value.into_text(key)?),
            OptionKey::Final => self.last = Some(value.into_text(key)?),
            OptionKey::FolderStart => self.folder_start = Some(value.into_text(key)?),
            OptionKey::FileStart => self.file_start = Some(value.into_text(key)?),
            OptionKey::Separator => self.separator = Some(value.into_text(key)?),
            OptionKey::DepthLimit => self.depth_limit = Some(value.into_optional_count(key)?),
            OptionKey::ItemLimit => self.item_limit = Some(value.into_optional_count(key)?),
            OptionKey::Beyond => self.beyond = Some(value.into_optional_text(key)?),
            OptionKey::First => self.first = Some(value.into_grouping(key)?),
            OptionKey::Sort => self.sort = Some(value.into_bool(key)?),
            OptionKey::SortReverse => self.sort_reverse = Some(value.into_bool(key)?),
            OptionKey::IncludeFolders => self.include_folders = Some(value.into_patterns(key)?),
            OptionKey::ExcludeFolders => self.exclude_folders = Some(value.into_patterns(key)?),
            OptionKey::IncludeFiles => self.include_files = Some(value.into_patterns(key)?),
            OptionKey::ExcludeFiles => self.exclude_files = Some(value.into_patterns(key)?),
            OptionKey::Regex => self.regex = Some(value.into_bool(key)?),
        }
        Ok(())
    }

    /// Parses and applies a `key=value` pair.
    pub fn set_pair(&mut self, pair: &str) -> Result<(), ConfigError> {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| ConfigError::InvalidValue {
                key: pair.to_string(),
                expected: "a key=value pair",
                found: pair.to_string(),
            })?;
        self.set(key.trim(), OptionValue::from_cli(value.trim()))
    }

    /// Layers `over` on top of `self`; whatever `over` sets wins.
    pub fn merge(self, over: RenderOptions) -> RenderOptions {
        RenderOptions {
            style: over.style.or(self.style),
            indent: over.indent.or(self.indent),
            uniform: over.uniform.or(self.uniform),
            split: over.split.or(self.split),
            extend: over.extend.or(self.extend),
            space: over.space.or(self.space),
            last: over.last.or(self.last),
            folder_start: over.folder_start.or(self.folder_start),
            file_start: over.file_start.or(self.file_start),
            separator: over.separator.or(self.separator),
            depth_limit: over.depth_limit.or(self.depth_limit),
            item_limit: over.item_limit.or(self.item_limit),
            beyond: over.beyond.or(self.beyond),
            first: over.first.or(self.first),
            sort: over.sort.or(self.sort),
            sort_reverse: over.sort_reverse.or(self.sort_reverse),
            sort_key: over.sort_key.or(self.sort_key),
            include_folders: over.include_folders.or(self.include_folders),
            exclude_folders: over.exclude_folders.or(self.exclude_folders),
            include_files: over.include_files.or(self.include_files),
            exclude_files: over.exclude_files.or(self.exclude_files),
            regex: over.regex.or(self.regex),
            mask: over.mask.or(self.mask),
        }
    }

    fn glyphs(&self) -> Result<StyleGlyphs, ConfigError> {
        let mut glyphs = style_glyphs(self.style.as_deref().unwrap_or("lines"))?;
        glyphs.format_indent(self.indent.unwrap_or(BASE_INDENT));
        if let Some(uniform) = self.uniform.as_deref().filter(|u| !u.is_empty()) {
            glyphs.set_uniform(uniform);
        }
        let overrides = [
            (&self.split, &mut glyphs.split),
            (&self.extend, &mut glyphs.extend),
            (&self.space, &mut glyphs.space),
            (&self.last, &mut glyphs.last),
            (&self.folder_start, &mut glyphs.folder_start),
            (&self.file_start, &mut glyphs.file_start),
        ];
        for (value, glyph) in overrides {
            if let Some(value) = value {
                *glyph = value.clone();
            }
        }
        Ok(glyphs)
    }

    fn filter(&self) -> Result<EntryFilter, ConfigError> {
        let mode = if self.regex.unwrap_or(true) {
            MatchMode::Regex
        } else {
            MatchMode::Literal
        };
        let compile = |key: &'static str, patterns: &Option<Option<Vec<String>>>| {
            patterns
                .as_ref()
                .and_then(Option::as_ref)
                .map(|patterns| NameMatcher::new(patterns, mode).context(InvalidPatternSnafu { key }))
                .transpose()
        };
        Ok(EntryFilter {
            include_folders: compile("include_folders", &self.include_folders)?,
            exclude_folders: compile("exclude_folders", &self.exclude_folders)?,
            include_files: compile("include_files", &self.include_files)?,
            exclude_files: compile("exclude_files", &self.exclude_files)?,
            mask: self.mask.clone(),
        })
    }

    /// Validates every setting and resolves the style into a [`RenderConfig`].
    pub fn build(&self) -> Result<RenderConfig, ConfigError> {
        let beyond = self
            .beyond
            .clone()
            .flatten()
            .map(|policy| policy.parse::<BeyondPolicy>())
            .transpose()?;
        let config = RenderConfig {
            glyphs: self.glyphs()?,
            separator: self.separator.clone().unwrap_or_else(|| "/".to_string()),
            depth_limit: self.depth_limit.flatten(),
            item_limit: self.item_limit.flatten(),
            beyond,
            sort: SortOptions {
                enabled: self.sort,
                grouping: self.first.unwrap_or_default(),
                reverse: self.sort_reverse.unwrap_or(false),
                key: self.sort_key.clone(),
            },
            filter: self.filter()?,
        };
        debug!(
            "Built render config: depth_limit={:?} item_limit={:?} beyond={:?}",
            config.depth_limit, config.item_limit, config.beyond
        );
        Ok(config)
    }
}

/// Validated settings consumed by the renderer.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub glyphs: StyleGlyphs,
    /// Appended to folder names.
    pub separator: String,
    /// Deepest level whose entries are listed; the root is level 0.
    pub depth_limit: Option<usize>,
    /// Most children listed per folder.
    pub item_limit: Option<usize>,
    pub beyond: Option<BeyondPolicy>,
    pub sort: SortOptions,
    pub filter: EntryFilter,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            glyphs: StyleGlyphs::lines(),
            separator: "/".to_string(),
            depth_limit: None,
            item_limit: None,
            beyond: None,
            sort: SortOptions::default(),
            filter: EntryFilter::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::{EntryInfo, EntryKind};
    use rstest::*;
    use std::path::PathBuf;

    #[rstest]
    #[case("depth_limit", OptionKey::DepthLimit)]
    #[case("depthlimit", OptionKey::DepthLimit)]
    #[case("depth-limit", OptionKey::DepthLimit)]
    #[case("folderstart", OptionKey::FolderStart)]
    #[case("final", OptionKey::Final)]
    #[case("Sort_Reverse", OptionKey::SortReverse)]
    fn key_spellings(#[case] raw: &str, #[case] expected: OptionKey) {
        assert_eq!(raw.parse::<OptionKey>().unwrap(), expected);
    }

    #[test]
    fn unknown_key_fails_closed() {
        let mut options = RenderOptions::new();
        let err = options.set("spacing", OptionValue::Bool(false)).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownKey { ref key } if key == "spacing"));
    }

    #[test]
    fn wrong_value_type_is_rejected() {
        let mut options = RenderOptions::new();
        let err = options
            .set("depth_limit", OptionValue::Text("deep".into()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        let err = options.set("indent", OptionValue::Int(-1)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn defaults_build_the_lines_style() {
        let config = RenderOptions::new().build().unwrap();
        assert_eq!(config.glyphs, StyleGlyphs::lines());
        assert_eq!(config.separator, "/");
        assert!(config.depth_limit.is_none());
        assert!(!config.sort.is_active());
        assert_eq!(config.sort.enabled, None);
        assert!(config.filter.is_empty());
    }

    #[test]
    fn layers_apply_in_order() {
        let mut overrides = RenderOptions::new();
        overrides.set_pair("split=>>").unwrap();
        overrides.set_pair("depthlimit=3").unwrap();
        let base = RenderOptions::new().style("dash").indent(4).depth_limit(1);
        let config = base.merge(overrides).build().unwrap();
        assert_eq!(config.glyphs.split, ">>");
        assert_eq!(config.glyphs.extend, "|   ");
        assert_eq!(config.depth_limit, Some(3));
    }

    #[test]
    fn later_layer_can_clear_a_limit() {
        let mut overrides = RenderOptions::new();
        overrides.set_pair("item_limit=none").unwrap();
        let config = RenderOptions::new()
            .item_limit(2)
            .merge(overrides)
            .build()
            .unwrap();
        assert_eq!(config.item_limit, None);
    }

    #[test]
    fn uniform_replaces_all_branch_glyphs() {
        let mut options = RenderOptions::new();
        options.set("uniform", OptionValue::Text("..".into())).unwrap();
        let config = options.build().unwrap();
        for glyph in [&config.glyphs.split, &config.glyphs.extend, &config.glyphs.space, &config.glyphs.last] {
            assert_eq!(glyph, "..");
        }
    }

    #[test]
    fn invalid_beyond_and_style_fail_at_build() {
        let err = RenderOptions::new().beyond("lots").build().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBeyond { .. }));
        let err = RenderOptions::new().style("fancy").build().unwrap_err();
        assert!(matches!(err, ConfigError::UnknownStyle { .. }));
    }

    #[test]
    fn invalid_regex_names_the_key() {
        let err = RenderOptions::new()
            .exclude_files(["(oops"])
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPattern { key: "exclude_files", .. }));
    }

    #[test]
    fn literal_mode_compiles_literal_filters() {
        let config = RenderOptions::new()
            .include_files(["app.py", "view.py"])
            .regex(false)
            .build()
            .unwrap();
        let file = |name: &str| EntryInfo {
            name: name.into(),
            path: PathBuf::from(name),
            kind: EntryKind::File,
            depth: 1,
        };
        assert!(config.filter.admits(&file("app.py")));
        assert!(!config.filter.admits(&file("__init__.py")));
    }

    #[test]
    fn grouping_forces_sorting() {
        let config = RenderOptions::new()
            .first(Grouping::FoldersFirst)
            .sorted(false)
            .build()
            .unwrap();
        assert!(config.sort.is_active());
    }

    #[rstest]
    #[case("7", OptionValue::Int(7))]
    #[case("true", OptionValue::Bool(true))]
    #[case("none", OptionValue::Null)]
    #[case("folders", OptionValue::Text("folders".into()))]
    fn cli_values(#[case] raw: &str, #[case] expected: OptionValue) {
        assert_eq!(OptionValue::from_cli(raw), expected);
    }
}
