use std::str::FromStr;

use crate::config::ConfigError;
use crate::entry::EntryInfo;

/// What to print in place of children that are not listed because of the
/// item limit or the depth limit. No policy means they are dropped silently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BeyondPolicy {
    /// A literal `...` line.
    Ellipsis,
    /// `<k> folder(s), <n> file(s)` counted over the omitted entries.
    ContentSummary,
    /// A caller-supplied line.
    Custom(String),
}

impl BeyondPolicy {
    /// Text standing in for `omitted`, which must already be filtered.
    pub fn describe(&self, omitted: &[EntryInfo]) -> String {
        match self {
            BeyondPolicy::Ellipsis => "...".to_string(),
            BeyondPolicy::ContentSummary => {
                let folders = omitted.iter().filter(|e| e.is_folder()).count();
                let files = omitted.len() - folders;
                format!("{folders} folder(s), {files} file(s)")
            }
            BeyondPolicy::Custom(text) => text.clone(),
        }
    }
}

impl FromStr for BeyondPolicy {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "ellipsis" => Ok(BeyondPolicy::Ellipsis),
            "content" | "contents" | "content-summary" => Ok(BeyondPolicy::ContentSummary),
            _ => value
                .strip_prefix("custom:")
                .or_else(|| value.strip_prefix('_'))
                .map(|text| BeyondPolicy::Custom(text.to_string()))
                .ok_or_else(|| ConfigError::InvalidBeyond {
                    value: value.to_string(),
                }),
        }
    }
}
