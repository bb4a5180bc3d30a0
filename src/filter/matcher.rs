use regex::Regex;
use snafu::{ResultExt, Snafu};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Whole-name equality.
    Literal,
    /// Unanchored regular expression search.
    #[default]
    Regex,
}

#[derive(Debug, Clone)]
enum Pattern {
    Literal(String),
    Regex(Regex),
}

impl Pattern {
    fn is_match(&self, name: &str) -> bool {
        match self {
            Pattern::Literal(literal) => literal == name,
            Pattern::Regex(regex) => regex.is_match(name),
        }
    }
}

/// A set of patterns; a name matches when any pattern matches it.
///
/// An empty pattern is not special: as a regex it matches every name, as a
/// literal it matches no real name. An absent filter is modeled with `Option`
/// by the callers, never with an empty string.
#[derive(Debug, Clone)]
pub struct NameMatcher {
    patterns: Vec<Pattern>,
}

impl NameMatcher {
    pub fn new<I, S>(patterns: I, mode: MatchMode) -> Result<Self, PatternError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|pattern| {
                let pattern = pattern.as_ref();
                match mode {
                    MatchMode::Literal => Ok(Pattern::Literal(pattern.to_string())),
                    MatchMode::Regex => Regex::new(pattern)
                        .map(Pattern::Regex)
                        .context(PatternSnafu { pattern }),
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    pub fn is_match(&self, name: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.is_match(name))
    }
}

#[derive(Debug, Snafu)]
#[snafu(display("Invalid regular expression '{}'", pattern))]
pub struct PatternError {
    pub pattern: String,
    source: regex::Error,
}
