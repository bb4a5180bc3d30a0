use std::collections::HashSet;

use crate::config::{RenderConfig, STYLE_NAMES, StyleGlyphs, style_glyphs};

/// How diagram lines are split into indentation, prefix and name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Trailing marker of folder names.
    pub separator: String,
    /// Strip everything from `comment_marker` to the end of the line.
    pub parse_comments: bool,
    pub comment_marker: String,
    /// Characters that make up the indentation in front of a name.
    pub header_chars: HashSet<char>,
    /// Display prefixes removed from the front of a name, first match wins.
    pub prefixes: Vec<String>,
    /// Name of the implicit folder holding the top-level entries.
    pub sentinel_name: String,
}

fn prefixes_of<'a>(styles: impl IntoIterator<Item = &'a StyleGlyphs>) -> Vec<String> {
    let mut prefixes: Vec<String> = Vec::new();
    for glyphs in styles {
        for prefix in [&glyphs.folder_start, &glyphs.file_start] {
            if !prefix.is_empty() && !prefixes.contains(prefix) {
                prefixes.push(prefix.clone());
            }
        }
    }
    prefixes
}

impl Default for ParseOptions {
    /// Understands every built-in style at any indent, as well as plain
    /// whitespace indentation.
    ///
    /// Every glyph character counts as indentation, so a name starting with
    /// `+`, `-`, `|`, `` ` `` or `→` loses that character: `+page.svelte`
    /// reads back as `page.svelte`. Use [`ParseOptions::for_config`] with the
    /// style that drew the diagram to keep such names whole.
    fn default() -> Self {
        let styles: Vec<StyleGlyphs> = STYLE_NAMES
            .iter()
            .filter_map(|name| style_glyphs(name).ok())
            .collect();
        let mut header_chars: HashSet<char> = styles.iter().flat_map(StyleGlyphs::glyph_chars).collect();
        header_chars.extend([' ', '\t']);
        Self {
            separator: "/".to_string(),
            parse_comments: true,
            comment_marker: "#".to_string(),
            header_chars,
            prefixes: prefixes_of(&styles),
            sentinel_name: "FakeDir".to_string(),
        }
    }
}

impl ParseOptions {
    /// Options matching the output of a renderer using `config`.
    pub fn for_config(config: &RenderConfig) -> Self {
        let mut header_chars: HashSet<char> = config.glyphs.glyph_chars().collect();
        header_chars.extend([' ', '\t']);
        Self {
            separator: config.separator.clone(),
            header_chars,
            prefixes: prefixes_of([&config.glyphs]),
            ..Self::default()
        }
    }

    pub fn parse_comments(mut self, parse_comments: bool) -> Self {
        self.parse_comments = parse_comments;
        self
    }
}
