use snafu::OptionExt;

use crate::config::{ConfigError, UnknownStyleSnafu};

/// Width every built-in glyph is designed for.
pub const BASE_INDENT: usize = 2;

/// Branch-drawing glyphs and display-name prefixes of one style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleGlyphs {
    /// Branch of a sibling that is not the last one.
    pub split: String,
    /// Continuation under an ancestor that still has siblings below it.
    pub extend: String,
    /// Continuation under an ancestor that was the last of its siblings.
    pub space: String,
    /// Branch of the last sibling.
    pub last: String,
    pub folder_start: String,
    pub file_start: String,
}

impl StyleGlyphs {
    fn new(split: &str, extend: &str, space: &str, last: &str) -> Self {
        Self {
            split: split.to_string(),
            extend: extend.to_string(),
            space: space.to_string(),
            last: last.to_string(),
            folder_start: String::new(),
            file_start: String::new(),
        }
    }

    fn with_starts(mut self, folder_start: &str, file_start: &str) -> Self {
        self.folder_start = folder_start.to_string();
        self.file_start = file_start.to_string();
        self
    }

    pub fn lines() -> Self {
        Self::new("├─", "│ ", "  ", "└─")
    }

    fn branch_glyphs_mut(&mut self) -> [(&mut String, Pad); 4] {
        [
            (&mut self.split, Pad::RepeatLast),
            (&mut self.extend, Pad::Blank),
            (&mut self.space, Pad::Blank),
            (&mut self.last, Pad::RepeatLast),
        ]
    }

    /// Resizes the four branch glyphs to exactly `indent` characters.
    ///
    /// Narrower widths keep the leading characters. Wider widths pad
    /// continuation glyphs with blanks and branch glyphs with their own last
    /// character, so `├─` becomes `├───`.
    pub fn format_indent(&mut self, indent: usize) {
        for (glyph, pad) in self.branch_glyphs_mut() {
            *glyph = resize(glyph, indent, pad);
        }
    }

    /// Replaces all four branch glyphs with the same string.
    pub fn set_uniform(&mut self, uniform: &str) {
        for (glyph, _) in self.branch_glyphs_mut() {
            *glyph = uniform.to_string();
        }
    }

    /// Every character used by the branch glyphs.
    pub fn glyph_chars(&self) -> impl Iterator<Item = char> + '_ {
        [&self.split, &self.extend, &self.space, &self.last]
            .into_iter()
            .flat_map(|glyph| glyph.chars())
    }
}

#[derive(Debug, Clone, Copy)]
enum Pad {
    Blank,
    RepeatLast,
}

fn resize(glyph: &str, indent: usize, pad: Pad) -> String {
    let width = glyph.chars().count();
    if indent <= width {
        return glyph.chars().take(indent).collect();
    }
    let fill = match pad {
        Pad::Blank => ' ',
        Pad::RepeatLast => glyph.chars().last().unwrap_or(' '),
    };
    let mut resized = glyph.to_string();
    resized.extend(std::iter::repeat_n(fill, indent - width));
    resized
}

/// Names of the built-in styles, in table order.
pub const STYLE_NAMES: [&str; 6] = ["lines", "dash", "spaces", "arrow", "plus", "emoji"];

fn builtin(name: &str) -> Option<StyleGlyphs> {
    let glyphs = match name {
        "lines" => StyleGlyphs::lines(),
        "dash" => StyleGlyphs::new("|-", "| ", "  ", "`-"),
        "spaces" => StyleGlyphs::new("  ", "  ", "  ", "  "),
        "arrow" => StyleGlyphs::new("→ ", "  ", "  ", "→ "),
        "plus" => StyleGlyphs::new("+-", "| ", "  ", "+-"),
        "emoji" => StyleGlyphs::lines().with_starts("📁 ", "📄 "),
        _ => return None,
    };
    Some(glyphs)
}

/// Looks up a built-in style. The returned glyphs are an independent copy.
pub fn style_glyphs(name: &str) -> Result<StyleGlyphs, ConfigError> {
    builtin(name).context(UnknownStyleSnafu { name })
}
