use std::path::Path;

use snafu::ResultExt;
use tracing::{debug, trace};

use crate::entry::EntryKind;
use crate::ext::{AsyncTryFrom, BestEffortPathExt};
use crate::filesystem::{FakeTree, NodeId, TreeError};
use crate::parser::{InvalidEntrySnafu, ParseError, ParseOptions, ReadSnafu};

/// One non-blank input line split into its parts.
#[derive(Debug, PartialEq, Eq)]
struct Line<'a> {
    width: usize,
    name: &'a str,
    kind: EntryKind,
}

fn strip_comment<'a>(line: &'a str, options: &ParseOptions) -> &'a str {
    if !options.parse_comments || options.comment_marker.is_empty() {
        return line;
    }
    match line.find(&options.comment_marker) {
        Some(index) => &line[..index],
        None => line,
    }
}

fn split_line<'a>(raw: &'a str, options: &ParseOptions) -> Option<Line<'a>> {
    let text = strip_comment(raw, options).trim_end();
    let name_start = text
        .char_indices()
        .find(|(_, c)| !options.header_chars.contains(c))
        .map(|(i, _)| i)?;
    let width = text[..name_start].chars().count();
    let mut name = &text[name_start..];
    if let Some(stripped) = options.prefixes.iter().find_map(|p| name.strip_prefix(p.as_str())) {
        name = stripped;
    }
    let (name, kind) = match name.strip_suffix(options.separator.as_str()) {
        Some(folder) if !options.separator.is_empty() => (folder, EntryKind::Folder),
        _ => (name, EntryKind::File),
    };
    Some(Line { width, name, kind })
}

struct Level {
    width: usize,
    folder: NodeId,
}

struct TreeBuilder {
    tree: FakeTree,
    levels: Vec<Level>,
    unit: Option<usize>,
    last: Option<NodeId>,
}

impl TreeBuilder {
    fn new(sentinel: &str) -> Result<Self, TreeError> {
        let tree = FakeTree::new(sentinel)?;
        Ok(Self {
            tree,
            levels: Vec::new(),
            unit: None,
            last: None,
        })
    }

    /// Finds the folder a line of the given width belongs to.
    fn parent_for(&mut self, number: usize, width: usize) -> Result<NodeId, ParseError> {
        let Some(top) = self.levels.last() else {
            self.levels.push(Level {
                width,
                folder: self.tree.root(),
            });
            return Ok(self.tree.root());
        };

        if width > top.width {
            let step = width - top.width;
            let unit = *self.unit.get_or_insert(step);
            if step != unit {
                return Err(ParseError::InconsistentIndent {
                    line: number,
                    step,
                    unit,
                });
            }
            let Some(folder) = self.last else {
                return Err(ParseError::MisalignedIndent { line: number, width });
            };
            // Indented entries turn a preceding bare name into a folder.
            self.tree
                .make_folder(folder)
                .context(InvalidEntrySnafu { line: number, name: "" })?;
            trace!("Line {} opens level {} under {}", number, width, folder);
            self.levels.push(Level { width, folder });
            return Ok(folder);
        }

        while self.levels.last().is_some_and(|level| level.width > width) {
            self.levels.pop();
        }
        match self.levels.last() {
            Some(level) if level.width == width => Ok(level.folder),
            _ => Err(ParseError::MisalignedIndent { line: number, width }),
        }
    }

    fn push(&mut self, number: usize, line: Line<'_>) -> Result<(), ParseError> {
        if line.name.is_empty() {
            return Err(ParseError::EmptyName { line: number });
        }
        let parent = self.parent_for(number, line.width)?;
        let id = self
            .tree
            .create(parent, line.name, line.kind)
            .map_err(|err| match err {
                TreeError::NameCollision { .. } => ParseError::DuplicateName {
                    line: number,
                    name: line.name.to_string(),
                },
                other => ParseError::InvalidEntry {
                    line: number,
                    name: line.name.to_string(),
                    source: other,
                },
            })?;
        self.last = Some(id);
        Ok(())
    }

    /// A single top-level folder becomes the root; otherwise the sentinel
    /// stays on top.
    fn finish(mut self) -> Result<FakeTree, TreeError> {
        let single_folder = {
            let mut top_level = self.tree.root_node().children();
            match (top_level.next(), top_level.next()) {
                (Some(only), None) if only.is_folder() => Some(only.id()),
                _ => None,
            }
        };
        if let Some(folder) = single_folder {
            self.tree.reroot(folder)?;
        }
        Ok(self.tree)
    }
}

/// Rebuilds a tree from a diagram or an indented listing.
///
/// The indentation of a line is the run of header characters in front of its
/// name. Each deeper level must be indented by the same step, and a line that
/// moves back out must land exactly on an enclosing level.
pub fn parse_tree(text: &str, options: &ParseOptions) -> Result<FakeTree, ParseError> {
    let mut builder = TreeBuilder::new(&options.sentinel_name).context(InvalidEntrySnafu {
        line: 0usize,
        name: options.sentinel_name.clone(),
    })?;

    for (index, raw) in text.lines().enumerate() {
        if let Some(line) = split_line(raw, options) {
            builder.push(index + 1, line)?;
        }
    }

    let tree = builder.finish().context(InvalidEntrySnafu {
        line: 0usize,
        name: options.sentinel_name.clone(),
    })?;
    debug!("Parsed tree '{}' with {} nodes", tree.root_node().name(), tree.len());
    Ok(tree)
}

/// Reads and parses a diagram file.
pub async fn read_tree(path: &Path, options: &ParseOptions) -> Result<FakeTree, ParseError> {
    debug!("Reading diagram file: {}", path.best_effort_path_display());
    let bytes = compio::fs::read(path).await.context(ReadSnafu {
        file_path: path.best_effort_path_display(),
    })?;
    parse_tree(&String::from_utf8_lossy(&bytes), options)
}

impl TryFrom<&str> for FakeTree {
    type Error = ParseError;

    fn try_from(text: &str) -> Result<Self, Self::Error> {
        parse_tree(text, &ParseOptions::default())
    }
}

impl AsyncTryFrom<&Path> for FakeTree {
    type Error = ParseError;

    async fn async_try_from(path: &Path) -> Result<Self, Self::Error> {
        read_tree(path, &ParseOptions::default()).await
    }
}
