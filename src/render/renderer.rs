use std::borrow::Cow;
use std::path::Path;

use snafu::ResultExt;
use tracing::{debug, trace};

use crate::config::RenderConfig;
use crate::render::header::Header;
use crate::render::{EnumerateSnafu, RealDir, RenderError, SourceEntry, TreeSource};
use crate::sorting::{SortOptions, sort_entries};

/// Lists a folder's children the way every consumer sees them: filtered and
/// masked first, then sorted.
pub(crate) fn enumerate<S: TreeSource>(
    source: &S,
    folder: &S::Handle,
    depth: usize,
    config: &RenderConfig,
) -> Result<Vec<SourceEntry<S::Handle>>, RenderError> {
    let mut entries = source.list(folder, depth).context(EnumerateSnafu)?;
    let listed = entries.len();
    if !config.filter.is_empty() {
        entries.retain(|entry| config.filter.admits(&entry.info));
    }
    trace!("Kept {} of {} entries at depth {}", entries.len(), listed, depth);
    let sort = match config.sort.enabled {
        None if source.sorted_by_default() => Cow::Owned(SortOptions {
            enabled: Some(true),
            ..config.sort.clone()
        }),
        _ => Cow::Borrowed(&config.sort),
    };
    Ok(sort_entries(entries, &sort))
}

pub struct Renderer<'a, S: TreeSource> {
    source: &'a S,
    config: &'a RenderConfig,
}

impl<'a, S: TreeSource> Renderer<'a, S> {
    pub fn new(source: &'a S, config: &'a RenderConfig) -> Self {
        Self { source, config }
    }

    /// Renders the whole tree. Nothing is returned unless the traversal
    /// completes.
    pub fn render(&self) -> Result<String, RenderError> {
        let glyphs = &self.config.glyphs;
        let mut lines = vec![format!(
            "{}{}{}",
            glyphs.folder_start,
            self.source.root_name(),
            self.config.separator
        )];
        self.visit(&self.source.root(), 0, &Header::default(), &mut lines)?;
        debug!("Rendered {} lines", lines.len());
        Ok(lines.join("\n"))
    }

    fn entry_line(&self, header: &str, last: bool, entry: &SourceEntry<S::Handle>) -> String {
        let glyphs = &self.config.glyphs;
        let branch = if last { &glyphs.last } else { &glyphs.split };
        if entry.info.is_folder() {
            format!(
                "{header}{branch}{}{}{}",
                glyphs.folder_start, entry.info.name, self.config.separator
            )
        } else {
            format!("{header}{branch}{}{}", glyphs.file_start, entry.info.name)
        }
    }

    fn beyond_line(&self, header: &str, text: &str) -> String {
        format!("{header}{}{text}", self.config.glyphs.last)
    }

    /// Emits the lines for the children of `folder`, which sits at `depth`.
    fn visit(
        &self,
        folder: &S::Handle,
        depth: usize,
        header: &Header,
        lines: &mut Vec<String>,
    ) -> Result<(), RenderError> {
        let prefix = header.render(&self.config.glyphs);

        if self.config.depth_limit.is_some_and(|limit| depth >= limit) {
            // The children are hidden as a whole; only a policy line stands in for them.
            if let Some(policy) = &self.config.beyond {
                let children = enumerate(self.source, folder, depth + 1, self.config)?;
                if !children.is_empty() {
                    let infos: Vec<_> = children.into_iter().map(|c| c.info).collect();
                    lines.push(self.beyond_line(&prefix, &policy.describe(&infos)));
                }
            }
            return Ok(());
        }

        let mut children = enumerate(self.source, folder, depth + 1, self.config)?;
        let omitted = match self.config.item_limit {
            Some(limit) if children.len() > limit => children.split_off(limit),
            _ => Vec::new(),
        };
        let summary = self.config.beyond.as_ref().filter(|_| !omitted.is_empty()).map(|policy| {
            let infos: Vec<_> = omitted.into_iter().map(|c| c.info).collect();
            policy.describe(&infos)
        });

        let count = children.len();
        for (i, child) in children.iter().enumerate() {
            let last = i + 1 == count && summary.is_none();
            lines.push(self.entry_line(&prefix, last, child));
            if child.info.is_folder() {
                self.visit(&child.handle, depth + 1, &header.descend(!last), lines)?;
            }
        }
        if let Some(text) = summary {
            lines.push(self.beyond_line(&prefix, &text));
        }
        Ok(())
    }
}

/// Renders any [`TreeSource`] with the given configuration.
pub fn render<S: TreeSource>(source: &S, config: &RenderConfig) -> Result<String, RenderError> {
    Renderer::new(source, config).render()
}

/// Renders a real directory.
pub fn render_path(path: impl AsRef<Path>, config: &RenderConfig) -> Result<String, RenderError> {
    let source = RealDir::new(path.as_ref());
    debug!("Rendering directory {}", source.path().display());
    render(&source, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderOptions;
    use crate::filter::Mask;
    use crate::sorting::Grouping;
    use rstest::*;
    use std::fs;
    use tempfile::TempDir;

    /// mypkg/{__init__.py, app.py, view.py, test/{__init__.py, test_app.py, test_view.py}}
    fn mypkg() -> (TempDir, std::path::PathBuf) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path().join("mypkg");
        fs::create_dir_all(root.join("test")).unwrap();
        for file in ["__init__.py", "app.py", "view.py"] {
            fs::write(root.join(file), "").unwrap();
        }
        for file in ["__init__.py", "test_app.py", "test_view.py"] {
            fs::write(root.join("test").join(file), "").unwrap();
        }
        (temp_dir, root)
    }

    fn render_with(root: &Path, options: RenderOptions) -> String {
        let config = options.first(Grouping::FoldersFirst).build().unwrap();
        render_path(root, &config).unwrap()
    }

    #[test]
    fn renders_full_tree_folders_first() {
        let (_guard, root) = mypkg();
        let expected = "mypkg/
├─test/
│ ├─__init__.py
│ ├─test_app.py
│ └─test_view.py
├─__init__.py
├─app.py
└─view.py";
        assert_eq!(render_with(&root, RenderOptions::new()), expected);
    }

    #[test]
    fn excluding_init_files_drops_one_entry_per_level() {
        let (_guard, root) = mypkg();
        let expected = "mypkg/
├─test/
│ ├─test_app.py
│ └─test_view.py
├─app.py
└─view.py";
        let options = RenderOptions::new().exclude_files([r"__init__\.py"]);
        assert_eq!(render_with(&root, options), expected);
    }

    #[test]
    fn excluding_dotted_files_leaves_only_the_folder_at_top() {
        let (_guard, root) = mypkg();
        let options = RenderOptions::new().exclude_files([r".*\..*"]).depth_limit(1);
        assert_eq!(render_with(&root, options), "mypkg/\n└─test/");
    }

    #[test]
    fn depth_limit_with_content_summary() {
        let (_guard, root) = mypkg();
        let options = RenderOptions::new().depth_limit(1).beyond("content");
        let expected = "mypkg/
├─test/
│ └─0 folder(s), 3 file(s)
├─__init__.py
├─app.py
└─view.py";
        assert_eq!(render_with(&root, options), expected);
    }

    #[test]
    fn depth_limit_zero_shows_only_the_root() {
        let (_guard, root) = mypkg();
        assert_eq!(render_with(&root, RenderOptions::new().depth_limit(0)), "mypkg/");
        let with_policy = RenderOptions::new().depth_limit(0).beyond("ellipsis");
        assert_eq!(render_with(&root, with_policy), "mypkg/\n└─...");
    }

    #[test]
    fn item_limit_without_policy_truncates_silently() {
        let (_guard, root) = mypkg();
        let expected = "mypkg/
├─test/
│ ├─__init__.py
│ └─test_app.py
└─__init__.py";
        assert_eq!(render_with(&root, RenderOptions::new().item_limit(2)), expected);
    }

    #[test]
    fn item_limit_with_policy_summarizes_the_remainder() {
        let (_guard, root) = mypkg();
        let expected = "mypkg/
├─test/
│ ├─__init__.py
│ └─0 folder(s), 2 file(s)
└─0 folder(s), 3 file(s)";
        let options = RenderOptions::new().item_limit(1).beyond("content");
        assert_eq!(render_with(&root, options), expected);
    }

    #[rstest]
    #[case(1, 1)]
    #[case(2, 2)]
    #[case(5, 3)]
    fn filtering_happens_before_limiting(#[case] limit: usize, #[case] listed: usize) {
        let (_guard, root) = mypkg();
        let config = RenderOptions::new()
            .exclude_files([r"__init__\.py"])
            .item_limit(limit)
            .depth_limit(1)
            .sorted(true)
            .build()
            .unwrap();
        let rendered = render_path(&root, &config).unwrap();
        assert_eq!(rendered.lines().skip(1).count(), listed);
    }

    #[test]
    fn summary_counts_exclude_filtered_entries() {
        let (_guard, root) = mypkg();
        let config = RenderOptions::new()
            .exclude_files([r"__init__\.py"])
            .item_limit(1)
            .beyond("content")
            .depth_limit(1)
            .first(Grouping::FoldersFirst)
            .build()
            .unwrap();
        let rendered = render_path(&root, &config).unwrap();
        let expected = "mypkg/
├─test/
│ └─0 folder(s), 2 file(s)
└─0 folder(s), 2 file(s)";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn custom_policy_text_is_emitted_verbatim() {
        let (_guard, root) = mypkg();
        let options = RenderOptions::new().item_limit(0).beyond("custom:(hidden)");
        assert_eq!(render_with(&root, options), "mypkg/\n└─(hidden)");
    }

    #[test]
    fn mask_that_rejects_everything_leaves_only_the_root() {
        let (_guard, root) = mypkg();
        let options = RenderOptions::new().mask(Mask::new(|_| false));
        assert_eq!(render_with(&root, options), "mypkg/");
    }

    #[test]
    fn mask_sees_real_paths() {
        let (_guard, root) = mypkg();
        let options = RenderOptions::new().mask(Mask::new(|entry| !entry.path.is_dir()));
        let rendered = render_with(&root, options);
        assert!(!rendered.contains("test/"));
        assert_eq!(rendered.lines().count(), 4);
    }

    #[test]
    fn wide_indent_and_prefixes() {
        let (_guard, root) = mypkg();
        let mut options = RenderOptions::new().indent(4).include_folders(["^$"]);
        options.folder_start = Some("Folder: ".into());
        options.file_start = Some("File: ".into());
        let expected = "Folder: mypkg/
├───File: __init__.py
├───File: app.py
└───File: view.py";
        assert_eq!(render_with(&root, options), expected);
    }

    #[test]
    fn real_folders_are_sorted_naturally_by_default() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path().join("unsorted");
        fs::create_dir_all(root.join("c")).unwrap();
        for file in ["b10.txt", "a.txt", "b2.txt"] {
            fs::write(root.join(file), "").unwrap();
        }
        let rendered = render_path(&root, &RenderConfig::default()).unwrap();
        assert_eq!(rendered, "unsorted/\n├─a.txt\n├─b2.txt\n├─b10.txt\n└─c/");
    }

    #[test]
    fn depth_limit_skips_the_beyond_line_of_empty_folders() {
        let (_guard, root) = mypkg();
        fs::create_dir(root.join("empty")).unwrap();
        let options = RenderOptions::new().depth_limit(1).beyond("ellipsis");
        let expected = "mypkg/
├─empty/
├─test/
│ └─...
├─__init__.py
├─app.py
└─view.py";
        assert_eq!(render_with(&root, options), expected);

        let filtered = RenderOptions::new()
            .depth_limit(1)
            .beyond("content")
            .exclude_files([r"\.py$"]);
        assert_eq!(render_with(&root, filtered), "mypkg/\n├─empty/\n└─test/");
    }

    #[test]
    fn missing_root_fails_without_partial_output() {
        let config = RenderConfig::default();
        let result = render_path("/this/path/does/not/exist", &config);
        assert!(matches!(result, Err(RenderError::EnumerateError { .. })));
    }
}
