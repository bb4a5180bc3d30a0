use std::path::{Component, Path, PathBuf};

/// Absolute, normalized form of `path`, even when it does not exist.
fn best_effort_absolute(path: &Path) -> PathBuf {
    if let Ok(canonical_path) = path.canonicalize() {
        return canonical_path;
    }
    let absolute_path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        match std::env::current_dir() {
            Ok(current_dir) => current_dir.join(path),
            Err(_) => path.to_path_buf(),
        }
    };
    normalize_path(&absolute_path)
}

fn normalize_path(path: &Path) -> PathBuf {
    let mut components = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !components.is_empty() && !matches!(components.last(), Some(Component::RootDir))
                {
                    components.pop();
                }
            }
            _ => components.push(component),
        }
    }

    components.iter().collect()
}

pub trait BestEffortPathExt {
    /// Human-readable absolute path for logs and error messages.
    fn best_effort_path_display(&self) -> String;

    /// Name of the last path component, resolving `.` and `..` first.
    ///
    /// A filesystem root has no name of its own and is displayed in full.
    fn best_effort_file_name(&self) -> String;
}

impl BestEffortPathExt for Path {
    fn best_effort_path_display(&self) -> String {
        best_effort_absolute(self).display().to_string()
    }

    fn best_effort_file_name(&self) -> String {
        let absolute = best_effort_absolute(self);
        match absolute.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => absolute.display().to_string(),
        }
    }
}

impl BestEffortPathExt for PathBuf {
    fn best_effort_path_display(&self) -> String {
        self.as_path().best_effort_path_display()
    }

    fn best_effort_file_name(&self) -> String {
        self.as_path().best_effort_file_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn normalizes_parent_and_current_components() {
        let normalized = normalize_path(Path::new("/a/./b/../c"));
        assert_eq!(normalized, PathBuf::from("/a/c"));
        assert_eq!(normalize_path(Path::new("/..")), PathBuf::from("/"));
    }

    #[test]
    fn file_name_of_existing_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let nested = temp_dir.path().join("mypkg");
        std::fs::create_dir(&nested).expect("Failed to create directory");
        assert_eq!(nested.join(".").best_effort_file_name(), "mypkg");
        assert_eq!(nested.join("..").best_effort_file_name(), temp_dir.path().best_effort_file_name());
    }

    #[test]
    fn file_name_of_missing_path_is_still_derived() {
        let path = Path::new("/this/path/does/not/exist");
        assert_eq!(path.best_effort_file_name(), "exist");
        assert_eq!(path.best_effort_path_display(), "/this/path/does/not/exist");
    }
}
