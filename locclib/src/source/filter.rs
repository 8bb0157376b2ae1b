//! File filtering and discovery with glob pattern support.
//!
//! Discovery walks a directory tree and keeps every regular file accepted by
//! the [`FilterConfig`]. Patterns are matched against the path relative to the
//! directory being walked, so `src/**` means the same thing wherever the
//! project lives. Hidden directories and common build output directories are
//! never entered.

use std::path::{Path, PathBuf};

use glob::Pattern;
use tracing::debug;
use walkdir::WalkDir;

use crate::error::LoccError;
use crate::Result;

/// Directories that never contain sources worth counting.
const SKIPPED_DIRS: &[&str] = &["target", "build", "node_modules"];

/// Configuration for file filtering.
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    /// Glob patterns to include (if empty, include all files)
    pub include: Vec<Pattern>,
    /// Glob patterns to exclude
    pub exclude: Vec<Pattern>,
}

fn compile(pattern: &str) -> Result<Pattern> {
    Pattern::new(pattern).map_err(|e| LoccError::InvalidGlob {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}

impl FilterConfig {
    /// Create a new empty filter config (includes every file).
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a filter from include and exclude pattern lists.
    pub fn from_globs<I, E>(include: I, exclude: E) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        E: IntoIterator,
        E::Item: AsRef<str>,
    {
        let mut filter = Self::new();
        for pattern in include {
            filter = filter.include(pattern.as_ref())?;
        }
        for pattern in exclude {
            filter = filter.exclude(pattern.as_ref())?;
        }
        Ok(filter)
    }

    /// Add an include pattern.
    pub fn include(mut self, pattern: &str) -> Result<Self> {
        self.include.push(compile(pattern)?);
        Ok(self)
    }

    /// Add an exclude pattern.
    pub fn exclude(mut self, pattern: &str) -> Result<Self> {
        self.exclude.push(compile(pattern)?);
        Ok(self)
    }

    /// Add multiple include patterns.
    pub fn include_many(mut self, patterns: &[&str]) -> Result<Self> {
        for pattern in patterns {
            self = self.include(pattern)?;
        }
        Ok(self)
    }

    /// Add multiple exclude patterns.
    pub fn exclude_many(mut self, patterns: &[&str]) -> Result<Self> {
        for pattern in patterns {
            self = self.exclude(pattern)?;
        }
        Ok(self)
    }

    /// Check if a path matches the filter criteria.
    ///
    /// A path matches if it matches at least one include pattern (or include
    /// is empty) and doesn't match any exclude pattern.
    pub fn matches(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();

        if self.exclude.iter().any(|p| p.matches(&path_str)) {
            return false;
        }

        self.include.is_empty() || self.include.iter().any(|p| p.matches(&path_str))
    }
}

/// Check if a directory should be skipped during traversal.
fn should_skip_dir(name: &str) -> bool {
    name.starts_with('.') || SKIPPED_DIRS.contains(&name)
}

/// Discover source files in a directory.
///
/// Walks the directory tree and returns all files that match the filter,
/// sorted. A file given as `root` is returned if it matches.
pub fn discover_files(root: impl AsRef<Path>, filter: &FilterConfig) -> Result<Vec<PathBuf>> {
    let root = root.as_ref();

    if !root.exists() {
        return Err(LoccError::PathNotFound(root.to_path_buf()));
    }

    let mut files = Vec::new();

    if root.is_file() {
        if filter.matches(root) {
            files.push(root.to_path_buf());
        }
        return Ok(files);
    }

    let walker = WalkDir::new(root).follow_links(true).into_iter();

    for entry in walker.filter_entry(|e| {
        if e.depth() == 0 || !e.file_type().is_dir() {
            return true;
        }
        let name = e.file_name().to_str().unwrap_or("");
        !should_skip_dir(name)
    }) {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                debug!(error = %err, "skipping unreadable entry");
                continue;
            }
        };

        let path = entry.path();
        if !entry.file_type().is_file() && !path.is_file() {
            continue;
        }

        let relative = path.strip_prefix(root).unwrap_or(path);
        if filter.matches(relative) {
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    debug!(root = %root.display(), files = files.len(), "discovered files");

    Ok(files)
}

/// Discover source files in multiple directories.
pub fn discover_files_in_dirs<P: AsRef<Path>>(
    dirs: &[P],
    filter: &FilterConfig,
) -> Result<Vec<PathBuf>> {
    let mut all_files = Vec::new();

    for dir in dirs {
        all_files.extend(discover_files(dir, filter)?);
    }

    all_files.sort();
    all_files.dedup();

    Ok(all_files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn create_test_files(dir: &Path) {
        for sub in [
            "src/main/java",
            "src/main/cpp",
            "src/test/java",
            "build/classes",
            "node_modules/pkg",
            "target/debug",
            ".git",
        ] {
            fs::create_dir_all(dir.join(sub)).unwrap();
        }

        fs::write(dir.join("src/main/java/App.java"), "class App {}").unwrap();
        fs::write(dir.join("src/main/cpp/util.cpp"), "int f();").unwrap();
        fs::write(dir.join("src/test/java/AppTest.java"), "class AppTest {}").unwrap();
        fs::write(dir.join("build/classes/Gen.java"), "// generated").unwrap();
        fs::write(dir.join("node_modules/pkg/index.js"), "module.exports = 1;").unwrap();
        fs::write(dir.join("target/debug/build.rs"), "// generated").unwrap();
        fs::write(dir.join(".git/config"), "[core]").unwrap();
        fs::write(dir.join("README.md"), "# Readme").unwrap();
        fs::write(dir.join("data.unknown"), "???").unwrap();
    }

    #[test]
    fn test_filter_matches_everything_by_default() {
        let filter = FilterConfig::new();

        assert!(filter.matches(Path::new("src/main.rs")));
        assert!(filter.matches(Path::new("README.md")));
        assert!(filter.matches(Path::new("data.unknown")));
    }

    #[test]
    fn test_filter_with_include_pattern() {
        let filter = FilterConfig::new().include("src/main/**").unwrap();

        assert!(filter.matches(Path::new("src/main/java/App.java")));
        assert!(!filter.matches(Path::new("src/test/java/AppTest.java")));
        assert!(!filter.matches(Path::new("README.md")));
    }

    #[test]
    fn test_filter_exclude_wins() {
        let filter = FilterConfig::from_globs(["src/**"], ["**/test/**"]).unwrap();

        assert!(filter.matches(Path::new("src/main/java/App.java")));
        assert!(!filter.matches(Path::new("src/test/java/AppTest.java")));
        assert!(!filter.matches(Path::new("other/File.java")));
    }

    #[test]
    fn test_filter_with_multiple_patterns() {
        let filter = FilterConfig::new()
            .include_many(&["**/*.java", "**/*.cpp"])
            .unwrap()
            .exclude_many(&["**/test/**"])
            .unwrap();

        assert!(filter.matches(Path::new("src/main/java/App.java")));
        assert!(filter.matches(Path::new("src/main/cpp/util.cpp")));
        assert!(!filter.matches(Path::new("src/test/java/AppTest.java")));
        assert!(!filter.matches(Path::new("README.md")));
    }

    #[test]
    fn test_discover_files() {
        let temp = tempdir().unwrap();
        create_test_files(temp.path());

        let files = discover_files(temp.path(), &FilterConfig::new()).unwrap();
        let relative: Vec<String> = files
            .iter()
            .map(|p| {
                p.strip_prefix(temp.path())
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect();

        assert_eq!(
            relative,
            vec![
                "README.md",
                "data.unknown",
                "src/main/cpp/util.cpp",
                "src/main/java/App.java",
                "src/test/java/AppTest.java",
            ]
        );
    }

    #[test]
    fn test_discover_files_relative_patterns() {
        let temp = tempdir().unwrap();
        create_test_files(temp.path());

        let filter = FilterConfig::from_globs(["src/**"], ["src/test/**"]).unwrap();
        let files = discover_files(temp.path(), &filter).unwrap();

        assert_eq!(files.len(), 2);
        assert!(files.iter().any(|p| p.ends_with("src/main/java/App.java")));
        assert!(files.iter().any(|p| p.ends_with("src/main/cpp/util.cpp")));
    }

    #[test]
    fn test_discover_single_file() {
        let temp = tempdir().unwrap();
        let file_path = temp.path().join("test.py");
        fs::write(&file_path, "print(1)").unwrap();

        let files = discover_files(&file_path, &FilterConfig::new()).unwrap();

        assert_eq!(files, vec![file_path]);
    }

    #[test]
    fn test_discover_files_in_dirs_dedups() {
        let temp = tempdir().unwrap();
        create_test_files(temp.path());
        let main = temp.path().join("src/main");

        let files =
            discover_files_in_dirs(&[main.clone(), main.join("java")], &FilterConfig::new())
                .unwrap();

        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_discover_files_nonexistent() {
        let result = discover_files("/nonexistent/path", &FilterConfig::new());

        assert!(matches!(result, Err(LoccError::PathNotFound(_))));
    }

    #[test]
    fn test_invalid_glob_pattern() {
        let result = FilterConfig::new().include("[invalid");

        if let Err(LoccError::InvalidGlob { pattern, .. }) = result {
            assert_eq!(pattern, "[invalid");
        } else {
            panic!("Expected InvalidGlob error");
        }
    }
}
