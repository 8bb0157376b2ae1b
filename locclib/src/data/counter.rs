//! High-level line counting API.
//!
//! A [`LineCounter`] turns a list of files into [`PathCounts`], the raw
//! per-file, per-language input of the aggregation cache. [`FileCounter`] is
//! the default implementation: it detects the language of each file through a
//! [`LanguageRegistry`] and classifies lines with the language's syntax.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, trace, warn};

use crate::Result;

use super::counts::Counts;
use super::language::{Language, LanguageRegistry};
use super::visitor::count_path;

/// Raw counting result: for every file, the counts of each language found in it.
///
/// A file whose inner map is empty was not recognized.
pub type PathCounts = HashMap<PathBuf, HashMap<Language, Counts>>;

/// Options for counting lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountOptions {
    /// Count documentation strings as comments (true) or ignore them (false)
    pub count_doc_strings: bool,
}

impl Default for CountOptions {
    fn default() -> Self {
        Self {
            count_doc_strings: true,
        }
    }
}

impl CountOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether documentation strings are counted as comments.
    pub fn count_doc_strings(mut self, count: bool) -> Self {
        self.count_doc_strings = count;
        self
    }
}

/// Something that can count the lines of a set of files.
pub trait LineCounter {
    /// Count every file. Each readable input path appears exactly once in the
    /// result; files that cannot be read are logged and left out.
    fn count(&self, files: &[PathBuf]) -> Result<PathCounts>;
}

/// Counts files using extension based language detection.
#[derive(Debug, Clone, Default)]
pub struct FileCounter {
    registry: LanguageRegistry,
    options: CountOptions,
}

impl FileCounter {
    pub fn new(registry: LanguageRegistry, options: CountOptions) -> Self {
        Self { registry, options }
    }

    pub fn registry(&self) -> &LanguageRegistry {
        &self.registry
    }

    pub fn options(&self) -> CountOptions {
        self.options
    }

    /// Count a single file.
    ///
    /// Returns an empty map when the file's language cannot be determined.
    pub fn count_file(&self, path: &Path) -> Result<HashMap<Language, Counts>> {
        let mut languages = HashMap::new();
        match self.registry.detect(path) {
            Some(language) => {
                let counts = count_path(path, language.syntax(), self.options.count_doc_strings)?;
                trace!(path = %path.display(), %language, ?counts, "counted file");
                languages.insert(language, counts);
            }
            None => debug!(path = %path.display(), "unrecognized file"),
        }
        Ok(languages)
    }
}

impl LineCounter for FileCounter {
    fn count(&self, files: &[PathBuf]) -> Result<PathCounts> {
        debug!(files = files.len(), "counting files");
        let counted: PathCounts = files
            .par_iter()
            .filter_map(|path| match self.count_file(path) {
                Ok(languages) => Some((path.clone(), languages)),
                Err(err) => {
                    warn!(error = %err, "skipping unreadable file");
                    None
                }
            })
            .collect();
        Ok(counted)
    }
}

/// Count files with the default registry.
///
/// # Example
///
/// ```rust
/// use locclib::{count_files, CountOptions, Language};
/// use std::fs;
/// use tempfile::tempdir;
///
/// let dir = tempdir().unwrap();
/// let file = dir.path().join("main.rs");
/// fs::write(&file, "// hello\nfn main() {}\n").unwrap();
///
/// let counts = count_files(&[file.clone()], CountOptions::new()).unwrap();
/// let rust = counts[&file][&Language::Rust];
/// assert_eq!(rust.code, 1);
/// assert_eq!(rust.comment, 1);
/// ```
pub fn count_files(files: &[PathBuf], options: CountOptions) -> Result<PathCounts> {
    FileCounter::new(LanguageRegistry::new(), options).count(files)
}
