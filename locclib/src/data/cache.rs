//! Aggregation cache over raw per-file, per-language counts.
//!
//! [`CountsCache`] wraps one [`PathCounts`] snapshot and derives every view the
//! reports need (language set, totals, per-language and per-file sums, the files
//! containing each language and the unrecognized files). All views are computed
//! once, at construction, so the cache is immutable afterwards and can be shared
//! by reference between renderers running on different threads.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use super::counter::PathCounts;
use super::counts::Counts;
use super::language::Language;

/// Derived views over one counting run.
#[derive(Debug, Clone, Default)]
pub struct CountsCache {
    path_counts: PathCounts,
    languages: BTreeSet<Language>,
    total_counts: Counts,
    language_counts: BTreeMap<Language, Counts>,
    language_paths: BTreeMap<Language, BTreeSet<PathBuf>>,
    file_counts: BTreeMap<PathBuf, Counts>,
    unrecognized: BTreeSet<PathBuf>,
    sorted_languages: Vec<Language>,
    sorted_paths: Vec<PathBuf>,
}

impl CountsCache {
    /// Build the cache, computing every derived view in a single pass.
    pub fn new(path_counts: PathCounts) -> Self {
        let mut languages = BTreeSet::new();
        let mut total_counts = Counts::ZERO;
        let mut language_counts: BTreeMap<Language, Counts> = BTreeMap::new();
        let mut language_paths: BTreeMap<Language, BTreeSet<PathBuf>> = BTreeMap::new();
        let mut file_counts = BTreeMap::new();
        let mut unrecognized = BTreeSet::new();

        for (path, counts_by_language) in &path_counts {
            if counts_by_language.is_empty() {
                unrecognized.insert(path.clone());
                continue;
            }

            let mut file_total = Counts::ZERO;
            for (&language, &counts) in counts_by_language {
                languages.insert(language);
                total_counts += counts;
                file_total += counts;
                *language_counts.entry(language).or_default() += counts;
                language_paths
                    .entry(language)
                    .or_default()
                    .insert(path.clone());
            }
            file_counts.insert(path.clone(), file_total);
        }

        let mut sorted_languages: Vec<Language> = languages.iter().copied().collect();
        sorted_languages.sort_by(|a, b| a.display_name().cmp(b.display_name()));

        let mut sorted_paths: Vec<PathBuf> = path_counts.keys().cloned().collect();
        sorted_paths.sort_by(|a, b| a.to_string_lossy().cmp(&b.to_string_lossy()));

        Self {
            path_counts,
            languages,
            total_counts,
            language_counts,
            language_paths,
            file_counts,
            unrecognized,
            sorted_languages,
            sorted_paths,
        }
    }

    /// The raw snapshot the cache was built from.
    pub fn path_counts(&self) -> &PathCounts {
        &self.path_counts
    }

    /// Every language found in at least one file.
    pub fn languages(&self) -> &BTreeSet<Language> {
        &self.languages
    }

    /// Sum over all files and languages.
    pub fn total_counts(&self) -> Counts {
        self.total_counts
    }

    /// Sum per language over all files.
    pub fn language_counts(&self) -> &BTreeMap<Language, Counts> {
        &self.language_counts
    }

    /// Files containing each language.
    pub fn language_paths(&self) -> &BTreeMap<Language, BTreeSet<PathBuf>> {
        &self.language_paths
    }

    /// Sum per file over its languages.
    ///
    /// Unrecognized files have no entry; use [`CountsCache::file_counts_or_zero`]
    /// when a missing file should read as [`Counts::ZERO`].
    pub fn file_counts(&self) -> &BTreeMap<PathBuf, Counts> {
        &self.file_counts
    }

    /// Files the counting engine could not classify.
    pub fn unrecognized(&self) -> &BTreeSet<PathBuf> {
        &self.unrecognized
    }

    pub fn is_unrecognized(&self, path: &Path) -> bool {
        self.unrecognized.contains(path)
    }

    /// Languages ordered by display name.
    pub fn sorted_languages(&self) -> &[Language] {
        &self.sorted_languages
    }

    /// Every counted file, ordered by path string.
    pub fn sorted_paths(&self) -> &[PathBuf] {
        &self.sorted_paths
    }

    pub fn file_counts_or_zero(&self, path: &Path) -> Counts {
        self.file_counts.get(path).copied().unwrap_or_default()
    }

    pub fn language_counts_or_zero(&self, language: Language) -> Counts {
        self.language_counts
            .get(&language)
            .copied()
            .unwrap_or_default()
    }

    /// The languages of one file with their counts, ordered by display name.
    pub fn sorted_file_languages(&self, path: &Path) -> Vec<(Language, Counts)> {
        let mut languages: Vec<(Language, Counts)> = self
            .path_counts
            .get(path)
            .map(|entries| entries.iter().map(|(&l, &c)| (l, c)).collect())
            .unwrap_or_default();
        languages.sort_by(|(a, _), (b, _)| a.display_name().cmp(b.display_name()));
        languages
    }

    pub fn num_files(&self) -> usize {
        self.path_counts.len()
    }

    pub fn num_languages(&self) -> usize {
        self.languages.len()
    }

    pub fn num_unrecognized(&self) -> usize {
        self.unrecognized.len()
    }
}

impl From<PathCounts> for CountsCache {
    fn from(path_counts: PathCounts) -> Self {
        Self::new(path_counts)
    }
}
