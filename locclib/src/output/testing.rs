//! Shared fixtures for renderer tests.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::data::{Counts, CountsCache, Language, PathCounts};

use super::{LoccReport, ReportContext};

pub const TIMESTAMP: &str = "2024-01-02T03:04:05-05:00";

/// One C++ file, one Java file and one unrecognized file under `/project`.
pub fn sample_path_counts() -> PathCounts {
    let mut path_counts = PathCounts::new();
    path_counts.insert(
        PathBuf::from("/project/src/file1.cpp"),
        HashMap::from([(Language::Cpp, Counts::new(12, 5, 3))]),
    );
    path_counts.insert(
        PathBuf::from("/project/src/file2.java"),
        HashMap::from([(Language::Java, Counts::new(8, 0, 0))]),
    );
    path_counts.insert(PathBuf::from("/project/src/file3.foo"), HashMap::new());
    path_counts
}

pub fn sample_cache() -> CountsCache {
    CountsCache::new(sample_path_counts())
}

pub fn sample_context() -> ReportContext {
    ReportContext::new("demo", "1.2.0", "/project").with_timestamp(TIMESTAMP)
}

/// Render a report into a string.
pub fn render_to_string(report: &dyn LoccReport, cache: &CountsCache, ctx: &ReportContext) -> String {
    let mut out = Vec::new();
    report.render(cache, ctx, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}
