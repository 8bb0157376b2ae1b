//! # locclib
//!
//! A lines of code counter library that aggregates code, comment and blank
//! line counts per file and per language, and renders them as reports.
//!
//! ## Overview
//!
//! The pipeline has three stages:
//!
//! - **Source**: discover files to count, with include/exclude globs
//! - **Data**: count lines per file and language (`PathCounts`), then derive
//!   every aggregate view once in a `CountsCache`
//! - **Output**: render the cache as console, text, CSV, JSON, XML, YAML or
//!   HTML reports
//!
//! Lines are classified per language as:
//!
//! - **Code**: lines with at least one code token
//! - **Comment**: lines holding only comment text (and doc strings, when counted)
//! - **Blank**: whitespace-only lines
//!
//! A file whose language cannot be determined is *unrecognized*: it is listed
//! in the reports but contributes no lines.
//!
//! ## Example
//!
//! ```rust
//! use locclib::{count_files, CountOptions, CountsCache, Language};
//! use std::fs;
//! use tempfile::tempdir;
//!
//! let dir = tempdir().unwrap();
//! let cpp = dir.path().join("main.cpp");
//! let other = dir.path().join("data.bin");
//! fs::write(&cpp, "// entry\nint main() {\n\n    return 0;\n}\n").unwrap();
//! fs::write(&other, "????").unwrap();
//!
//! let path_counts = count_files(&[cpp, other.clone()], CountOptions::new()).unwrap();
//! let cache = CountsCache::new(path_counts);
//!
//! assert_eq!(cache.total_counts().code, 3);
//! assert_eq!(cache.total_counts().comment, 1);
//! assert_eq!(cache.total_counts().blank, 1);
//! assert!(cache.languages().contains(&Language::Cpp));
//! assert!(cache.unrecognized().contains(&other));
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod output;
pub mod source;

pub use config::{LoccConfig, CONFIG_FILE_NAME};
pub use data::{
    count_files, CountOptions, Counts, CountsCache, FileCounter, Language, LanguageRegistry,
    LineCounter, PathCounts,
};
pub use error::LoccError;
pub use output::{
    Destination, LoccReport, ReportContext, ReportFormat, ReportOutcome, Reports,
};
pub use source::{discover_files, discover_files_in_dirs, FilterConfig};

/// Result type for locclib operations
pub type Result<T> = std::result::Result<T, LoccError>;
