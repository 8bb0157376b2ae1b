//! Data collection: count files and aggregate the results.
//!
//! This module handles the second stage of the pipeline, from a list of files
//! to the views the reports render. It provides:
//!
//! - **Counts**: the `{code, comment, blank}` value type (`Counts`)
//! - **Languages**: the language table and the per-run `LanguageRegistry`
//! - **Counting**: line classification and the `LineCounter` seam (`FileCounter`)
//! - **Aggregation**: `CountsCache`, every derived view computed once
//!
//! ## Example
//!
//! ```rust,ignore
//! use locclib::data::{CountsCache, FileCounter, LineCounter};
//!
//! let path_counts = FileCounter::default().count(&files)?;
//! let cache = CountsCache::new(path_counts);
//! println!("Total code lines: {}", cache.total_counts().code);
//! ```

pub mod cache;
pub mod counter;
pub mod counts;
pub mod language;
pub mod visitor;

pub use cache::CountsCache;
pub use counter::{count_files, CountOptions, FileCounter, LineCounter, PathCounts};
pub use counts::Counts;
pub use language::{Language, LanguageInfo, LanguageRegistry};
pub use visitor::{count_path, count_str, LineVisitor, Syntax};
