//! Source discovery: find files to analyze.
//!
//! This module handles the first stage of the pipeline: discovering what
//! files to count, with include/exclude glob patterns.
//!
//! ## Example
//!
//! ```rust,ignore
//! use locclib::source::{discover_files, FilterConfig};
//!
//! let filter = FilterConfig::new().exclude("**/generated/**")?;
//! let files = discover_files(".", &filter)?;
//! ```

pub mod filter;

pub use filter::{discover_files, discover_files_in_dirs, FilterConfig};
