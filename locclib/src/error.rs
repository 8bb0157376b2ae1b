//! Error types for locclib

use std::path::PathBuf;
use thiserror::Error;

use crate::output::ReportFormat;

/// Errors that can occur while counting lines or generating reports
#[derive(Error, Debug)]
pub enum LoccError {
    /// Failed to read a source file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Invalid glob pattern
    #[error("invalid glob pattern '{pattern}': {message}")]
    InvalidGlob { pattern: String, message: String },

    /// Path does not exist
    #[error("path does not exist: {0}")]
    PathNotFound(PathBuf),

    /// Language identifier or display name not in the registry
    #[error("unknown language: {0}")]
    UnknownLanguage(String),

    /// Configuration file could not be read or parsed
    #[error("invalid configuration '{path}': {message}")]
    Config { path: PathBuf, message: String },

    /// A report could not be written to its destination
    #[error("failed to generate {format} report at '{destination}': {source}")]
    Report {
        format: ReportFormat,
        destination: String,
        source: std::io::Error,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
