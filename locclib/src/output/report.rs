//! The renderer seam shared by every report format.

use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::Local;
use console::Term;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::data::CountsCache;
use crate::error::LoccError;
use crate::Result;

/// Base name of every report file.
pub const REPORT_BASE_NAME: &str = "locc";

/// Version of the structured report layouts (JSON, XML, YAML).
pub const FORMAT_VERSION: u32 = 1;

/// Report output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Console,
    Text,
    Csv,
    Json,
    Xml,
    Yaml,
    Html,
}

impl ReportFormat {
    pub const ALL: [ReportFormat; 7] = [
        ReportFormat::Console,
        ReportFormat::Text,
        ReportFormat::Csv,
        ReportFormat::Json,
        ReportFormat::Xml,
        ReportFormat::Yaml,
        ReportFormat::Html,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ReportFormat::Console => "console",
            ReportFormat::Text => "text",
            ReportFormat::Csv => "csv",
            ReportFormat::Json => "json",
            ReportFormat::Xml => "xml",
            ReportFormat::Yaml => "yaml",
            ReportFormat::Html => "html",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ReportFormat::Console => "Report to console",
            ReportFormat::Text => "Report in text format",
            ReportFormat::Csv => "Report in CSV format",
            ReportFormat::Json => "Report in JSON format",
            ReportFormat::Xml => "Report in XML format",
            ReportFormat::Yaml => "Report in YAML format",
            ReportFormat::Html => "Report in HTML format",
        }
    }

    /// File extension of the report, `None` for the console.
    pub fn extension(self) -> Option<&'static str> {
        match self {
            ReportFormat::Console => None,
            ReportFormat::Text => Some("txt"),
            other => Some(other.name()),
        }
    }

    /// Report file name, e.g. `locc.xml`.
    pub fn file_name(self) -> Option<String> {
        self.extension()
            .map(|ext| format!("{REPORT_BASE_NAME}.{ext}"))
    }

    pub fn enabled_by_default(self) -> bool {
        matches!(self, ReportFormat::Xml | ReportFormat::Html)
    }

    /// The formats generated when none are configured.
    pub fn defaults() -> Vec<ReportFormat> {
        Self::ALL
            .into_iter()
            .filter(|f| f.enabled_by_default())
            .collect()
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        match lower.as_str() {
            "txt" => Ok(ReportFormat::Text),
            "yml" => Ok(ReportFormat::Yaml),
            _ => Self::ALL
                .into_iter()
                .find(|f| f.name() == lower)
                .ok_or_else(|| {
                    let known: Vec<&str> = Self::ALL.iter().map(|f| f.name()).collect();
                    format!("unknown report format '{s}' (expected one of: {})", known.join(", "))
                }),
        }
    }
}

/// Where a report is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Console,
    File(PathBuf),
}

impl Destination {
    /// The file destination of `format` inside `dir`.
    pub fn in_dir(dir: &Path, format: ReportFormat) -> Self {
        match format.file_name() {
            Some(name) => Destination::File(dir.join(name)),
            None => Destination::Console,
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Console => f.write_str("console"),
            Destination::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Current local time as `YYYY-MM-DDTHH:MM:SS±HH:MM`.
pub fn timestamp() -> String {
    Local::now().format("%Y-%m-%dT%H:%M:%S%:z").to_string()
}

/// Run metadata shared by every report of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportContext {
    pub project_name: String,
    pub project_version: String,
    /// Directory paths are shown relative to
    pub root: PathBuf,
    /// Generation time, see [`timestamp`]
    pub timestamp: String,
    /// Show paths under `root` relative to it
    pub relative_paths: bool,
}

impl ReportContext {
    pub fn new(
        project_name: impl Into<String>,
        project_version: impl Into<String>,
        root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            project_name: project_name.into(),
            project_version: project_version.into(),
            root: root.into(),
            timestamp: timestamp(),
            relative_paths: true,
        }
    }

    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = timestamp.into();
        self
    }

    pub fn relative_paths(mut self, relative: bool) -> Self {
        self.relative_paths = relative;
        self
    }

    /// How `path` appears in reports.
    pub fn display_path(&self, path: &Path) -> String {
        let shown = if self.relative_paths {
            path.strip_prefix(&self.root).unwrap_or(path)
        } else {
            path
        };
        shown.to_string_lossy().into_owned()
    }
}

/// A line count report in one format.
pub trait LoccReport: Send + Sync {
    fn format(&self) -> ReportFormat;

    fn destination(&self) -> &Destination;

    /// Write the complete report to `out`.
    fn render(&self, cache: &CountsCache, ctx: &ReportContext, out: &mut dyn Write) -> io::Result<()>;

    /// Render the report to its destination, replacing any previous content.
    fn generate_report(&self, cache: &CountsCache, ctx: &ReportContext) -> Result<()> {
        let destination = self.destination();
        let failed = |source: io::Error| LoccError::Report {
            format: self.format(),
            destination: destination.to_string(),
            source,
        };

        debug!(format = %self.format(), %destination, "generating report");
        match destination {
            Destination::Console => {
                let mut buffer = Vec::new();
                self.render(cache, ctx, &mut buffer).map_err(failed)?;
                Term::stdout().write_all(&buffer).map_err(failed)?;
            }
            Destination::File(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    fs::create_dir_all(parent).map_err(failed)?;
                }
                let file = File::create(path).map_err(failed)?;
                let mut writer = BufWriter::new(file);
                self.render(cache, ctx, &mut writer).map_err(failed)?;
                writer.flush().map_err(failed)?;
                info!(format = %self.format(), path = %path.display(), "wrote report");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_names_and_files() {
        assert_eq!(ReportFormat::Text.file_name().as_deref(), Some("locc.txt"));
        assert_eq!(ReportFormat::Yaml.file_name().as_deref(), Some("locc.yaml"));
        assert_eq!(ReportFormat::Console.file_name(), None);
        assert_eq!(ReportFormat::Csv.to_string(), "csv");
        assert_eq!(
            ReportFormat::defaults(),
            vec![ReportFormat::Xml, ReportFormat::Html]
        );
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("HTML".parse::<ReportFormat>(), Ok(ReportFormat::Html));
        assert_eq!("txt".parse::<ReportFormat>(), Ok(ReportFormat::Text));
        assert_eq!(" yml ".parse::<ReportFormat>(), Ok(ReportFormat::Yaml));
        assert!("pdf".parse::<ReportFormat>().is_err());
        for format in ReportFormat::ALL {
            assert_eq!(format.name().parse::<ReportFormat>(), Ok(format));
        }
    }

    #[test]
    fn test_destination_in_dir() {
        let dir = Path::new("build/reports/locc");
        assert_eq!(
            Destination::in_dir(dir, ReportFormat::Json),
            Destination::File(dir.join("locc.json"))
        );
        assert_eq!(
            Destination::in_dir(dir, ReportFormat::Console),
            Destination::Console
        );
    }

    #[test]
    fn test_display_path() {
        let ctx = ReportContext::new("demo", "1.0", "/project");
        assert_eq!(
            ctx.display_path(Path::new("/project/src/main.c")),
            Path::new("src/main.c").to_string_lossy()
        );
        assert_eq!(ctx.display_path(Path::new("/elsewhere/a.c")), "/elsewhere/a.c");
        assert_eq!(ctx.display_path(Path::new("rel/a.c")), "rel/a.c");

        let absolute = ctx.clone().relative_paths(false);
        assert_eq!(
            absolute.display_path(Path::new("/project/src/main.c")),
            "/project/src/main.c"
        );
    }

    #[test]
    fn test_timestamp_shape() {
        let ts = timestamp();
        assert_eq!(ts.len(), "2024-01-02T03:04:05+00:00".len());
        assert_eq!(&ts[10..11], "T");
        assert!(matches!(&ts[19..20], "+" | "-"));
    }
}
