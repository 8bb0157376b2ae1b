//! The set of reports enabled for a run.

use std::path::Path;

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::data::CountsCache;
use crate::Result;

use super::console::ConsoleReport;
use super::csv::CsvReport;
use super::html::HtmlReport;
use super::json::JsonReport;
use super::report::{Destination, LoccReport, ReportContext, ReportFormat};
use super::text::TextReport;
use super::xml::XmlReport;
use super::yaml::YamlReport;

/// Create the report for `format`, writing into `dir`.
pub fn report_for(format: ReportFormat, dir: &Path) -> Box<dyn LoccReport> {
    match format {
        ReportFormat::Console => Box::new(ConsoleReport::new()),
        ReportFormat::Text => Box::new(TextReport::in_dir(dir)),
        ReportFormat::Csv => Box::new(CsvReport::in_dir(dir)),
        ReportFormat::Json => Box::new(JsonReport::in_dir(dir)),
        ReportFormat::Xml => Box::new(XmlReport::in_dir(dir)),
        ReportFormat::Yaml => Box::new(YamlReport::in_dir(dir)),
        ReportFormat::Html => Box::new(HtmlReport::in_dir(dir)),
    }
}

/// Result of generating one report.
#[derive(Debug)]
pub struct ReportOutcome {
    pub format: ReportFormat,
    pub destination: Destination,
    pub result: Result<()>,
}

impl ReportOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Enabled reports, generated together against one cache.
pub struct Reports {
    reports: Vec<Box<dyn LoccReport>>,
}

impl Reports {
    /// Reports for `formats` (duplicates ignored) writing into `dir`.
    pub fn new(dir: &Path, formats: &[ReportFormat]) -> Self {
        let mut formats = formats.to_vec();
        formats.sort();
        formats.dedup();
        Self {
            reports: formats.into_iter().map(|f| report_for(f, dir)).collect(),
        }
    }

    /// The default-enabled reports (XML and HTML).
    pub fn defaults(dir: &Path) -> Self {
        Self::new(dir, &ReportFormat::defaults())
    }

    pub fn from_reports(reports: Vec<Box<dyn LoccReport>>) -> Self {
        Self { reports }
    }

    pub fn formats(&self) -> Vec<ReportFormat> {
        self.reports.iter().map(|r| r.format()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    /// Generate every report concurrently. A failing report does not stop the
    /// others; outcomes come back in format order.
    pub fn generate(&self, cache: &CountsCache, ctx: &ReportContext) -> Vec<ReportOutcome> {
        debug!(reports = self.reports.len(), "generating reports");
        self.reports
            .par_iter()
            .map(|report| {
                let result = report.generate_report(cache, ctx);
                if let Err(err) = &result {
                    warn!(format = %report.format(), error = %err, "report failed");
                }
                ReportOutcome {
                    format: report.format(),
                    destination: report.destination().clone(),
                    result,
                }
            })
            .collect()
    }
}
