//! Comma separated values report: one row per language plus an `ALL` row.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::data::{Counts, CountsCache};

use super::escape::csv_escape;
use super::report::{Destination, LoccReport, ReportContext, ReportFormat};

const LINE_END: &str = "\r\n";

const HEADER: [&str; 7] = [
    "ID",
    "Name",
    "Description",
    "Total Lines",
    "Code Lines",
    "Comment Lines",
    "Blank Lines",
];

#[derive(Debug, Clone)]
pub struct CsvReport {
    destination: Destination,
}

impl CsvReport {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            destination: Destination::File(path.into()),
        }
    }

    pub fn in_dir(dir: &Path) -> Self {
        Self {
            destination: Destination::in_dir(dir, ReportFormat::Csv),
        }
    }
}

fn write_row(
    out: &mut dyn Write,
    id: &str,
    name: &str,
    description: Option<&str>,
    counts: Counts,
) -> io::Result<()> {
    write!(
        out,
        "{},{},{},{},{},{},{}{LINE_END}",
        csv_escape(Some(id)),
        csv_escape(Some(name)),
        csv_escape(description),
        counts.total(),
        counts.code,
        counts.comment,
        counts.blank
    )
}

impl LoccReport for CsvReport {
    fn format(&self) -> ReportFormat {
        ReportFormat::Csv
    }

    fn destination(&self) -> &Destination {
        &self.destination
    }

    fn render(&self, cache: &CountsCache, _ctx: &ReportContext, out: &mut dyn Write) -> io::Result<()> {
        write!(out, "{}{LINE_END}", HEADER.join(","))?;
        write_row(out, "ALL", "All", Some("All languages"), cache.total_counts())?;
        for &language in cache.sorted_languages() {
            write_row(
                out,
                language.name(),
                language.display_name(),
                language.description(),
                cache.language_counts_or_zero(language),
            )?;
        }
        Ok(())
    }
}
