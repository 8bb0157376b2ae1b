//! JSON report, serialized from borrowed view structs.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::data::{Counts, CountsCache};

use super::report::{Destination, LoccReport, ReportContext, ReportFormat, FORMAT_VERSION};

#[derive(Debug, Clone)]
pub struct JsonReport {
    destination: Destination,
}

impl JsonReport {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            destination: Destination::File(path.into()),
        }
    }

    pub fn in_dir(dir: &Path) -> Self {
        Self {
            destination: Destination::in_dir(dir, ReportFormat::Json),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CountsView {
    total_lines: u64,
    code_lines: u64,
    comment_lines: u64,
    blank_lines: u64,
}

impl From<Counts> for CountsView {
    fn from(counts: Counts) -> Self {
        Self {
            total_lines: counts.total(),
            code_lines: counts.code,
            comment_lines: counts.comment,
            blank_lines: counts.blank,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LanguageView {
    name: &'static str,
    display_name: &'static str,
    description: Option<&'static str>,
    website: Option<&'static str>,
    #[serde(flatten)]
    counts: CountsView,
}

#[derive(Serialize)]
struct FileLanguageView {
    name: &'static str,
    #[serde(flatten)]
    counts: CountsView,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FileView {
    pathname: String,
    num_languages: usize,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    unrecognized: bool,
    #[serde(flatten)]
    counts: CountsView,
    #[serde(skip_serializing_if = "Option::is_none")]
    languages: Option<Vec<FileLanguageView>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReportView<'a> {
    format_version: u32,
    date: &'a str,
    project_name: &'a str,
    project_version: &'a str,
    num_files: usize,
    num_unrecognized: usize,
    num_languages: usize,
    #[serde(flatten)]
    counts: CountsView,
    languages: Vec<LanguageView>,
    files: Vec<FileView>,
}

fn build_view<'a>(cache: &CountsCache, ctx: &'a ReportContext) -> ReportView<'a> {
    let languages = cache
        .sorted_languages()
        .iter()
        .map(|&language| LanguageView {
            name: language.name(),
            display_name: language.display_name(),
            description: language.description(),
            website: language.website(),
            counts: cache.language_counts_or_zero(language).into(),
        })
        .collect();

    let files = cache
        .sorted_paths()
        .iter()
        .map(|path| {
            let file_languages = cache.sorted_file_languages(path);
            let unrecognized = cache.is_unrecognized(path);
            FileView {
                pathname: ctx.display_path(path),
                num_languages: file_languages.len(),
                unrecognized,
                counts: cache.file_counts_or_zero(path).into(),
                languages: (!unrecognized).then(|| {
                    file_languages
                        .into_iter()
                        .map(|(language, counts)| FileLanguageView {
                            name: language.name(),
                            counts: counts.into(),
                        })
                        .collect()
                }),
            }
        })
        .collect();

    ReportView {
        format_version: FORMAT_VERSION,
        date: &ctx.timestamp,
        project_name: &ctx.project_name,
        project_version: &ctx.project_version,
        num_files: cache.num_files(),
        num_unrecognized: cache.num_unrecognized(),
        num_languages: cache.num_languages(),
        counts: cache.total_counts().into(),
        languages,
        files,
    }
}

impl LoccReport for JsonReport {
    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }

    fn destination(&self) -> &Destination {
        &self.destination
    }

    fn render(&self, cache: &CountsCache, ctx: &ReportContext, out: &mut dyn Write) -> io::Result<()> {
        let view = build_view(cache, ctx);
        serde_json::to_writer_pretty(&mut *out, &view)?;
        writeln!(out)
    }
}
