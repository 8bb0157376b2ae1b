//! YAML report, written with a small key/value emitter.

use std::fmt::{self, Display, Write as _};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::data::{Counts, CountsCache};

use super::escape::yaml_write_escaped;
use super::report::{Destination, LoccReport, ReportContext, ReportFormat, FORMAT_VERSION};

#[derive(Debug, Clone)]
pub struct YamlReport {
    destination: Destination,
}

impl YamlReport {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            destination: Destination::File(path.into()),
        }
    }

    pub fn in_dir(dir: &Path) -> Self {
        Self {
            destination: Destination::in_dir(dir, ReportFormat::Yaml),
        }
    }
}

/// Emits `key: value` lines. `prefix` is written before the key, so list items
/// pass `"  - "` for their first key and `"    "` for the rest.
struct Emitter {
    buf: String,
}

impl Emitter {
    fn line(&mut self, text: &str) -> fmt::Result {
        writeln!(self.buf, "{text}")
    }

    fn string(&mut self, prefix: &str, key: &str, value: &str) -> fmt::Result {
        write!(self.buf, "{prefix}{key}: ")?;
        yaml_write_escaped(&mut self.buf, value)?;
        self.buf.write_char('\n')
    }

    /// Omit the line entirely when there is no value.
    fn opt_string(&mut self, prefix: &str, key: &str, value: Option<&str>) -> fmt::Result {
        match value {
            Some(value) => self.string(prefix, key, value),
            None => Ok(()),
        }
    }

    fn plain(&mut self, prefix: &str, key: &str, value: impl Display) -> fmt::Result {
        writeln!(self.buf, "{prefix}{key}: {value}")
    }

    fn counts(&mut self, indent: &str, counts: Counts) -> fmt::Result {
        self.plain(indent, "totalLines", counts.total())?;
        self.plain(indent, "codeLines", counts.code)?;
        self.plain(indent, "commentLines", counts.comment)?;
        self.plain(indent, "blankLines", counts.blank)
    }
}

fn emit(cache: &CountsCache, ctx: &ReportContext) -> Result<String, fmt::Error> {
    let mut e = Emitter { buf: String::new() };

    e.line("---")?;
    e.plain("", "formatVersion", FORMAT_VERSION)?;
    e.string("", "date", &ctx.timestamp)?;
    e.string("", "projectName", &ctx.project_name)?;
    e.string("", "projectVersion", &ctx.project_version)?;
    e.plain("", "numFiles", cache.num_files())?;
    e.plain("", "numUnrecognized", cache.num_unrecognized())?;
    e.plain("", "numLanguages", cache.num_languages())?;
    e.counts("", cache.total_counts())?;

    if cache.sorted_languages().is_empty() {
        e.line("languages: []")?;
    } else {
        e.line("languages:")?;
    }
    for &language in cache.sorted_languages() {
        e.string("  - ", "name", language.name())?;
        e.string("    ", "displayName", language.display_name())?;
        e.opt_string("    ", "description", language.description())?;
        e.opt_string("    ", "website", language.website())?;
        e.counts("    ", cache.language_counts_or_zero(language))?;
    }

    if cache.sorted_paths().is_empty() {
        e.line("files: []")?;
    } else {
        e.line("files:")?;
    }
    for path in cache.sorted_paths() {
        let file_languages = cache.sorted_file_languages(path);

        e.string("  - ", "pathname", &ctx.display_path(path))?;
        e.plain("    ", "numLanguages", file_languages.len())?;
        if cache.is_unrecognized(path) {
            e.plain("    ", "unrecognized", true)?;
        }
        e.counts("    ", cache.file_counts_or_zero(path))?;

        if file_languages.is_empty() {
            e.line("    languages: []")?;
            continue;
        }
        e.line("    languages:")?;
        for (language, counts) in file_languages {
            e.string("      - ", "name", language.name())?;
            e.counts("        ", counts)?;
        }
    }

    e.line("...")?;
    Ok(e.buf)
}

impl LoccReport for YamlReport {
    fn format(&self) -> ReportFormat {
        ReportFormat::Yaml
    }

    fn destination(&self) -> &Destination {
        &self.destination
    }

    fn render(&self, cache: &CountsCache, ctx: &ReportContext, out: &mut dyn Write) -> io::Result<()> {
        let text = emit(cache, ctx).map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        out.write_all(text.as_bytes())
    }
}
