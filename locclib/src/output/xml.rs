//! Namespaced XML report.
//!
//! Everything is carried in attributes. The root `<locc>` element holds the run
//! metadata and totals, `<languages>` lists each language with its full
//! metadata, and `<files>` lists each file with references to its languages.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::data::{Counts, CountsCache};

use super::markup::{Attr, Dialect, MarkupWriter};
use super::report::{Destination, LoccReport, ReportContext, ReportFormat, FORMAT_VERSION};

pub const NAMESPACE: &str = "https://www.cthing.com/locc-1";
pub const SCHEMA_LOCATION: &str = "https://www.cthing.com/schemas/locc-1.xsd";
const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

#[derive(Debug, Clone)]
pub struct XmlReport {
    destination: Destination,
}

impl XmlReport {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            destination: Destination::File(path.into()),
        }
    }

    pub fn in_dir(dir: &Path) -> Self {
        Self {
            destination: Destination::in_dir(dir, ReportFormat::Xml),
        }
    }
}

fn count_attrs<'a>(counts: Counts) -> [Attr<'a>; 4] {
    [
        Attr::num("totalLines", counts.total()),
        Attr::num("codeLines", counts.code),
        Attr::num("commentLines", counts.comment),
        Attr::num("blankLines", counts.blank),
    ]
}

impl LoccReport for XmlReport {
    fn format(&self) -> ReportFormat {
        ReportFormat::Xml
    }

    fn destination(&self) -> &Destination {
        &self.destination
    }

    fn render(&self, cache: &CountsCache, ctx: &ReportContext, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        let mut xml = MarkupWriter::new(out, Dialect::Xml);

        let schema_location = format!("{NAMESPACE} {SCHEMA_LOCATION}");
        let mut root = vec![
            Attr::new("xmlns", NAMESPACE),
            Attr::new("xmlns:xsi", XSI_NAMESPACE),
            Attr::new("xsi:schemaLocation", schema_location.as_str()),
            Attr::num("formatVersion", FORMAT_VERSION),
            Attr::new("date", ctx.timestamp.as_str()),
            Attr::new("projectName", ctx.project_name.as_str()),
            Attr::new("projectVersion", ctx.project_version.as_str()),
            Attr::num("numFiles", cache.num_files()),
            Attr::num("numUnrecognized", cache.num_unrecognized()),
            Attr::num("numLanguages", cache.num_languages()),
        ];
        root.extend(count_attrs(cache.total_counts()));
        xml.start("locc", &root)?;

        xml.start("languages", &[])?;
        for &language in cache.sorted_languages() {
            let mut attrs = vec![
                Attr::new("name", language.name()),
                Attr::new("displayName", language.display_name()),
                Attr::opt("description", language.description()),
                Attr::opt("website", language.website()),
            ];
            attrs.extend(count_attrs(cache.language_counts_or_zero(language)));
            xml.empty("language", &attrs)?;
        }
        xml.end()?;

        xml.start("files", &[])?;
        for path in cache.sorted_paths() {
            let file_languages = cache.sorted_file_languages(path);
            let unrecognized = cache.is_unrecognized(path);
            let pathname = ctx.display_path(path);

            let mut attrs = vec![
                Attr::new("pathname", pathname.as_str()),
                Attr::num("numLanguages", file_languages.len()),
                Attr::opt("unrecognized", unrecognized.then_some("true")),
            ];
            attrs.extend(count_attrs(cache.file_counts_or_zero(path)));

            if unrecognized {
                xml.empty("file", &attrs)?;
                continue;
            }

            xml.start("file", &attrs)?;
            for (language, counts) in file_languages {
                let mut language_attrs = vec![Attr::new("name", language.name())];
                language_attrs.extend(count_attrs(counts));
                xml.empty("language", &language_attrs)?;
            }
            xml.end()?;
        }
        xml.end()?;

        xml.end()
    }
}
