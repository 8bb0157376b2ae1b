//! Standalone HTML report with an embedded stylesheet.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::data::{Counts, CountsCache, Language};

use super::markup::{Attr, Dialect, MarkupWriter};
use super::report::{Destination, LoccReport, ReportContext, ReportFormat};

const STYLESHEET: &[&str] = &[
    "body {",
    "    margin: 40px;",
    "    padding: 0;",
    "    font-family: sans-serif;",
    "}",
    "table {",
    "    border: 1px solid #C3C3C3;",
    "    border-collapse: collapse;",
    "}",
    "td, th {",
    "    border: 1px solid #C3C3C3;",
    "    padding: 5px 15px 5px 15px;",
    "}",
    ".CountCell {",
    "    text-align: right;",
    "}",
    ".TotalCell {",
    "    font-weight: bold;",
    "}",
    ".Unrecognized {",
    "    color: #808080;",
    "}",
    "a:link {",
    "    text-decoration: none;",
    "}",
    "a:visited {",
    "    text-decoration: none;",
    "}",
    "a:hover {",
    "    text-decoration: none;",
    "}",
    "a:active {",
    "    text-decoration: none;",
    "}",
];

const COUNT_HEADERS: [&str; 4] = ["Total Lines", "Code Lines", "Comment Lines", "Blank Lines"];

#[derive(Debug, Clone)]
pub struct HtmlReport {
    destination: Destination,
}

impl HtmlReport {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            destination: Destination::File(path.into()),
        }
    }

    pub fn in_dir(dir: &Path) -> Self {
        Self {
            destination: Destination::in_dir(dir, ReportFormat::Html),
        }
    }
}

type Html<'w> = MarkupWriter<&'w mut dyn Write>;

fn count_values(counts: Counts) -> [u64; 4] {
    [counts.total(), counts.code, counts.comment, counts.blank]
}

fn count_cells(html: &mut Html<'_>, counts: Counts, class: &str) -> io::Result<()> {
    for value in count_values(counts) {
        html.text_element("td", &[Attr::new("class", class)], &value.to_string())?;
    }
    Ok(())
}

fn count_header_cells(html: &mut Html<'_>) -> io::Result<()> {
    for header in COUNT_HEADERS {
        html.text_element("th", &[Attr::new("class", "CountCell")], header)?;
    }
    Ok(())
}

/// Escaped description, linked to the language website when there is one.
fn description_markup(html: &Html<'_>, language: Language) -> String {
    let Some(description) = language.description() else {
        return String::new();
    };
    let description = html.escape_text(description);
    match language.website() {
        Some(website) => format!(
            "<a href=\"{}\">{}</a>",
            html.escape_attribute(website),
            description
        ),
        None => description.into_owned(),
    }
}

fn write_head(html: &mut Html<'_>, ctx: &ReportContext) -> io::Result<()> {
    html.start("head", &[])?;
    html.empty(
        "meta",
        &[
            Attr::new("http-equiv", "Content-Type"),
            Attr::new("content", "text/html; charset=utf-8"),
        ],
    )?;
    html.text_element(
        "title",
        &[],
        &format!("Line Count Report For {}", ctx.project_name),
    )?;
    html.start("style", &[])?;
    for line in STYLESHEET {
        html.raw_line(line)?;
    }
    html.end()?;
    html.end()
}

fn write_summary(html: &mut Html<'_>, cache: &CountsCache, ctx: &ReportContext) -> io::Result<()> {
    let total = cache.total_counts();
    let rows: [(&str, String); 10] = [
        ("Project", ctx.project_name.clone()),
        ("Version", ctx.project_version.clone()),
        ("Report date", ctx.timestamp.clone()),
        ("Number of files", cache.num_files().to_string()),
        ("Number of languages", cache.num_languages().to_string()),
        ("Unrecognized files", cache.num_unrecognized().to_string()),
        ("Total lines", total.total().to_string()),
        ("Code lines", total.code.to_string()),
        ("Comment lines", total.comment.to_string()),
        ("Blank lines", total.blank.to_string()),
    ];

    html.blank_line()?;
    html.text_element("h2", &[], "Summary")?;
    html.start("table", &[])?;
    html.start("tbody", &[])?;
    for (label, value) in &rows {
        html.start("tr", &[])?;
        html.text_element("td", &[], label)?;
        html.text_element("td", &[], value)?;
        html.end()?;
    }
    html.end()?;
    html.end()
}

fn write_languages(html: &mut Html<'_>, cache: &CountsCache) -> io::Result<()> {
    html.blank_line()?;
    html.text_element("h2", &[], "Line Count by Language")?;
    html.start("table", &[])?;

    html.start("thead", &[])?;
    html.start("tr", &[])?;
    html.text_element("th", &[], "Name")?;
    html.text_element("th", &[], "Description")?;
    count_header_cells(html)?;
    html.end()?;
    html.end()?;

    html.start("tbody", &[])?;
    for &language in cache.sorted_languages() {
        html.start("tr", &[])?;
        html.text_element("td", &[], language.display_name())?;
        let description = description_markup(html, language);
        html.raw_element("td", &[], &description)?;
        count_cells(html, cache.language_counts_or_zero(language), "CountCell")?;
        html.end()?;
    }

    html.start("tr", &[])?;
    html.text_element("td", &[Attr::new("class", "TotalCell")], "Total")?;
    html.text_element("td", &[], "")?;
    count_cells(html, cache.total_counts(), "TotalCell CountCell")?;
    html.end()?;
    html.end()?;

    html.end()
}

fn write_files(html: &mut Html<'_>, cache: &CountsCache, ctx: &ReportContext) -> io::Result<()> {
    html.blank_line()?;
    html.text_element("h2", &[], "Line Count by File")?;
    html.start("table", &[])?;

    html.start("thead", &[])?;
    html.start("tr", &[])?;
    html.text_element("th", &[], "Pathname")?;
    count_header_cells(html)?;
    html.text_element("th", &[], "Languages")?;
    html.end()?;
    html.end()?;

    html.start("tbody", &[])?;
    for path in cache.sorted_paths() {
        let class = cache.is_unrecognized(path).then_some("Unrecognized");
        let names: Vec<&str> = cache
            .sorted_file_languages(path)
            .iter()
            .map(|(language, _)| language.display_name())
            .collect();

        html.start("tr", &[Attr::opt("class", class)])?;
        html.text_element("td", &[], &ctx.display_path(path))?;
        count_cells(html, cache.file_counts_or_zero(path), "CountCell")?;
        html.text_element("td", &[], &names.join(", "))?;
        html.end()?;
    }

    html.start("tr", &[])?;
    html.text_element("td", &[Attr::new("class", "TotalCell")], "Total")?;
    count_cells(html, cache.total_counts(), "TotalCell CountCell")?;
    html.text_element("td", &[], "")?;
    html.end()?;
    html.end()?;

    html.end()
}

impl LoccReport for HtmlReport {
    fn format(&self) -> ReportFormat {
        ReportFormat::Html
    }

    fn destination(&self) -> &Destination {
        &self.destination
    }

    fn render(&self, cache: &CountsCache, ctx: &ReportContext, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "<!DOCTYPE html>")?;
        let mut html = MarkupWriter::new(out, Dialect::Html);

        html.start("html", &[Attr::new("lang", "en")])?;
        write_head(&mut html, ctx)?;
        html.start("body", &[])?;
        html.text_element(
            "h1",
            &[],
            &format!("Line Count Report For {}", ctx.project_name),
        )?;
        write_summary(&mut html, cache, ctx)?;
        write_languages(&mut html, cache)?;
        write_files(&mut html, cache, ctx)?;
        html.end()?;
        html.end()
    }
}
