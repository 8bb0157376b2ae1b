//! Plain text report.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::data::{Counts, CountsCache};

use super::report::{Destination, LoccReport, ReportContext, ReportFormat};

/// Line oriented `key: value` report with Languages and Files sections.
#[derive(Debug, Clone)]
pub struct TextReport {
    destination: Destination,
}

impl TextReport {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            destination: Destination::File(path.into()),
        }
    }

    pub fn in_dir(dir: &Path) -> Self {
        Self {
            destination: Destination::in_dir(dir, ReportFormat::Text),
        }
    }
}

fn write_counts(out: &mut dyn Write, counts: Counts) -> io::Result<()> {
    writeln!(
        out,
        "    Lines: {} total, {} code, {} comment, {} blank",
        counts.total(),
        counts.code,
        counts.comment,
        counts.blank
    )
}

impl LoccReport for TextReport {
    fn format(&self) -> ReportFormat {
        ReportFormat::Text
    }

    fn destination(&self) -> &Destination {
        &self.destination
    }

    fn render(&self, cache: &CountsCache, ctx: &ReportContext, out: &mut dyn Write) -> io::Result<()> {
        let total = cache.total_counts();

        writeln!(out, "Line Count Report For {}", ctx.project_name)?;
        writeln!(out, "{}", "-".repeat(80))?;
        writeln!(out, "Date: {}", ctx.timestamp)?;
        writeln!(out, "Project version: {}", ctx.project_version)?;
        writeln!(out, "Number of files: {}", cache.num_files())?;
        writeln!(out, "Number unrecognized files: {}", cache.num_unrecognized())?;
        writeln!(out, "Number of languages: {}", cache.num_languages())?;
        writeln!(out, "Total lines: {}", total.total())?;
        writeln!(out, "Code lines: {}", total.code)?;
        writeln!(out, "Comment lines: {}", total.comment)?;
        writeln!(out, "Blank lines: {}", total.blank)?;

        writeln!(out)?;
        writeln!(out, "Languages")?;
        writeln!(out, "{}", "-".repeat(9))?;
        for &language in cache.sorted_languages() {
            match language.description() {
                Some(description) => writeln!(out, "{}: {}", language.display_name(), description)?,
                None => writeln!(out, "{}", language.display_name())?,
            }
            write_counts(out, cache.language_counts_or_zero(language))?;
            writeln!(out)?;
        }

        writeln!(out, "Files")?;
        writeln!(out, "{}", "-".repeat(5))?;
        for (idx, path) in cache.sorted_paths().iter().enumerate() {
            if idx > 0 {
                writeln!(out)?;
            }
            writeln!(out, "{}", ctx.display_path(path))?;
            write_counts(out, cache.file_counts_or_zero(path))?;

            let languages = cache.sorted_file_languages(path);
            if languages.is_empty() {
                writeln!(out, "    Languages: (unrecognized)")?;
            } else {
                let names: Vec<&str> = languages.iter().map(|(l, _)| l.display_name()).collect();
                writeln!(out, "    Languages: {}", names.join(", "))?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Language, PathCounts};
    use crate::output::testing::{render_to_string, sample_cache, sample_context};
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    #[test]
    fn test_text_report() {
        let report = TextReport::new("locc.txt");
        let out = render_to_string(&report, &sample_cache(), &sample_context());
        let expected = format!(
            "\
Line Count Report For demo
{}
Date: 2024-01-02T03:04:05-05:00
Project version: 1.2.0
Number of files: 3
Number unrecognized files: 1
Number of languages: 2
Total lines: 28
Code lines: 20
Comment lines: 5
Blank lines: 3

Languages
---------
C++: C++ programming language
    Lines: 20 total, 12 code, 5 comment, 3 blank

Java: Java programming language
    Lines: 8 total, 8 code, 0 comment, 0 blank

Files
-----
src/file1.cpp
    Lines: 20 total, 12 code, 5 comment, 3 blank
    Languages: C++

src/file2.java
    Lines: 8 total, 8 code, 0 comment, 0 blank
    Languages: Java

src/file3.foo
    Lines: 0 total, 0 code, 0 comment, 0 blank
    Languages: (unrecognized)
",
            "-".repeat(80)
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn test_language_without_description() {
        let mut path_counts = PathCounts::new();
        path_counts.insert(
            "/project/notes.txt".into(),
            HashMap::from([(Language::PlainText, Counts::new(2, 0, 1))]),
        );
        let cache = CountsCache::new(path_counts);
        let out = render_to_string(&TextReport::new("locc.txt"), &cache, &sample_context());

        assert!(out.contains("---------\nPlain Text\n    Lines: 3 total, 2 code, 0 comment, 1 blank\n"));
        assert!(!out.contains("null"));
    }

    #[test]
    fn test_multi_language_file() {
        let mut path_counts = PathCounts::new();
        path_counts.insert(
            "/project/index.html".into(),
            HashMap::from([
                (Language::JavaScript, Counts::new(4, 1, 0)),
                (Language::Html, Counts::new(10, 2, 1)),
                (Language::Css, Counts::new(3, 0, 0)),
            ]),
        );
        let cache = CountsCache::new(path_counts);
        let out = render_to_string(&TextReport::new("locc.txt"), &cache, &sample_context());

        assert!(out.ends_with(
            "index.html\n    Lines: 21 total, 17 code, 3 comment, 1 blank\n    Languages: CSS, HTML, JavaScript\n"
        ));
    }
}
