//! Language summary table written to the terminal.

use std::io::{self, Write};

use crate::data::CountsCache;

use super::report::{Destination, LoccReport, ReportContext, ReportFormat};
use super::table::LocTable;

const COLUMN_SEPARATOR: &str = "    ";

/// Console report: a dash-bordered table of line counts per language.
#[derive(Debug, Clone)]
pub struct ConsoleReport {
    destination: Destination,
}

impl Default for ConsoleReport {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleReport {
    pub fn new() -> Self {
        Self {
            destination: Destination::Console,
        }
    }
}

/// Column widths: the longest of the header and every value. The footer's
/// blank file cell does not widen its column.
fn column_widths(table: &LocTable) -> Vec<usize> {
    let mut widths: Vec<usize> = table.headers.iter().map(String::len).collect();
    let rows = table.rows.iter().chain(std::iter::once(&table.footer));
    for row in rows {
        widths[0] = widths[0].max(row.label.len());
        for (width, value) in widths[1..].iter_mut().zip(&row.values) {
            *width = (*width).max(value.len());
        }
    }
    widths
}

/// Format the table exactly as it appears on the console.
pub fn format_table(table: &LocTable) -> String {
    let widths = column_widths(table);
    let total_width =
        widths.iter().sum::<usize>() + COLUMN_SEPARATOR.len() * (widths.len() - 1);
    let divider = "-".repeat(total_width);

    let mut text = String::new();
    text.push_str(&divider);
    text.push('\n');

    // Headers are left aligned; the last one is not padded.
    let last = table.headers.len() - 1;
    let header: Vec<String> = table
        .headers
        .iter()
        .zip(&widths)
        .enumerate()
        .map(|(idx, (h, &w))| {
            if idx == last {
                h.clone()
            } else {
                format!("{h:<w$}")
            }
        })
        .collect();
    text.push_str(&header.join(COLUMN_SEPARATOR));
    text.push('\n');
    text.push_str(&divider);
    text.push('\n');

    let format_row = |label: &str, values: &[String]| {
        let mut cells = vec![format!("{label:<w$}", w = widths[0])];
        cells.extend(
            values
                .iter()
                .zip(&widths[1..])
                .map(|(v, &w)| format!("{v:>w$}")),
        );
        cells.join(COLUMN_SEPARATOR)
    };

    for row in &table.rows {
        text.push_str(&format_row(&row.label, &row.values));
        text.push('\n');
    }

    text.push_str(&divider);
    text.push('\n');
    text.push_str(&format_row(&table.footer.label, &table.footer.values));
    text.push('\n');
    text.push_str(&divider);
    text.push('\n');
    text
}

impl LoccReport for ConsoleReport {
    fn format(&self) -> ReportFormat {
        ReportFormat::Console
    }

    fn destination(&self) -> &Destination {
        &self.destination
    }

    fn render(&self, cache: &CountsCache, _ctx: &ReportContext, out: &mut dyn Write) -> io::Result<()> {
        let table = LocTable::from_cache(cache);
        out.write_all(format_table(&table).as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Counts, Language, PathCounts};
    use crate::output::testing::{render_to_string, sample_cache, sample_context};
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::path::PathBuf;

    #[test]
    fn test_console_table() {
        let out = render_to_string(&ConsoleReport::new(), &sample_cache(), &sample_context());
        let expected = "\
---------------------------------------------
Language    Files    Blank    Comment    Code
---------------------------------------------
C++             1        3          5      12
Java            1        0          0       8
---------------------------------------------
Total                    3          5      20
---------------------------------------------
";
        assert_eq!(out, expected);
    }

    #[test]
    fn test_console_widths_grow_with_values() {
        let mut path_counts = PathCounts::new();
        path_counts.insert(
            PathBuf::from("a.js"),
            HashMap::from([(Language::JavaScript, Counts::new(123456, 1, 2))]),
        );
        let cache = CountsCache::new(path_counts);
        let out = render_to_string(&ConsoleReport::new(), &cache, &sample_context());
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[1], "Language      Files    Blank    Comment    Code");
        assert_eq!(lines[3], "JavaScript        1        2          1    123456");
        assert_eq!(lines[5], "Total                      2          1    123456");
        assert_eq!(lines[0].len(), 10 + 5 + 5 + 7 + 6 + 16);
    }

    #[test]
    fn test_console_empty_cache() {
        let out = render_to_string(
            &ConsoleReport::new(),
            &CountsCache::default(),
            &sample_context(),
        );
        assert_eq!(out.lines().count(), 6);
        assert!(out.contains("Total                    0          0       0"));
    }
}
