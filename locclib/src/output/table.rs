//! Table-ready data for the console report.
//!
//! `LocTable` is a pure presentation layer: it turns the cache's language view
//! into display strings. Layout (widths, alignment, borders) belongs to the
//! console renderer.

use serde::{Deserialize, Serialize};

use crate::data::{Counts, CountsCache};

/// A single row in the table (data row or footer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    /// Row label (language display name or "Total")
    pub label: String,
    /// Values for each column after the label, ready for display
    pub values: Vec<String>,
}

/// Table-ready line counts by language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocTable {
    /// Column headers: [label_header, Files, Blank, Comment, Code]
    pub headers: Vec<String>,
    /// One row per language, ordered by display name
    pub rows: Vec<TableRow>,
    /// Totals row; its file cell is empty
    pub footer: TableRow,
}

fn format_counts(files: String, counts: Counts) -> Vec<String> {
    vec![
        files,
        counts.blank.to_string(),
        counts.comment.to_string(),
        counts.code.to_string(),
    ]
}

impl LocTable {
    pub fn from_cache(cache: &CountsCache) -> Self {
        let headers = ["Language", "Files", "Blank", "Comment", "Code"]
            .into_iter()
            .map(String::from)
            .collect();

        let rows = cache
            .sorted_languages()
            .iter()
            .map(|&language| {
                let files = cache
                    .language_paths()
                    .get(&language)
                    .map_or(0, |paths| paths.len());
                TableRow {
                    label: language.display_name().to_string(),
                    values: format_counts(files.to_string(), cache.language_counts_or_zero(language)),
                }
            })
            .collect();

        let footer = TableRow {
            label: "Total".to_string(),
            values: format_counts(String::new(), cache.total_counts()),
        };

        LocTable {
            headers,
            rows,
            footer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::testing::sample_cache;

    #[test]
    fn test_table_from_cache() {
        let table = LocTable::from_cache(&sample_cache());

        assert_eq!(
            table.headers,
            vec!["Language", "Files", "Blank", "Comment", "Code"]
        );
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].label, "C++");
        assert_eq!(table.rows[0].values, vec!["1", "3", "5", "12"]);
        assert_eq!(table.rows[1].label, "Java");
        assert_eq!(table.rows[1].values, vec!["1", "0", "0", "8"]);
        assert_eq!(table.footer.label, "Total");
        assert_eq!(table.footer.values, vec!["", "3", "5", "20"]);
    }

    #[test]
    fn test_table_serializes() {
        let table = LocTable::from_cache(&sample_cache());
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json["footer"]["label"], "Total");
        assert_eq!(json["rows"][0]["values"][3], "12");
    }
}
