//! Output: render the aggregated counts as reports.
//!
//! This module handles the final stage of the pipeline. Every format
//! implements [`LoccReport`] and reads the same [`CountsCache`](crate::data::CountsCache)
//! views; none of them mutate shared state, so [`Reports`] runs them in
//! parallel.
//!
//! | Format  | Destination   | Default |
//! |---------|---------------|---------|
//! | console | stdout        | no      |
//! | text    | `locc.txt`    | no      |
//! | csv     | `locc.csv`    | no      |
//! | json    | `locc.json`   | no      |
//! | xml     | `locc.xml`    | yes     |
//! | yaml    | `locc.yaml`   | no      |
//! | html    | `locc.html`   | yes     |
//!
//! ## Example
//!
//! ```rust,ignore
//! use locclib::output::{ReportContext, ReportFormat, Reports};
//!
//! let ctx = ReportContext::new("demo", "1.0.0", root);
//! let reports = Reports::new(&out_dir, &[ReportFormat::Json, ReportFormat::Html]);
//! for outcome in reports.generate(&cache, &ctx) {
//!     println!("{}: {:?}", outcome.format, outcome.result);
//! }
//! ```

pub mod console;
pub mod csv;
pub mod escape;
pub mod html;
pub mod json;
pub mod markup;
pub mod report;
pub mod reports;
pub mod table;
pub mod text;
pub mod xml;
pub mod yaml;

#[cfg(test)]
pub(crate) mod testing;

pub use console::ConsoleReport;
pub use csv::CsvReport;
pub use html::HtmlReport;
pub use json::JsonReport;
pub use report::{
    timestamp, Destination, LoccReport, ReportContext, ReportFormat, FORMAT_VERSION,
    REPORT_BASE_NAME,
};
pub use reports::{report_for, ReportOutcome, Reports};
pub use table::{LocTable, TableRow};
pub use text::TextReport;
pub use xml::XmlReport;
pub use yaml::YamlReport;
