//! Output formatting for score reports

pub mod report;
pub mod formatter;

pub use formatter::{
    ConsoleFormatter, JsonFormatter, MarkdownFormatter, OutputFormatter, ReportGenerator,
};
pub use report::ScoreReport;
