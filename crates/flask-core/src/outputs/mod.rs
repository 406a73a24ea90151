use std::fmt;
use std::io::Write;

use flask_parser::Observation;
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod csv_writer;
mod json_writer;
mod markdown_writer;

pub use csv_writer::{platform_terminator, read_csv, CsvOutput};
pub use json_writer::JsonOutput;
pub use markdown_writer::MarkdownOutput;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Csv,
    Json,
    Markdown,
}

impl OutputFormat {
    /// Every format, in the order outputs are written.
    pub const ALL: [OutputFormat; 3] = [OutputFormat::Csv, OutputFormat::Json, OutputFormat::Markdown];

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
            OutputFormat::Markdown => "markdown",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
            OutputFormat::Markdown => "md",
        }
    }

    pub fn writer(&self, pretty_json: bool) -> Box<dyn OutputWriter> {
        match self {
            OutputFormat::Csv => Box::new(CsvOutput),
            OutputFormat::Json => Box::new(JsonOutput::new(pretty_json)),
            OutputFormat::Markdown => Box::new(MarkdownOutput),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub trait OutputWriter {
    fn name(&self) -> &'static str;
    fn format(&self) -> OutputFormat;
    fn write(&self, records: &[Observation], out: &mut dyn Write) -> Result<(), OutputError>;
}

/// Render a concentration the way the CSV writer does, keeping a trailing `.0`.
pub(crate) fn format_ppm(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}
