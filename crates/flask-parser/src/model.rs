use serde::{Deserialize, Serialize};

use crate::layout::ColumnLayout;

/// Literal the source files use for a measurement that was never made.
pub const MISSING_SENTINEL: &str = "-999.99";

pub(crate) const MISSING_SENTINEL_VALUE: f64 = -999.99;

/// Names of the projected fields as they appear in the source table.
pub const SOURCE_COLUMNS: [&str; 3] = ["Year", "Month", "Value"];

/// Names of the fields in every output format, in output order.
pub const OUTPUT_COLUMNS: [&str; 3] = ["Year", "Month", "CO2 (ppm)"];

/// One monthly flask measurement after projection and rename.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Month")]
    pub month: u32,
    #[serde(rename = "CO2 (ppm)")]
    pub co2_ppm: Option<f64>,
}

impl Observation {
    pub fn new(year: i32, month: u32, co2_ppm: Option<f64>) -> Self {
        Self {
            year,
            month,
            co2_ppm,
        }
    }

    pub fn is_missing(&self) -> bool {
        self.co2_ppm.is_none()
    }
}

/// `key: value` pairs collected from the comment lines of the header block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMetadata {
    entries: Vec<(String, String)>,
}

impl FileMetadata {
    pub fn from_header_lines(lines: &[&str]) -> Self {
        let entries = lines
            .iter()
            .filter_map(|line| parse_metadata_line(line))
            .collect();
        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Header length the file itself claims, if it says so.
    pub fn declared_header_lines(&self) -> Option<usize> {
        self.get("header_lines")
            .or_else(|| self.get("number_of_header_lines"))
            .and_then(|v| v.trim().parse().ok())
    }

    pub fn site_code(&self) -> Option<&str> {
        self.get("site_code").or_else(|| self.get("site"))
    }

    pub fn data_fields(&self) -> Option<Vec<String>> {
        self.get("data_fields")
            .map(|v| v.split_whitespace().map(str::to_string).collect::<Vec<_>>())
            .filter(|fields| !fields.is_empty())
    }
}

fn parse_metadata_line(line: &str) -> Option<(String, String)> {
    let body = line.trim_start().strip_prefix('#')?;
    let (key, value) = body.split_once(':')?;
    let key = key.trim();
    if key.is_empty() || key.contains(char::is_whitespace) {
        return None;
    }
    Some((key.to_string(), value.trim().to_string()))
}

/// A data line split on whitespace, with its 1-based line number in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRow {
    pub line_index: usize,
    pub fields: Vec<String>,
}

impl SourceRow {
    pub fn field(&self, idx: usize) -> Option<&str> {
        self.fields.get(idx).map(String::as_str)
    }
}

/// The data region of a source file before projection.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceTable {
    pub metadata: FileMetadata,
    pub header_lines: usize,
    pub column_names: Option<Vec<String>>,
    pub rows: Vec<SourceRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedFlaskFile {
    pub metadata: FileMetadata,
    pub header_lines: usize,
    pub layout: ColumnLayout,
    pub observations: Vec<Observation>,
}

impl ParsedFlaskFile {
    pub fn missing_count(&self) -> usize {
        self.observations.iter().filter(|o| o.is_missing()).count()
    }
}
