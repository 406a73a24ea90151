use serde::{Deserialize, Serialize};

use crate::errors::{ParserError, Stage};
use crate::model::{FileMetadata, SourceRow, SourceTable};

/// Number of metadata lines preceding the data in the published flask files.
pub const DEFAULT_HEADER_LINES: usize = 54;

/// How the boundary between the metadata block and the data is found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderMode {
    /// Skip exactly this many lines, whatever they contain.
    Fixed(usize),
    /// Trust the file's own `header_lines` entry, else skip the leading `#` block.
    Detect,
}

impl Default for HeaderMode {
    fn default() -> Self {
        HeaderMode::Fixed(DEFAULT_HEADER_LINES)
    }
}

impl HeaderMode {
    fn header_len(&self, lines: &[&str]) -> usize {
        match self {
            HeaderMode::Fixed(n) => *n,
            HeaderMode::Detect => {
                let comment_block = lines
                    .iter()
                    .take_while(|line| line.trim_start().starts_with('#'))
                    .count();
                FileMetadata::from_header_lines(&lines[..comment_block])
                    .declared_header_lines()
                    .unwrap_or(comment_block)
            }
        }
    }
}

/// Split `content` into its metadata block and whitespace-delimited data rows.
///
/// A first data line in which no field is numeric is taken as a column-name
/// row rather than a record. Blank lines in the data region are ignored.
pub fn load_source(content: &str, mode: HeaderMode) -> Result<SourceTable, ParserError> {
    let lines: Vec<&str> = content.lines().collect();
    let header_lines = mode.header_len(&lines);

    if lines.len() <= header_lines {
        return Err(ParserError::TruncatedHeader {
            stage: Stage::Load,
            header_lines,
            found: lines.len(),
        });
    }

    let metadata = FileMetadata::from_header_lines(&lines[..header_lines]);

    let mut column_names: Option<Vec<String>> = None;
    let mut rows = Vec::new();

    for (offset, line) in lines[header_lines..].iter().enumerate() {
        let fields: Vec<String> = line.split_whitespace().map(str::to_string).collect();
        if fields.is_empty() {
            continue;
        }

        if rows.is_empty() && column_names.is_none() && is_column_name_row(&fields) {
            column_names = Some(fields);
            continue;
        }

        rows.push(SourceRow {
            line_index: header_lines + offset + 1,
            fields,
        });
    }

    if rows.is_empty() {
        return Err(ParserError::EmptyData { stage: Stage::Load });
    }

    Ok(SourceTable {
        metadata,
        header_lines,
        column_names,
        rows,
    })
}

fn is_column_name_row(fields: &[String]) -> bool {
    fields.iter().all(|field| field.parse::<f64>().is_err())
}
