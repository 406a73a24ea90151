use std::fmt;

use thiserror::Error;

use crate::layout::ColumnOrigin;

/// Step of the conversion that rejected the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Load,
    Project,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Load => "load",
            Stage::Project => "project",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum ParserError {
    #[error(
        "{stage} stage: expected {header_lines} header lines followed by data, file has only {found} lines"
    )]
    TruncatedHeader {
        stage: Stage,
        header_lines: usize,
        found: usize,
    },

    #[error("{stage} stage: column '{column}' not found in {origin}")]
    MissingColumn {
        stage: Stage,
        column: &'static str,
        origin: ColumnOrigin,
    },

    #[error("{stage} stage: data row {line_index} invalid: {message}")]
    DataRow {
        stage: Stage,
        line_index: usize,
        message: String,
    },

    #[error("{stage} stage: file did not contain any data rows")]
    EmptyData { stage: Stage },
}

impl ParserError {
    pub fn stage(&self) -> Stage {
        match self {
            ParserError::TruncatedHeader { stage, .. }
            | ParserError::MissingColumn { stage, .. }
            | ParserError::DataRow { stage, .. }
            | ParserError::EmptyData { stage } => *stage,
        }
    }
}
