use std::fmt;

use crate::errors::{ParserError, Stage};
use crate::model::{SourceTable, SOURCE_COLUMNS};

/// Where the positions of the projected fields were learned from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnOrigin {
    HeaderRow,
    DataFields,
    Positional,
}

impl ColumnOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnOrigin::HeaderRow => "column header row",
            ColumnOrigin::DataFields => "data_fields metadata",
            ColumnOrigin::Positional => "positional layout",
        }
    }
}

impl fmt::Display for ColumnOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field indices of `Year`, `Month` and `Value` within a data row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub year: usize,
    pub month: usize,
    pub value: usize,
    pub origin: ColumnOrigin,
}

impl ColumnLayout {
    pub const POSITIONAL: ColumnLayout = ColumnLayout {
        year: 0,
        month: 1,
        value: 2,
        origin: ColumnOrigin::Positional,
    };

    /// Column-name row first, then the `data_fields` metadata, then positions 0, 1, 2.
    pub fn resolve(table: &SourceTable) -> Result<Self, ParserError> {
        if let Some(names) = table.column_names.as_deref() {
            return Self::from_names(names, ColumnOrigin::HeaderRow);
        }
        if let Some(names) = table.metadata.data_fields() {
            return Self::from_names(&names, ColumnOrigin::DataFields);
        }
        Ok(Self::POSITIONAL)
    }

    pub fn from_names(names: &[String], origin: ColumnOrigin) -> Result<Self, ParserError> {
        let find = |column: &'static str| {
            names
                .iter()
                .position(|name| name.eq_ignore_ascii_case(column))
                .ok_or(ParserError::MissingColumn {
                    stage: Stage::Project,
                    column,
                    origin,
                })
        };

        let [year, month, value] = SOURCE_COLUMNS;
        Ok(Self {
            year: find(year)?,
            month: find(month)?,
            value: find(value)?,
            origin,
        })
    }

    /// Fewest fields a row needs for all three columns to be present.
    pub fn min_fields(&self) -> usize {
        self.year.max(self.month).max(self.value) + 1
    }
}
