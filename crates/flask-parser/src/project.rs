use std::fmt::Display;
use std::str::FromStr;

use crate::errors::{ParserError, Stage};
use crate::layout::ColumnLayout;
use crate::loader::{load_source, HeaderMode};
use crate::model::{
    Observation, ParsedFlaskFile, SourceRow, SourceTable, MISSING_SENTINEL,
    MISSING_SENTINEL_VALUE, SOURCE_COLUMNS,
};

/// Load, resolve columns and project in one call.
pub fn parse_flask_file(content: &str, mode: HeaderMode) -> Result<ParsedFlaskFile, ParserError> {
    let table = load_source(content, mode)?;
    let layout = ColumnLayout::resolve(&table)?;
    let observations = project_with_layout(&table, &layout)?;

    Ok(ParsedFlaskFile {
        metadata: table.metadata,
        header_lines: table.header_lines,
        layout,
        observations,
    })
}

pub fn project(table: &SourceTable) -> Result<Vec<Observation>, ParserError> {
    let layout = ColumnLayout::resolve(table)?;
    project_with_layout(table, &layout)
}

/// Keep `Year`, `Month` and `Value` from every row, in file order.
pub fn project_with_layout(
    table: &SourceTable,
    layout: &ColumnLayout,
) -> Result<Vec<Observation>, ParserError> {
    let [year_name, month_name, value_name] = SOURCE_COLUMNS;
    let min_fields = layout.min_fields();

    table
        .rows
        .iter()
        .map(|row| {
            if row.fields.len() < min_fields {
                return Err(ParserError::DataRow {
                    stage: Stage::Project,
                    line_index: row.line_index,
                    message: format!(
                        "expected at least {} fields but found {}",
                        min_fields,
                        row.fields.len()
                    ),
                });
            }

            let year = parse_required_integer(row, layout.year, year_name)?;
            let month = parse_required_integer(row, layout.month, month_name)?;
            let co2_ppm = parse_optional_value(row, layout.value, value_name)?;
            Ok(Observation::new(year, month, co2_ppm))
        })
        .collect()
}

fn parse_required_integer<T>(row: &SourceRow, idx: usize, column: &str) -> Result<T, ParserError>
where
    T: FromStr,
    T::Err: Display,
{
    let value = row.field(idx).unwrap_or_default().trim();
    if value == MISSING_SENTINEL {
        return Err(ParserError::DataRow {
            stage: Stage::Project,
            line_index: row.line_index,
            message: format!("column '{column}' is required but holds the missing-value sentinel"),
        });
    }

    value.parse::<T>().map_err(|err| ParserError::DataRow {
        stage: Stage::Project,
        line_index: row.line_index,
        message: format!("failed to parse column '{column}' value '{value}' as integer: {err}"),
    })
}

fn parse_optional_value(
    row: &SourceRow,
    idx: usize,
    column: &str,
) -> Result<Option<f64>, ParserError> {
    let value = row.field(idx).unwrap_or_default().trim();
    if value == MISSING_SENTINEL {
        return Ok(None);
    }

    match value.parse::<f64>() {
        Ok(parsed) => {
            if parsed.is_infinite() {
                Err(ParserError::DataRow {
                    stage: Stage::Project,
                    line_index: row.line_index,
                    message: format!("column '{column}' value '{value}' is not a finite number"),
                })
            } else if parsed.is_nan() || (parsed - MISSING_SENTINEL_VALUE).abs() < f64::EPSILON {
                Ok(None)
            } else {
                Ok(Some(parsed))
            }
        }
        Err(err) => Err(ParserError::DataRow {
            stage: Stage::Project,
            line_index: row.line_index,
            message: format!("failed to parse column '{column}' value '{value}' as float: {err}"),
        }),
    }
}
