use std::io::Write;

use comfy_table::presets::ASCII_MARKDOWN;
use comfy_table::{CellAlignment, ContentArrangement, Table};
use flask_parser::{Observation, OUTPUT_COLUMNS};

use super::{format_ppm, OutputError, OutputFormat, OutputWriter};

/// GitHub-flavored pipe table. Missing concentrations are empty cells.
pub struct MarkdownOutput;

impl Default for MarkdownOutput {
    fn default() -> Self {
        Self
    }
}

impl MarkdownOutput {
    const NAME: &'static str = "Markdown";

    fn build_table(records: &[Observation]) -> Table {
        let mut table = Table::new();
        table
            .load_preset(ASCII_MARKDOWN)
            .set_content_arrangement(ContentArrangement::Disabled)
            .set_header(OUTPUT_COLUMNS);

        for record in records {
            table.add_row(vec![
                record.year.to_string(),
                record.month.to_string(),
                record.co2_ppm.map(format_ppm).unwrap_or_default(),
            ]);
        }

        for column in table.column_iter_mut() {
            column.set_cell_alignment(CellAlignment::Right);
        }

        table
    }
}

impl OutputWriter for MarkdownOutput {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }

    fn write(&self, records: &[Observation], out: &mut dyn Write) -> Result<(), OutputError> {
        let table = Self::build_table(records);
        writeln!(out, "{table}")?;
        out.flush()?;
        Ok(())
    }
}
