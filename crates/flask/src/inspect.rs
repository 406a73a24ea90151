use std::path::Path;

use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use flask_parser::{Observation, ParsedFlaskFile};

pub fn summary_table(input: &Path, parsed: &ParsedFlaskFile) -> Table {
    let layout = &parsed.layout;
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Field", "Value"]);

    table.add_row(vec!["Input".to_string(), input.display().to_string()]);
    table.add_row(vec![
        "Header lines".to_string(),
        parsed.header_lines.to_string(),
    ]);
    table.add_row(vec![
        "Columns".to_string(),
        format!(
            "Year={} Month={} Value={} ({})",
            layout.year, layout.month, layout.value, layout.origin
        ),
    ]);
    table.add_row(vec![
        "Records".to_string(),
        parsed.observations.len().to_string(),
    ]);
    table.add_row(vec![
        "Missing CO2 values".to_string(),
        parsed.missing_count().to_string(),
    ]);
    table.add_row(vec![
        "First month".to_string(),
        month_label(parsed.observations.first()),
    ]);
    table.add_row(vec![
        "Last month".to_string(),
        month_label(parsed.observations.last()),
    ]);

    for (key, value) in parsed.metadata.entries() {
        table.add_row(vec![key.to_string(), value.to_string()]);
    }

    table
}

fn month_label(observation: Option<&Observation>) -> String {
    observation
        .map(|o| format!("{:04}-{:02}", o.year, o.month))
        .unwrap_or_else(|| "-".to_string())
}
