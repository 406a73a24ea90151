use std::io::{Read, Write};

use csv::{ReaderBuilder, Terminator, WriterBuilder};
use flask_parser::{Observation, OUTPUT_COLUMNS};

use super::{OutputError, OutputFormat, OutputWriter};

/// Comma-separated output with a single header row and no index column.
pub struct CsvOutput;

impl Default for CsvOutput {
    fn default() -> Self {
        Self
    }
}

impl CsvOutput {
    const NAME: &'static str = "CSV";
}

/// `\r\n` on Windows, `\n` everywhere else.
pub fn platform_terminator() -> Terminator {
    if cfg!(windows) {
        Terminator::CRLF
    } else {
        Terminator::Any(b'\n')
    }
}

impl OutputWriter for CsvOutput {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn format(&self) -> OutputFormat {
        OutputFormat::Csv
    }

    fn write(&self, records: &[Observation], out: &mut dyn Write) -> Result<(), OutputError> {
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .terminator(platform_terminator())
            .from_writer(out);

        writer.write_record(OUTPUT_COLUMNS)?;
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Read records back from CSV produced by [`CsvOutput`].
pub fn read_csv<R: Read>(input: R) -> Result<Vec<Observation>, OutputError> {
    let mut reader = ReaderBuilder::new().from_reader(input);
    let mut records = Vec::new();

    for result in reader.deserialize() {
        let record: Observation = result?;
        records.push(record);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(records: &[Observation]) -> String {
        let mut buffer = Vec::new();
        CsvOutput
            .write(records, &mut buffer)
            .expect("csv write failed");
        String::from_utf8(buffer).expect("csv output is utf-8")
    }

    #[test]
    fn writes_header_and_empty_missing_field() {
        let output = render(&[
            Observation::new(1958, 6, Some(317.28)),
            Observation::new(1958, 7, None),
        ]);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines, vec!["Year,Month,CO2 (ppm)", "1958,6,317.28", "1958,7,"]);
    }

    #[test]
    fn uses_platform_line_terminator() {
        let output = render(&[Observation::new(1958, 6, Some(317.28))]);
        if cfg!(windows) {
            assert!(output.ends_with("317.28\r\n"));
        } else {
            assert!(output.ends_with("317.28\n"));
            assert!(!output.contains('\r'));
        }
    }

    #[test]
    fn header_written_even_without_records() {
        let output = render(&[]);
        assert_eq!(output.trim_end(), "Year,Month,CO2 (ppm)");
    }

    #[test]
    fn reads_back_what_it_wrote() {
        let records = vec![
            Observation::new(1969, 8, Some(323.08)),
            Observation::new(1969, 10, None),
            Observation::new(1970, 1, Some(325.0)),
        ];
        let output = render(&records);
        let parsed = read_csv(output.as_bytes()).expect("csv read failed");

        assert_eq!(parsed, records);
    }
}
