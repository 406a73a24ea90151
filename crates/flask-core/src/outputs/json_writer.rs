use std::io::Write;

use flask_parser::Observation;

use super::{OutputError, OutputFormat, OutputWriter};

/// Top-level array of `{"Year", "Month", "CO2 (ppm)"}` objects in file order.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonOutput {
    pretty: bool,
}

impl JsonOutput {
    const NAME: &'static str = "JSON";

    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputWriter for JsonOutput {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn format(&self) -> OutputFormat {
        OutputFormat::Json
    }

    fn write(&self, records: &[Observation], out: &mut dyn Write) -> Result<(), OutputError> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut *out, records)?;
        } else {
            serde_json::to_writer(&mut *out, records)?;
        }
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(writer: JsonOutput, records: &[Observation]) -> String {
        let mut buffer = Vec::new();
        writer.write(records, &mut buffer).expect("json write failed");
        String::from_utf8(buffer).expect("json output is utf-8")
    }

    #[test]
    fn compact_records_keep_field_order_and_null() {
        let output = render(
            JsonOutput::default(),
            &[
                Observation::new(1958, 6, Some(317.28)),
                Observation::new(1958, 7, None),
            ],
        );

        assert_eq!(
            output,
            r#"[{"Year":1958,"Month":6,"CO2 (ppm)":317.28},{"Year":1958,"Month":7,"CO2 (ppm)":null}]"#
        );
    }

    #[test]
    fn pretty_output_parses_to_same_value() {
        let records = [Observation::new(1970, 3, Some(326.29))];
        let compact: serde_json::Value =
            serde_json::from_str(&render(JsonOutput::new(false), &records)).expect("compact");
        let pretty_text = render(JsonOutput::new(true), &records);
        let pretty: serde_json::Value = serde_json::from_str(&pretty_text).expect("pretty");

        assert!(pretty_text.contains('\n'));
        assert_eq!(compact, pretty);
    }
}
