use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use flask_parser::{parse_flask_file, Observation, ParsedFlaskFile};
use tracing::{debug, info, warn};

use crate::config::ConverterConfig;
use crate::error::{PipelineError, Result};
use crate::outputs::{OutputError, OutputFormat, OutputWriter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenOutput {
    pub format: OutputFormat,
    pub path: PathBuf,
}

/// What a finished conversion produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionSummary {
    pub input: PathBuf,
    pub record_count: usize,
    pub missing_count: usize,
    pub outputs: Vec<WrittenOutput>,
}

/// Read the configured input and project it into observations.
pub fn load_observations(config: &ConverterConfig) -> Result<ParsedFlaskFile> {
    let path = config.input.as_path();
    let content = fs::read_to_string(path).map_err(|source| PipelineError::InputMissing {
        path: path.to_path_buf(),
        source,
    })?;

    let parsed =
        parse_flask_file(&content, config.header).map_err(|source| PipelineError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    debug!(
        header_lines = parsed.header_lines,
        origin = %parsed.layout.origin,
        year = parsed.layout.year,
        month = parsed.layout.month,
        value = parsed.layout.value,
        "Resolved source columns"
    );
    info!(
        input = %path.display(),
        records = parsed.observations.len(),
        "Loaded flask observations"
    );

    Ok(parsed)
}

/// Load the input, then write each enabled format in turn.
///
/// A failing writer aborts the run; files written before it stay on disk.
pub fn convert(config: &ConverterConfig) -> Result<ConversionSummary> {
    config.validate()?;
    let parsed = load_observations(config)?;

    let missing_count = parsed.missing_count();
    if missing_count > 0 {
        warn!(
            missing = missing_count,
            "Observations without a CO2 value will be written as empty"
        );
    }

    let mut outputs = Vec::new();
    for format in config.enabled_formats() {
        let writer = format.writer(config.pretty_json);
        let path = config.output_path(format);
        write_output(writer.as_ref(), &parsed.observations, &path)?;
        outputs.push(WrittenOutput { format, path });
    }

    Ok(ConversionSummary {
        input: config.input.clone(),
        record_count: parsed.observations.len(),
        missing_count,
        outputs,
    })
}

/// Create or overwrite `path` with `records` rendered by `writer`.
pub fn write_output(
    writer: &dyn OutputWriter,
    records: &[Observation],
    path: &Path,
) -> Result<()> {
    let fail = |source: OutputError| PipelineError::OutputWrite {
        writer: writer.name(),
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(|err| fail(err.into()))?;
    let mut out = BufWriter::new(file);
    writer.write(records, &mut out).map_err(fail)?;
    out.flush().map_err(|err| fail(err.into()))?;

    info!(
        format = %writer.format(),
        path = %path.display(),
        records = records.len(),
        "Wrote output"
    );
    Ok(())
}
