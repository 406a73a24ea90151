pub mod config;
pub mod error;
pub mod outputs;
pub mod pipeline;

pub use config::{ConfigOverrides, ConverterConfig};
pub use error::{PipelineError, Result};
pub use outputs::{OutputError, OutputFormat, OutputWriter};
pub use pipeline::{convert, load_observations, write_output, ConversionSummary, WrittenOutput};
