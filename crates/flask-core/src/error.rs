// crates/flask-core/src/error.rs

use std::path::PathBuf;

use flask_parser::ParserError;
use thiserror::Error;

use crate::outputs::OutputError;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("load stage: cannot read input file {}: {source}", .path.display())]
    InputMissing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParserError,
    },

    #[error("{writer} writer: failed to write {}: {source}", .path.display())]
    OutputWrite {
        writer: &'static str,
        path: PathBuf,
        #[source]
        source: OutputError,
    },

    #[error("cannot read config file {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config parsing error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
