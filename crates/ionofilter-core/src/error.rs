use std::path::PathBuf;

use ionofilter_parser::ParserError;
use thiserror::Error;

use crate::chrono_sort::OrderViolation;
use crate::config::ConfigError;
use crate::sinks::SinkError;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("cannot read input file {path}: {source}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parsing failed: {0}")]
    Parser(#[from] ParserError),

    #[error("Chronological order check failed: {0}")]
    Order(#[from] OrderViolation),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{sink} sink failed: {source}")]
    Sink {
        sink: &'static str,
        #[source]
        source: SinkError,
    },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
