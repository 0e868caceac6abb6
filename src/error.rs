use std::io;

use thiserror::Error;

use crate::summary::SummaryError;

pub type Result<T> = std::result::Result<T, CodecombError>;

#[derive(Debug, Error)]
pub enum CodecombError {
    #[error("invalid utf-8 path: {0}")]
    InvalidUtfPath(String),

    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("failed to parse config: {0}")]
    ConfigParse(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    #[error("failed to initialize telemetry: {0}")]
    TelemetryInit(String),

    #[error(transparent)]
    Summary(#[from] SummaryError),
}
