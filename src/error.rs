// src/error.rs

use thiserror::Error;

/// Failures raised by the emissions pipeline itself. Source adapters and the
/// binaries wrap these in `anyhow::Error`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    /// The raw table does not have the shape the sanitizer expects.
    #[error("schema error: {0}")]
    Schema(String),

    /// A year or percentage cell holds text that is neither empty, a no-data
    /// marker, nor a decimal number.
    #[error("parse error in row {row}, column `{column}`: `{value}` is not a number")]
    Parse {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("resolution error in row {row}: {reason}")]
    Resolution { row: usize, reason: String },
}

pub type PipelineResult<T> = Result<T, PipelineError>;
