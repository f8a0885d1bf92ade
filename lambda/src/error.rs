//! Errors returned by the transformer.

use lambda_runtime::Diagnostic;
use thiserror::Error;

/// The name reported to the Lambda service when an invocation fails.
pub const SERIALIZATION_ERROR: &str = "SerializationError";

/// All failures of an invocation.
#[derive(Debug, Error)]
pub enum Error {
    /// The event could not be rendered as JSON text for the log line, or the
    /// rendered text could not be written out.
    #[error("event could not be serialized for logging: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for transformer operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// The error type reported to the Lambda Runtime API.
    pub fn name(&self) -> &'static str {
        match self {
            Error::Serialization(_) => SERIALIZATION_ERROR,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Serialization(serde_json::Error::io(err))
    }
}

impl From<Error> for Diagnostic {
    fn from(err: Error) -> Self {
        Diagnostic {
            error_type: err.name().to_string(),
            error_message: err.to_string(),
        }
    }
}
