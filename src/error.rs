use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by parsing, request decoding and batch evaluation.
///
/// Evaluating a well-formed tree never fails: division by zero produces a
/// non-finite `f64` instead of an error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A batch was empty, or a literal was given where an operation is required.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Operator text outside of `+ - * /`.
    #[error("Unknown operator: {0}")]
    UnknownOperator(String),

    /// Infix text could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A JSON request did not match the operation shape.
    #[error("Malformed request: {0}")]
    MalformedRequest(String),
}

impl Error {
    pub(crate) fn empty_batch() -> Self {
        Error::InvalidArgument("operation list is empty".to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Error::MalformedRequest(value.to_string())
    }
}
