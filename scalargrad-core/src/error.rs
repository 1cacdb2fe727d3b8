use thiserror::Error;

/// Custom error type for the scalargrad engine.
#[derive(Error, Debug, PartialEq, Clone)]
pub enum ScalarGradError {
    /// An operator was applied outside of its mathematical domain, or produced a
    /// non-finite value or derivative while `DomainPolicy::Strict` is active.
    #[error("Domain error during operation {operation}: {message}")]
    DomainError { operation: String, message: String },

    #[error("Division by zero error")]
    DivisionByZero,

    #[error("Invalid node id {id}: graph holds {len} nodes")]
    InvalidNode { id: usize, len: usize },

    #[error("Operands belong to different computation graphs")]
    GraphMismatch,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Configuration key {key}={value:?} could not be parsed: {message}")]
    ConfigParse {
        key: String,
        value: String,
        message: String,
    },
}

impl ScalarGradError {
    pub(crate) fn domain(operation: &str, message: impl Into<String>) -> Self {
        ScalarGradError::DomainError {
            operation: operation.to_string(),
            message: message.into(),
        }
    }
}
