use thiserror::Error;

/// Validation failures for counter fields, values and item keys.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("unrecognized field: {0}")]
    UnrecognizedField(String),

    #[error("invalid deity ID: {0}")]
    UnrecognizedItem(String),

    #[error("invalid value for {field}: expected {expected}")]
    InvalidValue { field: &'static str, expected: &'static str },

    #[error("expected a JSON object")]
    NotAnObject,
}
