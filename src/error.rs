use miette::Diagnostic;
use thiserror::Error;

/// Result type for freezing and building operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for freezing values and building named objects
#[derive(Error, Debug, Diagnostic, Clone, PartialEq)]
pub enum Error {
    #[error("Expected {expected}, got {found}")]
    #[diagnostic(code(deepfreeze::input_type))]
    InputType {
        expected: &'static str,
        found: &'static str,
    },

    #[error("Cannot freeze value: {message}")]
    #[diagnostic(code(deepfreeze::type_conversion))]
    TypeConversion { message: String },

    #[error("Cannot {operation} on immutable {kind}")]
    #[diagnostic(
        code(deepfreeze::mutation),
        help("frozen values are read-only; build a new source value instead")
    )]
    Mutation {
        operation: &'static str,
        kind: &'static str,
    },

    #[error("Invalid attribute name {name:?}: {reason}")]
    #[diagnostic(code(deepfreeze::name_conflict))]
    NameConflict { name: String, reason: String },

    #[error("Invalid build options: {message}")]
    #[diagnostic(code(deepfreeze::invalid_options))]
    InvalidOptions { message: String },

    #[error("Parse error at line {line}, column {column}: {message}")]
    #[diagnostic(code(deepfreeze::parse_error))]
    Parse {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("Record conversion failed: {message}")]
    #[diagnostic(code(deepfreeze::record))]
    Record { message: String },
}

impl Error {
    /// Create a type conversion error
    pub fn type_conversion(message: impl Into<String>) -> Self {
        Error::TypeConversion {
            message: message.into(),
        }
    }

    /// Create a name conflict error
    pub fn name_conflict(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::NameConflict {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid options error
    pub fn invalid_options(message: impl Into<String>) -> Self {
        Error::InvalidOptions {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Record {
            message: err.to_string(),
        }
    }
}
