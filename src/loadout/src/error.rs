//! Conversion errors

use thiserror::Error;

/// Broad category of a [`ConvertError`], for callers that present errors
/// differently per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input is not a JSON object
    Parse,
    /// JSON is well formed but a required field is missing or ill-typed
    Schema,
    /// The document cannot be laid out as XML, e.g. item trees nest deeper
    /// than the configured limit
    Structure,
}

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Input is empty")]
    EmptyInput,

    #[error("Invalid JSON: {0}")]
    Json(#[source] serde_json::Error),

    #[error("Expected a JSON object at the top level, found {0}")]
    NotAnObject(&'static str),

    #[error("Invalid loadout document: {0}")]
    Schema(#[source] serde_json::Error),

    #[error("Missing '{0}' field in JSON")]
    MissingField(&'static str),

    #[error("Field '{0}' must not be empty")]
    EmptyField(&'static str),

    #[error("Item tree nesting exceeds maximum depth of {max_depth} (reached {depth})")]
    TooDeep { depth: usize, max_depth: usize },

    #[error("{field} contains a character not allowed in XML: {codepoint:?}")]
    InvalidCharacter { field: String, codepoint: char },

    /// The writer targets memory, so this only surfaces if quick-xml or
    /// UTF-8 conversion misbehaves.
    #[error("Failed to write XML: {0}")]
    Write(#[from] std::io::Error),
}

impl ConvertError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConvertError::EmptyInput | ConvertError::Json(_) | ConvertError::NotAnObject(_) => {
                ErrorKind::Parse
            }
            ConvertError::Schema(_)
            | ConvertError::MissingField(_)
            | ConvertError::EmptyField(_)
            | ConvertError::InvalidCharacter { .. } => ErrorKind::Schema,
            ConvertError::TooDeep { .. } | ConvertError::Write(_) => ErrorKind::Structure,
        }
    }
}

pub type Result<T, E = ConvertError> = std::result::Result<T, E>;
