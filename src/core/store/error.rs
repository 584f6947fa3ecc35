//! Error types for provider store operations.

use std::fmt;

/// Errors reported to the caller of a store operation.
///
/// Both variants travel back across the command boundary as a reply field
/// and never abort the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A required field was empty or a URL failed validation.
    InvalidInput(String),
    /// The referenced provider id does not exist.
    NotFound(String),
}

impl StoreError {
    /// Stable identifier sent to UI processes in `{ok: false, error}`.
    pub fn kind(&self) -> &'static str {
        match self {
            StoreError::InvalidInput(_) => "invalid",
            StoreError::NotFound(_) => "not_found",
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::InvalidInput(reason) => write!(f, "Invalid provider input: {reason}"),
            StoreError::NotFound(id) => write!(f, "Provider '{id}' not found"),
        }
    }
}

impl std::error::Error for StoreError {}
