//! Error types for the supplink-core library.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for the supplink library.
#[derive(Error, Debug)]
pub enum SupplinkError {
    /// Storage collaborator failure (persistence).
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised by a supplier store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A supplier with this code already exists (active or inactive).
    #[error("supplier code already in use: {0}")]
    DuplicateCode(String),

    /// An active supplier with this canonical name already exists.
    #[error("active supplier already named: {0}")]
    DuplicateName(String),

    /// No supplier with this code.
    #[error("supplier not found: {0}")]
    NotFound(String),

    /// Backing file could not be read or written.
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Backing file has invalid content.
    #[error("store serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Why a narration produced no supplier candidate.
///
/// Ignored narrations are not failures and never get a reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureReason {
    /// No rule matched the narration at all.
    NoPatternMatched,
    /// At least one rule matched, but every captured name failed validation.
    ValidationRejected,
    /// The narration was blank or could not be read as text.
    MalformedInput,
}

impl FailureReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoPatternMatched => "NoPatternMatched",
            Self::ValidationRejected => "ValidationRejected",
            Self::MalformedInput => "MalformedInput",
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result type for the supplink library.
pub type Result<T> = std::result::Result<T, SupplinkError>;
