//! # Error Types
//!
//! Defines the errors raised while encoding and decoding nightskycam messages.

use thiserror::Error;

/// Errors that can occur while serializing or deserializing messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SerializationError {
    /// The message is structurally invalid or lacks a required key.
    #[error("Improper message: {0}")]
    ImproperMessage(String),

    /// The message signature does not match the shared secret.
    #[error("Incorrect token: message signature verification failed")]
    IncorrectToken,

    /// No entries shape is registered for this runner class.
    #[error("Unknown runner class: {0}")]
    UnknownRunnerClass(String),

    /// A status entries mapping does not fit the shape of its runner class.
    #[error("Invalid entries for {runner_class}: {reason}")]
    InvalidEntries {
        /// Name of the runner class the entries were checked against.
        runner_class: String,
        /// Why the conversion failed.
        reason: String,
    },
}

impl SerializationError {
    /// Shorthand for building an [`SerializationError::ImproperMessage`].
    pub(crate) fn improper(reason: impl Into<String>) -> Self {
        Self::ImproperMessage(reason.into())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SerializationError>;
