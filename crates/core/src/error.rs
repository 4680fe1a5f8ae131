// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for ch-core operations.

use std::fmt;

use thiserror::Error;

/// Which half of a status update failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateStep {
    /// Overwriting `status`, `updatedBy`, and `updatedAt`.
    FieldOverwrite,
    /// Appending the entry to the `updates` history.
    HistoryAppend,
}

impl UpdateStep {
    /// Returns the string representation used in messages and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            UpdateStep::FieldOverwrite => "field overwrite",
            UpdateStep::HistoryAppend => "history append",
        }
    }
}

impl fmt::Display for UpdateStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Coarse classification of an [`Error`], used by callers to pick a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller-supplied data violates a precondition.
    Validation,
    /// The complaint store failed, including missing documents.
    Store,
    /// The priority classifier failed. Absorbed by the service.
    Classifier,
    /// Configuration could not be loaded.
    Config,
}

impl ErrorKind {
    /// Returns the string representation used in response bodies.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::Store => "store",
            ErrorKind::Classifier => "classifier",
            ErrorKind::Config => "config",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// All possible errors that can occur in ch-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("missing uid\n  hint: a complaint must be associated with a user")]
    MissingUid,

    #[error("{field} cannot be empty")]
    FieldEmpty { field: &'static str },

    #[error("document not found: {collection}/{id}")]
    NotFound { collection: String, id: String },

    #[error("status update failed at {step}: {source}")]
    StatusUpdate {
        step: UpdateStep,
        #[source]
        source: Box<Error>,
    },

    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("corrupted data: {0}")]
    CorruptedData(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("classifier error: {0}")]
    Classifier(String),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Classifies this error for callers that map errors to responses.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MissingUid | Error::FieldEmpty { .. } => ErrorKind::Validation,
            Error::NotFound { .. }
            | Error::StatusUpdate { .. }
            | Error::StoreUnavailable(_)
            | Error::Database(_)
            | Error::CorruptedData(_)
            | Error::Json(_) => ErrorKind::Store,
            Error::Classifier(_) | Error::Http(_) => ErrorKind::Classifier,
            Error::Config(_) | Error::Toml(_) | Error::Io(_) => ErrorKind::Config,
        }
    }
}

/// A specialized Result type for ch-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
