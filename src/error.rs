//! Error types for gemtext rendering.

use thiserror::Error;

/// Errors that can occur while rendering a document tree.
#[derive(Error, Debug)]
pub enum Error {
    /// No render rule exists for the node's kind (or for the requested transform).
    #[error("operation not supported (transform: {transform}, kind: {kind}, at: {context})")]
    UnsupportedKind {
        transform: String,
        kind: String,
        context: String,
    },

    /// A document attribute the render needs was not configured.
    #[error("missing required configuration `{key}`: {detail}")]
    MissingConfiguration { key: String, detail: String },

    #[error("invalid attribute override: {0}")]
    InvalidAttribute(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "cli")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
