//! Error types for code generation

use std::path::PathBuf;

use thiserror::Error;

/// Result type for codegen operations
pub type Result<T> = std::result::Result<T, CodegenError>;

/// Code generation errors
///
/// Every variant is fatal to a generation run.
#[derive(Error, Debug)]
pub enum CodegenError {
    #[error("Type resolution failed for property '{property}' of schema {schema}: {reason}")]
    TypeResolution {
        schema: String,
        property: String,
        reason: String,
    },

    #[error("No group/version registered for schema type {type_uri}")]
    UnresolvedSchema { type_uri: String },

    #[error("Invalid schema {}: {reason}", .path.display())]
    InvalidSchema { path: PathBuf, reason: String },

    #[error("Index entry for {type_uri} in group '{group}' has no import path")]
    IncompleteIndex { group: String, type_uri: String },

    #[error("IO error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

impl CodegenError {
    /// Wrap an IO error with the path it happened at
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn type_resolution(
        schema: impl Into<String>,
        property: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::TypeResolution {
            schema: schema.into(),
            property: property.into(),
            reason: reason.into(),
        }
    }
}
