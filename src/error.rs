//! Error types for shellshape-settings

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for shellshape-settings operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the settings layer
#[derive(Error, Debug)]
pub enum Error {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read directory '{path}': {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Failed to serialize data: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to parse: {0}")]
    Parse(String),

    // -------------------------------------------------------------------------
    // Schema Errors
    // -------------------------------------------------------------------------
    #[error("Schema {schema} could not be found for extension {extension}")]
    SchemaNotFound { schema: String, extension: String },

    #[error("Invalid schema identifier: {0}")]
    InvalidSchemaId(String),

    #[error("Invalid schema in '{path}': {reason}")]
    InvalidSchema { path: PathBuf, reason: String },

    // -------------------------------------------------------------------------
    // Store Errors
    // -------------------------------------------------------------------------
    #[error("Key '{key}' not found in schema {schema}")]
    KeyNotFound { schema: String, key: String },

    #[error("Type mismatch for {key}: expected {expected}, got {actual}")]
    TypeMismatch {
        key: String,
        expected: String,
        actual: String,
    },

    #[error("Store rejected value for {key}: {reason}")]
    StoreWrite { key: String, reason: String },
}

impl Error {
    /// Check if this is a "not found" type error
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::SchemaNotFound { .. } | Error::KeyNotFound { .. }
        )
    }

    /// Check if the backing store refused a write
    #[must_use]
    pub fn is_write_error(&self) -> bool {
        matches!(self, Error::StoreWrite { .. } | Error::TypeMismatch { .. })
    }
}

// =============================================================================
// Filesystem Helper Functions
// =============================================================================

use std::path::Path;

/// Read a file to string with proper error handling
pub fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Read directory entries with proper error handling
pub fn read_dir(path: &Path) -> Result<std::fs::ReadDir> {
    std::fs::read_dir(path).map_err(|e| Error::DirectoryRead {
        path: path.to_path_buf(),
        source: e,
    })
}
