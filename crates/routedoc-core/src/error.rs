//! Error types for routedoc-core

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias for routedoc-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in routedoc-core
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Method string outside GET, POST, PUT, PATCH, DELETE, OPTIONS, HEAD.
    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// An operation fragment was not a JSON object.
    #[error("Invalid operation fragment: expected a JSON object, got {0}")]
    InvalidOperation(&'static str),

    /// Configuration could not be parsed.
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },

    /// I/O error while reading configuration.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// File being read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Creates a configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Creates an I/O error tagged with the file it concerns.
    pub fn io_with_path(source: std::io::Error, path: &Path) -> Self {
        Error::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Failures reported by a schema registry.
///
/// These never abort route registration: the resolver degrades to an
/// open-object schema instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SchemaError {
    /// Another type already owns the derived key.
    #[error("schema name collision: '{key}' is already registered for another type")]
    NameCollision {
        /// Registry key both types derive to
        key: String,
    },

    /// The descriptor cannot be turned into a schema.
    #[error("unsupported kind for schema registration: {path} ({kind})")]
    UnsupportedKind {
        /// Type path of the descriptor
        path: String,
        /// Kind after unwrapping indirections
        kind: crate::schema::TypeKind,
    },
}
