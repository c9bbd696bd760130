//! Error types for loading, configuring and reporting reconciliation runs.
//!
//! Every I/O and parse failure carries the path involved so that the CLI can
//! print a message the user can act on.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur outside the reconciliation core.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// File could not be read or written.
    #[error("I/O error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON document failed to parse.
    #[error("invalid JSON in '{}': {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// YAML document failed to parse.
    #[error("invalid YAML in '{}': {source}", .path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Report could not be delivered to its writer.
    #[error("failed to write notification: {0}")]
    Notify(#[source] std::io::Error),

    /// Configuration is structurally valid but unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Report serialization failure.
    #[error("serialization failed: {0}")]
    Serialize(String),
}

/// Convenience alias for results with [`LoaderError`].
pub type Result<T> = std::result::Result<T, LoaderError>;
