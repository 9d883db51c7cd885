//! Error types for graph files and the project store.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;

/// Errors that can occur while reading, writing or storing graphs.
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    #[error("Project name '{name}' conflicts with stored project '{existing}'")]
    NameConflict { name: String, existing: String },

    #[error("Unsupported graph file format: {0}")]
    UnsupportedFormat(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
