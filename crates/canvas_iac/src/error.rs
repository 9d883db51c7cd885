//! Error types for the IaC generation module.

use thiserror::Error;

/// Result type alias for IaC operations.
pub type IacResult<T> = Result<T, IacError>;

/// Errors that can occur around generation.
///
/// Generation itself never fails; these cover knowledge base loading, graph
/// input and export.
#[derive(Error, Debug)]
pub enum IacError {
    #[error("Knowledge base error: {0}")]
    Knowledge(#[from] canvas_kb::KbError),

    #[error("Graph error: {0}")]
    Graph(#[from] canvas_graph::GraphError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Export failed: {0}")]
    ExportFailed(String),
}
