//! Error types for the knowledge base.

use thiserror::Error;

use crate::kind::ResourceKind;

/// Result type alias for knowledge base operations.
pub type KbResult<T> = Result<T, KbError>;

/// Authoring errors detected when the knowledge base is loaded.
#[derive(Error, Debug)]
pub enum KbError {
    #[error("Invalid template for {kind}: {source}")]
    InvalidTemplate {
        kind: ResourceKind,
        #[source]
        source: canvas_templates::TemplateError,
    },

    #[error("Template for {kind} uses undeclared placeholder '{placeholder}'")]
    UndeclaredPlaceholder {
        kind: ResourceKind,
        placeholder: String,
    },

    #[error("Template for {kind} uses undeclared block '{block}'")]
    UndeclaredBlock { kind: ResourceKind, block: String },

    #[error("Duplicate knowledge base entry for {0}")]
    DuplicateEntry(ResourceKind),
}
