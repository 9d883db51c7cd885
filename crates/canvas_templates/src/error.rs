//! Error types for template validation.

use thiserror::Error;

/// Result type alias for template operations.
pub type TemplateResult<T> = Result<T, TemplateError>;

/// Authoring errors found while strictly scanning a template.
///
/// Rendering never produces these; they are reported by
/// [`TemplateRenderer::validate`](crate::TemplateRenderer::validate) so a bad
/// template is rejected when the knowledge base is loaded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("Block '{name}' opened at byte {offset} is never closed")]
    UnclosedBlock { name: String, offset: usize },

    #[error("Unexpected close of block '{name}' at byte {offset}")]
    UnexpectedClose { name: String, offset: usize },

    #[error("Block '{expected}' closed by '{found}' at byte {offset}")]
    MismatchedClose {
        expected: String,
        found: String,
        offset: usize,
    },

    #[error("Block '{inner}' at byte {offset} is nested inside block '{outer}'")]
    NestedBlock {
        outer: String,
        inner: String,
        offset: usize,
    },
}
