//! Template rendering and strict validation.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::trace;

use crate::error::{TemplateError, TemplateResult};
use crate::scanner::{tokenize, Tag, Token};

/// Values available to a template, keyed by placeholder name.
pub type TemplateData = BTreeMap<String, Value>;

/// Renderer for the `{{name}}` / `{{#block}}...{{/block}}` grammar.
///
/// Rendering is forgiving: unknown placeholders and malformed markers are left
/// in the output as literal text. Authoring mistakes are caught separately by
/// [`TemplateRenderer::validate`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateRenderer;

impl TemplateRenderer {
    /// Create a new template renderer.
    pub fn new() -> Self {
        Self
    }

    /// Render a template against `data`.
    pub fn render(&self, template: &str, data: &TemplateData) -> String {
        let tokens = tokenize(template);
        let mut out = String::with_capacity(template.len());
        let mut i = 0;

        while i < tokens.len() {
            match tokens[i] {
                Token::Text(text) => out.push_str(text),
                Token::Scalar(tag) => push_scalar(&mut out, tag, data),
                Token::Open(tag) => {
                    if let Some(rel) = find_close(&tokens[i + 1..], tag.name) {
                        let end = i + 1 + rel;
                        if data.get(tag.name).is_some_and(is_truthy) {
                            for token in &tokens[i + 1..end] {
                                push_flat(&mut out, token, data);
                            }
                        } else {
                            trace!("Dropping block {}", tag.name);
                        }
                        i = end + 1;
                        continue;
                    }
                    out.push_str(tag.raw);
                }
                Token::Close(tag) => out.push_str(tag.raw),
            }
            i += 1;
        }

        out
    }

    /// Strictly scan a template, rejecting unbalanced or nested blocks.
    pub fn validate(&self, template: &str) -> TemplateResult<TemplateOutline> {
        let mut outline = TemplateOutline::default();
        let mut open: Option<(Tag<'_>, Vec<String>)> = None;

        for token in tokenize(template) {
            match token {
                Token::Text(_) => {}
                Token::Scalar(tag) => match open.as_mut() {
                    Some((_, scalars)) => push_unique(scalars, tag.name),
                    None => push_unique(&mut outline.scalars, tag.name),
                },
                Token::Open(tag) => {
                    if let Some((outer, _)) = &open {
                        return Err(TemplateError::NestedBlock {
                            outer: outer.name.to_string(),
                            inner: tag.name.to_string(),
                            offset: tag.offset,
                        });
                    }
                    open = Some((tag, Vec::new()));
                }
                Token::Close(tag) => match open.take() {
                    None => {
                        return Err(TemplateError::UnexpectedClose {
                            name: tag.name.to_string(),
                            offset: tag.offset,
                        })
                    }
                    Some((start, _)) if start.name != tag.name => {
                        return Err(TemplateError::MismatchedClose {
                            expected: start.name.to_string(),
                            found: tag.name.to_string(),
                            offset: tag.offset,
                        })
                    }
                    Some((start, scalars)) => outline.blocks.push(BlockOutline {
                        name: start.name.to_string(),
                        scalars,
                    }),
                },
            }
        }

        match open {
            Some((start, _)) => Err(TemplateError::UnclosedBlock {
                name: start.name.to_string(),
                offset: start.offset,
            }),
            None => Ok(outline),
        }
    }
}

/// Placeholder names referenced by a validated template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateOutline {
    /// Scalars outside any block, in first-seen order.
    pub scalars: Vec<String>,
    /// Conditional blocks, in source order.
    pub blocks: Vec<BlockOutline>,
}

impl TemplateOutline {
    /// Whether the template has a block with this name.
    pub fn has_block(&self, name: &str) -> bool {
        self.blocks.iter().any(|b| b.name == name)
    }
}

/// One conditional block and the scalars used inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockOutline {
    pub name: String,
    pub scalars: Vec<String>,
}

/// Whether a value enables a conditional block.
///
/// `null`, `false`, zero and the empty string are falsy. Arrays and objects
/// are truthy even when empty.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// String form of a value as substituted into a template.
pub fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn push_scalar(out: &mut String, tag: Tag<'_>, data: &TemplateData) {
    match data.get(tag.name) {
        Some(value) => out.push_str(&scalar_text(value)),
        None => out.push_str(tag.raw),
    }
}

/// Render a token inside a block body, where markers are plain text.
fn push_flat(out: &mut String, token: &Token<'_>, data: &TemplateData) {
    match *token {
        Token::Text(text) => out.push_str(text),
        Token::Scalar(tag) => push_scalar(out, tag, data),
        Token::Open(tag) | Token::Close(tag) => out.push_str(tag.raw),
    }
}

fn find_close(tokens: &[Token<'_>], name: &str) -> Option<usize> {
    tokens
        .iter()
        .position(|t| matches!(t, Token::Close(tag) if tag.name == name))
}

fn push_unique(names: &mut Vec<String>, name: &str) {
    if !names.iter().any(|n| n == name) {
        names.push(name.to_string());
    }
}
