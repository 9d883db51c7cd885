//! The knowledge base: resource kind to template, attributes and guidance.

use serde::Serialize;
use tracing::{debug, info};

use canvas_templates::TemplateRenderer;

use crate::catalog;
use crate::error::{KbError, KbResult};
use crate::kind::ResourceKind;
use crate::matcher::ResourceMatcher;

/// Data keys the generator injects itself.
pub mod reserved {
    /// The derived resource identifier.
    pub const NAME: &str = "name";
    /// Identifier of the containing node, when one is resolved.
    pub const CONTAINER_NAME: &str = "container_name";
    /// Address range of the containing node, when known.
    pub const CONTAINER_CIDR_BLOCK: &str = "container_cidr_block";

    /// Whether `key` is one of the container keys.
    pub fn is_container_key(key: &str) -> bool {
        key == CONTAINER_NAME || key == CONTAINER_CIDR_BLOCK
    }
}

/// One knowledge base entry.
#[derive(Debug, Clone, Serialize)]
pub struct KnowledgeEntry {
    pub kind: ResourceKind,
    pub template: &'static str,
    pub required_attributes: &'static [&'static str],
    pub optional_attributes: &'static [&'static str],
    pub examples: &'static [&'static str],
    pub advisories: &'static [&'static str],
}

impl KnowledgeEntry {
    /// Whether `name` is a required attribute.
    pub fn requires(&self, name: &str) -> bool {
        self.required_attributes.iter().any(|a| *a == name)
    }

    /// Whether `name` is a required or optional attribute.
    pub fn declares(&self, name: &str) -> bool {
        self.requires(name) || self.optional_attributes.iter().any(|a| *a == name)
    }
}

/// Immutable catalogue of resource templates.
///
/// Build it once at startup with [`KnowledgeBase::load`] and share it; every
/// template has been validated by then.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    entries: Vec<KnowledgeEntry>,
}

impl KnowledgeBase {
    /// Load and validate the built-in entries.
    pub fn load() -> KbResult<Self> {
        let kb = Self::from_entries(catalog::builtin_entries())?;
        info!("Loaded knowledge base with {} entries", kb.entries.len());
        Ok(kb)
    }

    /// Build a knowledge base from explicit entries, validating each one.
    pub fn from_entries(entries: Vec<KnowledgeEntry>) -> KbResult<Self> {
        let renderer = TemplateRenderer::new();

        for (i, entry) in entries.iter().enumerate() {
            if entries[..i].iter().any(|e| e.kind == entry.kind) {
                return Err(KbError::DuplicateEntry(entry.kind));
            }
            validate_entry(&renderer, entry)?;
            debug!("Validated template for {}", entry.kind);
        }

        Ok(Self { entries })
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[KnowledgeEntry] {
        &self.entries
    }

    /// Entry for a kind.
    pub fn get(&self, kind: ResourceKind) -> Option<&KnowledgeEntry> {
        self.entries.iter().find(|e| e.kind == kind)
    }

    /// Exact lookup by canonical key or alias. No normalization.
    pub fn lookup(&self, key: &str) -> Option<&KnowledgeEntry> {
        ResourceKind::from_key(key).and_then(|kind| self.get(kind))
    }

    /// Examples for the best match of `kind`, empty when nothing matches.
    pub fn examples(&self, kind: &str) -> &[&'static str] {
        self.matched(kind).map(|e| e.examples).unwrap_or_default()
    }

    /// Advisories for the best match of `kind`, empty when nothing matches.
    pub fn advisories(&self, kind: &str) -> &[&'static str] {
        self.matched(kind).map(|e| e.advisories).unwrap_or_default()
    }

    fn matched(&self, kind: &str) -> Option<&KnowledgeEntry> {
        ResourceMatcher::new(self)
            .match_kind(kind)
            .and_then(|k| self.get(k))
    }
}

/// Check that a template is well formed and only references declared names.
fn validate_entry(renderer: &TemplateRenderer, entry: &KnowledgeEntry) -> KbResult<()> {
    let outline = renderer
        .validate(entry.template)
        .map_err(|source| KbError::InvalidTemplate {
            kind: entry.kind,
            source,
        })?;

    // Top-level scalars must always resolve: the name or a defaulted attribute.
    for scalar in &outline.scalars {
        if scalar != reserved::NAME && !entry.requires(scalar) {
            return Err(KbError::UndeclaredPlaceholder {
                kind: entry.kind,
                placeholder: scalar.clone(),
            });
        }
    }

    for block in &outline.blocks {
        if !entry.declares(&block.name) && !reserved::is_container_key(&block.name) {
            return Err(KbError::UndeclaredBlock {
                kind: entry.kind,
                block: block.name.clone(),
            });
        }
        for scalar in &block.scalars {
            let known = scalar == reserved::NAME
                || entry.declares(scalar)
                || reserved::is_container_key(scalar);
            if !known {
                return Err(KbError::UndeclaredPlaceholder {
                    kind: entry.kind,
                    placeholder: scalar.clone(),
                });
            }
        }
    }

    Ok(())
}
