//! # canvas_kb
//!
//! The resource knowledge base for CloudCanvas.
//!
//! ## Features
//!
//! - Built-in Terraform templates for the supported AWS resource kinds
//! - Template validation at load time, so authoring bugs fail fast
//! - Exact and fuzzy matching of editor kind strings
//! - Kind-aware defaults for missing required attributes
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use canvas_kb::{DefaultSynthesizer, FixedClock, KnowledgeBase, ResourceMatcher};
//! use canvas_templates::TemplateData;
//!
//! let kb = KnowledgeBase::load().unwrap();
//! let kind = ResourceMatcher::new(&kb).match_kind("vendor_instance").unwrap();
//!
//! let synth = DefaultSynthesizer::new(Arc::new(FixedClock(0)));
//! let entry = kb.get(kind).unwrap();
//! let data = synth.fill_defaults(entry, "web_server", &TemplateData::new());
//! assert_eq!(data["instance_type"], "t3.micro");
//! ```

pub mod catalog;
pub mod defaults;
pub mod error;
pub mod kind;
pub mod knowledge;
pub mod matcher;

pub use defaults::{
    database_port, Clock, DefaultSynthesizer, FixedClock, SystemClock, DEFAULT_ENGINE, DEFAULT_VPC_CIDR,
};
pub use error::{KbError, KbResult};
pub use kind::ResourceKind;
pub use knowledge::{reserved, KnowledgeBase, KnowledgeEntry};
pub use matcher::{NodeKind, ResourceMatcher};
