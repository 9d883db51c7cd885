//! # canvas_iac
//!
//! Diagram-to-Terraform generation for CloudCanvas.
//!
//! This crate turns typed nodes and directed connections into one Terraform
//! document. Missing required values are synthesized and security group rules
//! are inferred from edges.
//!
//! ## Features
//!
//! - Container-first emission, one fragment per node
//! - Commented placeholders for nodes with no recognised kind
//! - Security group rules for known source/target pairs
//! - Provider boilerplate, variables and per-kind outputs
//! - Export to `main.tf`
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use canvas_graph::{Edge, Node};
//! use canvas_iac::{DocumentProfile, TerraformGenerator};
//! use canvas_kb::{FixedClock, KnowledgeBase};
//!
//! let kb = Arc::new(KnowledgeBase::load().unwrap());
//! let generator = TerraformGenerator::new(kb)
//!     .with_clock(Arc::new(FixedClock(0)))
//!     .with_profile(DocumentProfile::default().with_environment("staging"));
//!
//! let nodes = vec![
//!     Node::new("net", "Main").with_kind("vpc"),
//!     Node::new("web", "Web Server").with_kind("ec2").with_container("net"),
//!     Node::new("db", "Orders").with_kind("rds"),
//! ];
//! let edges = vec![Edge::new("web", "db")];
//!
//! let text = generator.generate(&nodes, &edges);
//! TerraformGenerator::export("./infra", &text).unwrap();
//! ```

pub mod assembler;
pub mod emitter;
pub mod error;
pub mod fragment;
pub mod generator;
pub mod identifier;
pub mod network;
pub mod profile;
pub mod resolve;

pub use assembler::{DocumentAssembler, EMPTY_HINT, NETWORKING_HEADING};
pub use emitter::{ResourceEmitter, PLACEHOLDER_MARKER};
pub use error::{IacError, IacResult};
pub use fragment::{Fragment, FragmentClass, FragmentOrigin};
pub use generator::{TerraformGenerator, ENTRY_POINT_FILE};
pub use identifier::{derive_identifier, IdentifierAllocator, IdentifierPolicy};
pub use network::{NetworkInference, Pairing};
pub use profile::DocumentProfile;
pub use resolve::{ResolvedGraph, ResolvedNode};
