//! # canvas_graph
//!
//! The diagram data model for CloudCanvas.
//!
//! ## Features
//!
//! - Node, edge and graph types matching the editor's JSON shape
//! - Reading and writing graph files as JSON or YAML
//! - A file-backed store for saved projects
//!
//! ## Example
//!
//! ```rust,no_run
//! use canvas_graph::{GraphReader, Project, ProjectStore};
//!
//! let graph = GraphReader::read("diagram.yaml").unwrap();
//! let store = ProjectStore::new(".canvas/projects");
//! store.save(&Project::new("web shop", graph, "")).unwrap();
//! ```

pub mod error;
pub mod models;
pub mod reader;
pub mod store;
pub mod writer;

pub use error::{GraphError, GraphResult};
pub use models::{Edge, Graph, Node, NodeCategory, Project};
pub use reader::{GraphFormat, GraphReader};
pub use store::ProjectStore;
pub use writer::GraphWriter;
