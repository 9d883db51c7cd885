//! Graph file reading utilities.

use std::fs;
use std::path::Path;

use tracing::debug;
use uuid::Uuid;

use crate::error::{GraphError, GraphResult};
use crate::models::Graph;

/// Serialization format of a graph file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphFormat {
    Json,
    Yaml,
}

impl GraphFormat {
    /// Detect the format from a file extension.
    pub fn from_path(path: &Path) -> GraphResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(GraphFormat::Json),
            Some("yaml") | Some("yml") => Ok(GraphFormat::Yaml),
            _ => Err(GraphError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Reader for graph files.
pub struct GraphReader;

impl GraphReader {
    /// Read a graph from a `.json`, `.yaml` or `.yml` file.
    pub fn read(path: impl AsRef<Path>) -> GraphResult<Graph> {
        let path = path.as_ref();
        let format = GraphFormat::from_path(path)?;
        debug!("Reading graph from {:?}", path);

        let content = fs::read_to_string(path)?;
        Self::parse(&content, format)
    }

    /// Parse graph content, assigning ids to nodes that have none.
    pub fn parse(content: &str, format: GraphFormat) -> GraphResult<Graph> {
        let mut graph: Graph = match format {
            GraphFormat::Json => serde_json::from_str(content)?,
            GraphFormat::Yaml => serde_yaml::from_str(content)?,
        };

        for node in graph.nodes.iter_mut().filter(|n| n.id.is_empty()) {
            node.id = Uuid::new_v4().to_string();
            debug!("Assigned id {} to node '{}'", node.id, node.label);
        }

        Ok(graph)
    }
}
