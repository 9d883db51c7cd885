//! Graph file writing utilities.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::GraphResult;
use crate::models::Graph;
use crate::reader::GraphFormat;

/// Writer for graph files.
pub struct GraphWriter;

impl GraphWriter {
    /// Write a graph, choosing JSON or YAML from the file extension.
    pub fn write(path: impl AsRef<Path>, graph: &Graph) -> GraphResult<()> {
        let path = path.as_ref();
        let format = GraphFormat::from_path(path)?;
        debug!("Writing graph to {:?}", path);

        let content = match format {
            GraphFormat::Json => serde_json::to_string_pretty(graph)?,
            GraphFormat::Yaml => serde_yaml::to_string(graph)?,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        Ok(())
    }
}
