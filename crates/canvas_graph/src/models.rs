//! Data models for diagram graphs and saved projects.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Coarse grouping shown in the editor palette. Informational only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum NodeCategory {
    Network,
    Compute,
    Storage,
    Database,
    Security,
    Integration,
    #[serde(other)]
    Other,
}

impl NodeCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeCategory::Network => "network",
            NodeCategory::Compute => "compute",
            NodeCategory::Storage => "storage",
            NodeCategory::Database => "database",
            NodeCategory::Security => "security",
            NodeCategory::Integration => "integration",
            NodeCategory::Other => "other",
        }
    }
}

impl std::fmt::Display for NodeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One component on the diagram.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Caller-supplied identifier. Graph files may leave it out.
    #[serde(default)]
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<NodeCategory>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, Value>,
    #[serde(default, alias = "parentNode", skip_serializing_if = "Option::is_none")]
    pub container_id: Option<String>,
}

impl Node {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind: None,
            category: None,
            attributes: BTreeMap::new(),
            container_id: None,
        }
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn with_category(mut self, category: NodeCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }

    pub fn with_container(mut self, container_id: impl Into<String>) -> Self {
        self.container_id = Some(container_id.into());
        self
    }
}

/// A directed connection: `source` needs to reach `target`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Edge {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub source: String,
    pub target: String,
}

impl Edge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: None,
            source: source.into(),
            target: target.into(),
        }
    }
}

/// Nodes and edges as drawn.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Graph {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl Graph {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    /// Find a node by id.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Saved project record, stored exactly as given.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub name: String,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub generated_text: String,
}

impl Project {
    pub fn new(name: impl Into<String>, graph: Graph, generated_text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: graph.nodes,
            edges: graph.edges,
            generated_text: generated_text.into(),
        }
    }

    /// The project's nodes and edges as a graph.
    pub fn graph(&self) -> Graph {
        Graph::new(self.nodes.clone(), self.edges.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_node_accepts_editor_field_names() {
        let node: Node = serde_json::from_value(json!({
            "id": "n1",
            "label": "Web Server",
            "kind": "ec2",
            "category": "compute",
            "attributes": {"instance_type": "t3.small"},
            "parentNode": "vpc1"
        }))
        .unwrap();

        assert_eq!(node.container_id.as_deref(), Some("vpc1"));
        assert_eq!(node.category, Some(NodeCategory::Compute));
        assert_eq!(node.attributes["instance_type"], json!("t3.small"));
    }

    #[test]
    fn test_unknown_category_is_other() {
        let node: Node =
            serde_json::from_value(json!({"label": "x", "category": "analytics"})).unwrap();
        assert_eq!(node.category, Some(NodeCategory::Other));
        assert!(node.id.is_empty());
    }

    #[test]
    fn test_project_uses_collaborator_field_names() {
        let project = Project::new("demo", Graph::default(), "# text");
        let value = serde_json::to_value(&project).unwrap();
        assert_eq!(
            value,
            json!({"name": "demo", "nodes": [], "edges": [], "generatedText": "# text"})
        );
    }

    #[test]
    fn test_graph_node_lookup() {
        let graph = Graph::new(
            vec![Node::new("a", "A"), Node::new("b", "B")],
            vec![Edge::new("a", "b")],
        );
        assert_eq!(graph.node("b").map(|n| n.label.as_str()), Some("B"));
        assert!(graph.node("c").is_none());
    }
}
