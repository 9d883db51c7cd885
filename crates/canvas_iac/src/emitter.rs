//! Dependency-ordered emission of per-node fragments.

use serde_json::{json, Value};
use tracing::{debug, warn};

use canvas_graph::{Edge, Node};
use canvas_kb::{reserved, DefaultSynthesizer, KnowledgeBase, DEFAULT_VPC_CIDR};
use canvas_templates::{TemplateData, TemplateRenderer};

use crate::fragment::{comment_safe, Fragment, FragmentClass};
use crate::identifier::IdentifierPolicy;
use crate::resolve::{ResolvedGraph, ResolvedNode};

/// Marker closing every placeholder fragment.
pub const PLACEHOLDER_MARKER: &str = "# TODO: Add proper Terraform configuration";

/// Turns nodes into fragments, containers first.
#[derive(Debug, Clone)]
pub struct ResourceEmitter<'a> {
    kb: &'a KnowledgeBase,
    synthesizer: &'a DefaultSynthesizer,
    renderer: TemplateRenderer,
    policy: IdentifierPolicy,
}

impl<'a> ResourceEmitter<'a> {
    pub fn new(kb: &'a KnowledgeBase, synthesizer: &'a DefaultSynthesizer) -> Self {
        Self {
            kb,
            synthesizer,
            renderer: TemplateRenderer::new(),
            policy: IdentifierPolicy::default(),
        }
    }

    pub fn with_identifier_policy(mut self, policy: IdentifierPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// One fragment per node. Edges do not influence ordering.
    pub fn emit(&self, nodes: &[Node], _edges: &[Edge]) -> Vec<Fragment> {
        let graph = ResolvedGraph::resolve(self.kb, nodes, self.policy);
        self.emit_resolved(&graph)
    }

    /// Emit fragments for an already resolved graph.
    pub fn emit_resolved(&self, graph: &ResolvedGraph<'_>) -> Vec<Fragment> {
        graph
            .emission_order()
            .map(|resolved| self.emit_node(resolved, graph))
            .collect()
    }

    fn emit_node(&self, resolved: &ResolvedNode<'_>, graph: &ResolvedGraph<'_>) -> Fragment {
        let entry = resolved.kind.known().and_then(|kind| self.kb.get(kind));
        let Some(entry) = entry else {
            warn!(
                "No template for node '{}' of kind '{}'",
                resolved.node.label,
                resolved.kind.describe()
            );
            return Fragment::for_node(
                resolved.node.id.clone(),
                FragmentClass::Placeholder,
                placeholder_text(resolved),
            );
        };

        let mut supplied: TemplateData = resolved.node.attributes.clone();
        supplied.insert(reserved::NAME.to_string(), json!(resolved.identifier));

        let mut data = self
            .synthesizer
            .fill_defaults(entry, &resolved.identifier, &supplied);
        for (key, value) in container_data(resolved, graph) {
            data.insert(key.to_string(), value);
        }

        debug!(
            "Rendering {} as {}.{}",
            resolved.node.id, entry.kind, resolved.identifier
        );
        Fragment::for_node(
            resolved.node.id.clone(),
            FragmentClass::Resource,
            self.renderer.render(entry.template, &data),
        )
    }
}

/// Container keys for a node placed inside a grouping node of the graph.
fn container_data(
    resolved: &ResolvedNode<'_>,
    graph: &ResolvedGraph<'_>,
) -> Vec<(&'static str, Value)> {
    let Some(id) = resolved.node.container_id.as_deref() else {
        return Vec::new();
    };
    let container = Some(id)
        .filter(|id| *id != resolved.node.id)
        .and_then(|id| graph.find(id))
        .filter(|container| container.kind.is_grouping());

    let Some(container) = container else {
        debug!(
            "Treating node {} as unattached, container '{}' is not a network",
            resolved.node.id, id
        );
        return Vec::new();
    };

    let cidr = container
        .node
        .attributes
        .get("cidr_block")
        .cloned()
        .unwrap_or_else(|| json!(DEFAULT_VPC_CIDR));
    vec![
        (reserved::CONTAINER_NAME, json!(container.identifier)),
        (reserved::CONTAINER_CIDR_BLOCK, cidr),
    ]
}

fn placeholder_text(resolved: &ResolvedNode<'_>) -> String {
    let configuration = serde_json::to_string_pretty(&resolved.node.attributes)
        .unwrap_or_else(|_| "{}".to_string());

    let mut text = format!(
        "# Resource: {}\n# Type: {}\n# Configuration:\n",
        comment_safe(&resolved.node.label),
        comment_safe(resolved.kind.describe())
    );
    for line in configuration.lines() {
        text.push_str("#   ");
        text.push_str(line);
        text.push('\n');
    }
    text.push_str(PLACEHOLDER_MARKER);
    text.push('\n');
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use canvas_kb::FixedClock;
    use std::sync::Arc;

    fn setup() -> (KnowledgeBase, DefaultSynthesizer) {
        (
            KnowledgeBase::load().unwrap(),
            DefaultSynthesizer::new(Arc::new(FixedClock(1))),
        )
    }

    #[test]
    fn test_placeholder_for_unknown_kind() {
        let (kb, synth) = setup();
        let emitter = ResourceEmitter::new(&kb, &synth);
        let nodes = vec![Node::new("w", "Gizmo")
            .with_kind("unknown_widget")
            .with_attribute("size", json!(3))];

        let fragments = emitter.emit(&nodes, &[]);
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].class, FragmentClass::Placeholder);
        assert_eq!(
            fragments[0].text,
            "# Resource: Gizmo\n# Type: unknown_widget\n# Configuration:\n#   {\n#     \"size\": 3\n#   }\n# TODO: Add proper Terraform configuration\n"
        );
    }

    #[test]
    fn test_placeholder_without_kind() {
        let (kb, synth) = setup();
        let emitter = ResourceEmitter::new(&kb, &synth);
        let fragments = emitter.emit(&[Node::new("x", "Thing")], &[]);

        assert!(fragments[0].text.contains("# Type: unknown\n"));
        assert!(fragments[0].text.contains("#   {}\n"));
    }

    #[test]
    fn test_name_cannot_be_overridden() {
        let (kb, synth) = setup();
        let emitter = ResourceEmitter::new(&kb, &synth);
        let nodes = vec![Node::new("b", "Assets")
            .with_kind("s3")
            .with_attribute("name", json!("other"))];

        let text = &emitter.emit(&nodes, &[])[0].text;
        assert!(text.contains("resource \"aws_s3_bucket\" \"assets\""));
        assert!(!text.contains("\"other\""));
    }

    #[test]
    fn test_container_keys_from_grouping_node() {
        let (kb, synth) = setup();
        let emitter = ResourceEmitter::new(&kb, &synth);
        let nodes = vec![
            Node::new("fn", "Api").with_kind("lambda").with_container("net"),
            Node::new("net", "Core Net").with_kind("vpc"),
        ];

        let fragments = emitter.emit(&nodes, &[]);
        assert_eq!(fragments[0].node_id(), Some("net"));
        let lambda = &fragments[1].text;
        assert!(lambda.contains("aws_subnet.core_net_private_1.id"));
        assert!(lambda.contains("cidr_blocks = [\"10.0.0.0/16\"]"));
    }

    #[test]
    fn test_self_and_dangling_containers_are_ignored() {
        let (kb, synth) = setup();
        let emitter = ResourceEmitter::new(&kb, &synth);
        let nodes = vec![
            Node::new("a", "A").with_kind("ec2").with_container("a"),
            Node::new("b", "B").with_kind("ec2").with_container("missing"),
        ];

        for fragment in emitter.emit(&nodes, &[]) {
            assert!(!fragment.text.contains("subnet_id"));
            assert!(!fragment.text.contains("{{"));
        }
    }

    #[test]
    fn test_non_network_container_is_ignored() {
        let (kb, synth) = setup();
        let emitter = ResourceEmitter::new(&kb, &synth);
        let nodes = vec![
            Node::new("web", "Web").with_kind("ec2"),
            Node::new("fn", "Worker").with_kind("lambda").with_container("web"),
            Node::new("odd", "Gizmo").with_kind("unknown_widget"),
            Node::new("db", "Store").with_kind("rds").with_container("odd"),
        ];

        let fragments = emitter.emit(&nodes, &[]);
        let lambda = &fragments[1].text;
        assert!(lambda.contains("resource \"aws_lambda_function\" \"worker\""));
        assert!(!lambda.contains("aws_vpc.web"));
        assert!(!lambda.contains("aws_subnet.web_private_1"));
        assert!(!lambda.contains("vpc_config"));

        let db = &fragments[3].text;
        assert!(!db.contains("aws_vpc."));
        assert!(!db.contains("aws_subnet."));
    }

    #[test]
    fn test_placeholder_keeps_multiline_label_commented() {
        let (kb, synth) = setup();
        let emitter = ResourceEmitter::new(&kb, &synth);
        let nodes =
            vec![Node::new("w", "Gizmo\nresource \"x\" \"y\" {").with_kind("unknown_widget\noops")];

        let text = &emitter.emit(&nodes, &[])[0].text;
        assert!(text.contains("# Resource: Gizmo\\nresource \"x\" \"y\" {\n"));
        assert!(text.contains("# Type: unknown_widget\\noops\n"));
        for line in text.lines() {
            assert!(line.starts_with('#'), "uncommented line: {}", line);
        }
    }
}
