//! Security group rules inferred from graph edges.

use serde_json::{json, Value};
use tracing::debug;

use canvas_graph::{Edge, Node};
use canvas_kb::{database_port, KnowledgeBase, ResourceKind, DEFAULT_ENGINE};
use canvas_templates::{TemplateData, TemplateRenderer};

use crate::fragment::{comment_safe, Fragment, FragmentClass};
use crate::identifier::IdentifierPolicy;
use crate::resolve::{ResolvedGraph, ResolvedNode};

/// Application port assumed for compute targets.
pub const APPLICATION_PORT: u16 = 8080;

/// Port opened from a load balancer to its targets.
pub const HTTP_PORT: u16 = 80;

const RULE_TEMPLATE: &str = r#"resource "aws_security_group_rule" "{{rule_name}}" {
  type                     = "ingress"
  security_group_id        = aws_security_group.{{target}}_sg.id
  source_security_group_id = aws_security_group.{{source}}_sg.id
  protocol                 = "tcp"
  from_port                = {{port}}
  to_port                  = {{port}}
  description              = "{{description}}"
}
"#;

/// Source and target kinds that have a known rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pairing {
    FunctionToInstance,
    FunctionToDatabase,
    InstanceToDatabase,
    LoadBalancerToInstance,
}

impl Pairing {
    /// Classify a source/target pair. First matching pairing wins.
    pub fn classify(source: ResourceKind, target: ResourceKind) -> Option<Self> {
        use ResourceKind::*;
        match (source, target) {
            (LambdaFunction, Instance) => Some(Pairing::FunctionToInstance),
            (LambdaFunction, DbInstance) => Some(Pairing::FunctionToDatabase),
            (Instance, DbInstance) => Some(Pairing::InstanceToDatabase),
            (LoadBalancer, Instance) => Some(Pairing::LoadBalancerToInstance),
            _ => None,
        }
    }
}

/// One ingress rule to render.
#[derive(Debug, Clone, PartialEq, Eq)]
struct IngressRule {
    rule_name: String,
    port: u16,
    description: String,
}

/// Derives networking fragments from edges.
#[derive(Debug, Clone)]
pub struct NetworkInference<'a> {
    kb: &'a KnowledgeBase,
    renderer: TemplateRenderer,
    policy: IdentifierPolicy,
}

impl<'a> NetworkInference<'a> {
    pub fn new(kb: &'a KnowledgeBase) -> Self {
        Self {
            kb,
            renderer: TemplateRenderer::new(),
            policy: IdentifierPolicy::default(),
        }
    }

    pub fn with_identifier_policy(mut self, policy: IdentifierPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// One fragment per edge whose endpoints both exist.
    pub fn infer_all(&self, nodes: &[Node], edges: &[Edge]) -> Vec<Fragment> {
        let graph = ResolvedGraph::resolve(self.kb, nodes, self.policy);
        self.infer_resolved(&graph, edges)
    }

    /// Infer fragments for an already resolved graph.
    pub fn infer_resolved(&self, graph: &ResolvedGraph<'_>, edges: &[Edge]) -> Vec<Fragment> {
        edges
            .iter()
            .filter_map(|edge| match (graph.find(&edge.source), graph.find(&edge.target)) {
                (Some(source), Some(target)) => Some(self.infer(edge, source, target)),
                _ => {
                    debug!("Skipping dangling edge {} -> {}", edge.source, edge.target);
                    None
                }
            })
            .collect()
    }

    /// Fragment for one edge between two resolved nodes.
    pub fn infer(
        &self,
        edge: &Edge,
        source: &ResolvedNode<'_>,
        target: &ResolvedNode<'_>,
    ) -> Fragment {
        let pairing = source
            .kind
            .known()
            .zip(target.kind.known())
            .and_then(|(s, t)| Pairing::classify(s, t));

        let Some(pairing) = pairing else {
            return Fragment::for_edge(
                edge.source.clone(),
                edge.target.clone(),
                FragmentClass::DeferredRule,
                deferred_text(source, target),
            );
        };

        let mut text = format!(
            "# Security Group Rules for connection from {} to {}\n",
            source.identifier, target.identifier
        );
        for rule in rules_for(pairing, source, target) {
            text.push_str(&self.render_rule(&rule, source, target));
            text.push('\n');
        }

        Fragment::for_edge(
            edge.source.clone(),
            edge.target.clone(),
            FragmentClass::Rule,
            text,
        )
    }

    fn render_rule(
        &self,
        rule: &IngressRule,
        source: &ResolvedNode<'_>,
        target: &ResolvedNode<'_>,
    ) -> String {
        let data: TemplateData = [
            ("rule_name", json!(rule.rule_name)),
            ("source", json!(source.identifier)),
            ("target", json!(target.identifier)),
            ("port", json!(rule.port)),
            ("description", json!(rule.description)),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

        self.renderer.render(RULE_TEMPLATE, &data)
    }
}

fn rules_for(
    pairing: Pairing,
    source: &ResolvedNode<'_>,
    target: &ResolvedNode<'_>,
) -> Vec<IngressRule> {
    let base = format!("{}_from_{}_ingress", target.identifier, source.identifier);
    let app_rule = |port: u16, description: String| IngressRule {
        rule_name: base.clone(),
        port,
        description,
    };
    let db_port = || database_port(target_engine(target));

    match pairing {
        Pairing::FunctionToInstance => vec![app_rule(
            APPLICATION_PORT,
            format!("Allow traffic from {} to {}", source.identifier, target.identifier),
        )],
        Pairing::FunctionToDatabase => vec![
            app_rule(
                APPLICATION_PORT,
                format!("Allow traffic from {} to {}", source.identifier, target.identifier),
            ),
            IngressRule {
                rule_name: format!("{}_db", base),
                port: db_port(),
                description: format!("Allow DB traffic from {}", source.identifier),
            },
        ],
        Pairing::InstanceToDatabase => vec![app_rule(
            db_port(),
            format!("Allow DB traffic from {}", source.identifier),
        )],
        Pairing::LoadBalancerToInstance => vec![app_rule(
            HTTP_PORT,
            format!("Allow HTTP traffic from load balancer {}", source.identifier),
        )],
    }
}

fn target_engine<'n>(target: &'n ResolvedNode<'_>) -> &'n str {
    target
        .node
        .attributes
        .get("engine")
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_ENGINE)
}

fn deferred_text(source: &ResolvedNode<'_>, target: &ResolvedNode<'_>) -> String {
    format!(
        "# Connection from {} to {} - Manual configuration may be needed\n# Connection type: {} -> {}\n",
        source.identifier,
        target.identifier,
        comment_safe(source.kind.describe()),
        comment_safe(target.kind.describe())
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kb() -> KnowledgeBase {
        KnowledgeBase::load().unwrap()
    }

    #[test]
    fn test_rule_template_is_well_formed() {
        let outline = TemplateRenderer::new().validate(RULE_TEMPLATE).unwrap();
        assert!(outline.blocks.is_empty());
        assert_eq!(
            outline.scalars,
            vec!["rule_name", "target", "source", "port", "description"]
        );
    }

    #[test]
    fn test_classify_pairs() {
        use ResourceKind::*;
        assert_eq!(
            Pairing::classify(LambdaFunction, DbInstance),
            Some(Pairing::FunctionToDatabase)
        );
        assert_eq!(
            Pairing::classify(LoadBalancer, Instance),
            Some(Pairing::LoadBalancerToInstance)
        );
        assert_eq!(Pairing::classify(Instance, LambdaFunction), None);
        assert_eq!(Pairing::classify(DbInstance, Instance), None);
    }

    #[test]
    fn test_instance_to_mysql_database() {
        let kb = kb();
        let nodes = vec![
            Node::new("w", "Web").with_kind("ec2"),
            Node::new("d", "Orders DB")
                .with_kind("rds")
                .with_attribute("engine", json!("mysql")),
        ];
        let fragments = NetworkInference::new(&kb).infer_all(&nodes, &[Edge::new("w", "d")]);

        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].class, FragmentClass::Rule);
        assert_eq!(
            fragments[0].text,
            r#"# Security Group Rules for connection from web to orders_db
resource "aws_security_group_rule" "orders_db_from_web_ingress" {
  type                     = "ingress"
  security_group_id        = aws_security_group.orders_db_sg.id
  source_security_group_id = aws_security_group.web_sg.id
  protocol                 = "tcp"
  from_port                = 3306
  to_port                  = 3306
  description              = "Allow DB traffic from web"
}

"#
        );
    }

    #[test]
    fn test_function_to_database_adds_db_rule() {
        let kb = kb();
        let nodes = vec![
            Node::new("f", "Api").with_kind("lambda"),
            Node::new("d", "Store").with_kind("aws_db_instance"),
        ];
        let fragments = NetworkInference::new(&kb).infer_all(&nodes, &[Edge::new("f", "d")]);
        let text = &fragments[0].text;

        assert!(text.contains("\"store_from_api_ingress\""));
        assert!(text.contains("\"store_from_api_ingress_db\""));
        assert!(text.contains("from_port                = 8080"));
        assert!(text.contains("from_port                = 5432"));
    }

    #[test]
    fn test_unknown_pair_is_deferred() {
        let kb = kb();
        let nodes = vec![
            Node::new("b", "Assets").with_kind("s3"),
            Node::new("x", "Gizmo").with_kind("unknown_widget"),
        ];
        let fragments = NetworkInference::new(&kb).infer_all(&nodes, &[Edge::new("b", "x")]);

        assert_eq!(fragments[0].class, FragmentClass::DeferredRule);
        assert_eq!(
            fragments[0].text,
            "# Connection from assets to gizmo - Manual configuration may be needed\n# Connection type: aws_s3_bucket -> unknown_widget\n"
        );
    }

    #[test]
    fn test_dangling_edges_are_skipped() {
        let kb = kb();
        let nodes = vec![
            Node::new("lb", "Front").with_kind("alb"),
            Node::new("w", "Web").with_kind("ec2"),
        ];
        let edges = vec![Edge::new("lb", "gone"), Edge::new("lb", "w")];
        let fragments = NetworkInference::new(&kb).infer_all(&nodes, &edges);

        assert_eq!(fragments.len(), 1);
        assert!(fragments[0].text.contains("\"web_from_front_ingress\""));
        assert!(fragments[0].text.contains("from_port                = 80\n"));
    }

    #[test]
    fn test_deferred_kind_with_line_break_stays_commented() {
        let kb = kb();
        let nodes = vec![
            Node::new("b", "Assets").with_kind("s3"),
            Node::new("x", "Gizmo").with_kind("widget\n}"),
        ];
        let fragments = NetworkInference::new(&kb).infer_all(&nodes, &[Edge::new("b", "x")]);
        let text = &fragments[0].text;

        assert_eq!(fragments[0].class, FragmentClass::DeferredRule);
        assert!(text.ends_with("# Connection type: aws_s3_bucket -> widget\\n}\n"));
        assert!(text.lines().all(|line| line.starts_with('#')));
    }
}
