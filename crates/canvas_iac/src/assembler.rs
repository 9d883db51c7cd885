//! Assembly of fragments into one Terraform document.

use canvas_kb::ResourceKind;

use crate::fragment::{comment_safe, Fragment};
use crate::profile::{hcl_string, DocumentProfile};
use crate::resolve::ResolvedGraph;

/// Heading above the edge-derived fragments.
pub const NETWORKING_HEADING: &str = "# Networking Resources based on Connections";

/// Hint written when the graph has no nodes.
pub const EMPTY_HINT: &str = "# Your infrastructure code will appear here...";

/// A list output over every resource of one kind.
struct KindOutput {
    name: &'static str,
    description: &'static str,
    kind: ResourceKind,
    attribute: &'static str,
}

const KIND_OUTPUTS: &[KindOutput] = &[
    KindOutput {
        name: "lambda_function_arns",
        description: "ARNs of the Lambda functions",
        kind: ResourceKind::LambdaFunction,
        attribute: "arn",
    },
    KindOutput {
        name: "lambda_function_names",
        description: "Names of the Lambda functions",
        kind: ResourceKind::LambdaFunction,
        attribute: "function_name",
    },
    KindOutput {
        name: "instance_ids",
        description: "IDs of the EC2 instances",
        kind: ResourceKind::Instance,
        attribute: "id",
    },
    KindOutput {
        name: "vpc_ids",
        description: "IDs of the VPCs",
        kind: ResourceKind::Vpc,
        attribute: "id",
    },
    KindOutput {
        name: "db_endpoints",
        description: "Connection endpoints of the RDS instances",
        kind: ResourceKind::DbInstance,
        attribute: "endpoint",
    },
    KindOutput {
        name: "bucket_names",
        description: "Names of the S3 buckets",
        kind: ResourceKind::S3Bucket,
        attribute: "bucket",
    },
    KindOutput {
        name: "load_balancer_dns_names",
        description: "DNS names of the load balancers",
        kind: ResourceKind::LoadBalancer,
        attribute: "dns_name",
    },
];

/// Wraps fragments with the provider boilerplate, variables and outputs.
#[derive(Debug, Clone, Default)]
pub struct DocumentAssembler {
    profile: DocumentProfile,
}

impl DocumentAssembler {
    pub fn new(profile: DocumentProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &DocumentProfile {
        &self.profile
    }

    /// Build the document. Node fragments come first, in the order given,
    /// then edge fragments under [`NETWORKING_HEADING`], then outputs.
    pub fn assemble(&self, fragments: &[Fragment], graph: &ResolvedGraph<'_>) -> String {
        let mut doc = self.boilerplate();

        if graph.is_empty() {
            doc.push_str(EMPTY_HINT);
            doc.push('\n');
            return doc;
        }

        for fragment in fragments.iter().filter(|f| f.class.is_node()) {
            doc.push_str(&fragment.text);
            doc.push('\n');
        }

        let mut edge_fragments = fragments.iter().filter(|f| !f.class.is_node()).peekable();
        if edge_fragments.peek().is_some() {
            doc.push_str(NETWORKING_HEADING);
            doc.push('\n');
            for fragment in edge_fragments {
                doc.push_str(&fragment.text);
                doc.push('\n');
            }
        }

        doc.push_str(&outputs(graph));
        doc
    }

    fn boilerplate(&self) -> String {
        let p = &self.profile;
        format!(
            r#"# Generated by CloudCanvas
# Terraform configuration for {app_comment} ({env_comment})

terraform {{
  required_providers {{
    aws = {{
      source  = "hashicorp/aws"
      version = {provider_version}
    }}
  }}

  required_version = {terraform_version}
}}

provider "aws" {{
  region = var.aws_region

  default_tags {{
    tags = {{
      Environment = var.environment
      Application = var.application_name
      ManagedBy   = "CloudCanvas"
      Terraform   = "true"
    }}
  }}
}}

# Variables
variable "environment" {{
  description = "Environment name (dev/staging/prod)"
  type        = string
  default     = {env}
}}

variable "application_name" {{
  description = "Application name"
  type        = string
  default     = {app}
}}

variable "aws_region" {{
  description = "AWS region"
  type        = string
  default     = {region}
}}

variable "public_key" {{
  description = "Public key for SSH access"
  type        = string
}}

variable "db_password" {{
  description = "Database password"
  type        = string
  sensitive   = true
}}

variable "allowed_origins" {{
  description = "Allowed origins for CORS"
  type        = list(string)
  default     = {origins}
}}

variable "vpc_id" {{
  description = "Existing VPC ID, when not managed here"
  type        = string
  default     = null
}}

variable "vpc_cidr_block" {{
  description = "CIDR block of an existing VPC"
  type        = string
  default     = null
}}

"#,
            app_comment = comment_safe(&p.application_name),
            env_comment = comment_safe(&p.environment),
            app = hcl_string(&p.application_name),
            env = hcl_string(&p.environment),
            region = hcl_string(&p.region),
            origins = p.allowed_origins_literal(),
            provider_version = hcl_string(&p.provider_version),
            terraform_version = hcl_string(&p.terraform_version),
        )
    }
}

fn outputs(graph: &ResolvedGraph<'_>) -> String {
    let mut out = String::from(
        r#"# Outputs
output "environment" {
  description = "The deployment environment"
  value       = var.environment
}

output "application_name" {
  description = "The application name"
  value       = var.application_name
}
"#,
    );

    for output in KIND_OUTPUTS {
        let mut identifiers: Vec<&str> = Vec::new();
        for resolved in graph.emission_order() {
            if resolved.kind.known() == Some(output.kind)
                && !identifiers.contains(&resolved.identifier.as_str())
            {
                identifiers.push(&resolved.identifier);
            }
        }
        if identifiers.is_empty() {
            continue;
        }

        let values = identifiers
            .iter()
            .map(|id| format!("{}.{}.{}", output.kind, id, output.attribute))
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&format!(
            "\noutput \"{}\" {{\n  description = \"{}\"\n  value       = [{}]\n}}\n",
            output.name, output.description, values
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifier::IdentifierPolicy;
    use canvas_graph::Node;
    use canvas_kb::KnowledgeBase;

    #[test]
    fn test_empty_graph_is_boilerplate_with_hint() {
        let kb = KnowledgeBase::load().unwrap();
        let graph = ResolvedGraph::resolve(&kb, &[], IdentifierPolicy::Preserve);
        let doc = DocumentAssembler::default().assemble(&[], &graph);

        assert!(doc.contains("required_version = \">= 1.8\""));
        assert!(doc.contains("variable \"db_password\""));
        assert!(doc.contains("default     = [\"*\"]"));
        assert!(doc.ends_with(&format!("{}\n", EMPTY_HINT)));
        assert!(!doc.contains("# Outputs"));
    }

    #[test]
    fn test_outputs_list_present_kinds_once() {
        let kb = KnowledgeBase::load().unwrap();
        let nodes = vec![
            Node::new("a", "Api").with_kind("lambda"),
            Node::new("b", "Api").with_kind("lambda"),
            Node::new("c", "Files").with_kind("s3"),
        ];
        let graph = ResolvedGraph::resolve(&kb, &nodes, IdentifierPolicy::Preserve);
        let out = outputs(&graph);

        assert!(out.contains("value       = [aws_lambda_function.api.arn]"));
        assert!(out.contains("value       = [aws_lambda_function.api.function_name]"));
        assert!(out.contains("value       = [aws_s3_bucket.files.bucket]"));
        assert!(!out.contains("instance_ids"));
    }

    #[test]
    fn test_profile_values_reach_variables() {
        let profile = DocumentProfile::default()
            .with_environment("prod")
            .with_region("eu-central-1");
        let kb = KnowledgeBase::load().unwrap();
        let graph = ResolvedGraph::resolve(&kb, &[], IdentifierPolicy::Preserve);
        let doc = DocumentAssembler::new(profile).assemble(&[], &graph);

        assert!(doc.contains("default     = \"prod\""));
        assert!(doc.contains("default     = \"eu-central-1\""));
    }

    #[test]
    fn test_profile_values_are_escaped() {
        let profile = DocumentProfile::default()
            .with_environment("qa\" }\nbad {")
            .with_application_name("shop");
        let kb = KnowledgeBase::load().unwrap();
        let graph = ResolvedGraph::resolve(&kb, &[], IdentifierPolicy::Preserve);
        let doc = DocumentAssembler::new(profile).assemble(&[], &graph);

        assert!(doc.contains("# Terraform configuration for shop (qa\" }\\nbad {)\n"));
        assert!(doc.contains("default     = \"qa\\\" }\\nbad {\"\n"));
        assert!(!doc.contains("\nbad {"));
    }
}
