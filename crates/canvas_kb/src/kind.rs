//! Supported resource kinds.

use serde::{Deserialize, Serialize};

/// Every resource kind the knowledge base has a template for.
///
/// The declaration order is the knowledge base insertion order, which is the
/// tie-break order used by fuzzy matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ResourceKind {
    #[serde(rename = "aws_instance")]
    Instance,
    #[serde(rename = "aws_s3_bucket")]
    S3Bucket,
    #[serde(rename = "aws_vpc")]
    Vpc,
    #[serde(rename = "aws_security_group")]
    SecurityGroup,
    #[serde(rename = "aws_db_instance")]
    DbInstance,
    #[serde(rename = "aws_lambda_function")]
    LambdaFunction,
    #[serde(rename = "aws_iam_role")]
    IamRole,
    #[serde(rename = "aws_lb")]
    LoadBalancer,
}

impl ResourceKind {
    /// All kinds in knowledge base order.
    pub const ALL: [ResourceKind; 8] = [
        ResourceKind::Instance,
        ResourceKind::S3Bucket,
        ResourceKind::Vpc,
        ResourceKind::SecurityGroup,
        ResourceKind::DbInstance,
        ResourceKind::LambdaFunction,
        ResourceKind::IamRole,
        ResourceKind::LoadBalancer,
    ];

    /// The Terraform resource type, which is also the canonical key.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Instance => "aws_instance",
            ResourceKind::S3Bucket => "aws_s3_bucket",
            ResourceKind::Vpc => "aws_vpc",
            ResourceKind::SecurityGroup => "aws_security_group",
            ResourceKind::DbInstance => "aws_db_instance",
            ResourceKind::LambdaFunction => "aws_lambda_function",
            ResourceKind::IamRole => "aws_iam_role",
            ResourceKind::LoadBalancer => "aws_lb",
        }
    }

    /// Editor-facing names that select this kind exactly.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            ResourceKind::Instance => &["ec2", "instance"],
            ResourceKind::S3Bucket => &["s3", "bucket", "object-store"],
            ResourceKind::Vpc => &["vpc", "vpcGroup", "network"],
            ResourceKind::SecurityGroup => &["sg", "security_group", "firewall"],
            ResourceKind::DbInstance => &["rds", "database", "managed-database"],
            ResourceKind::LambdaFunction => &["lambda", "function"],
            ResourceKind::IamRole => &["iam", "iam_role", "role"],
            ResourceKind::LoadBalancer => &["elb", "alb", "load_balancer", "load-balancer"],
        }
    }

    /// Exact, case-sensitive parse of a canonical key or alias.
    pub fn from_key(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s || kind.aliases().iter().any(|alias| *alias == s))
    }

    /// Human-readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            ResourceKind::Instance => "EC2 Instance",
            ResourceKind::S3Bucket => "S3 Bucket",
            ResourceKind::Vpc => "VPC",
            ResourceKind::SecurityGroup => "Security Group",
            ResourceKind::DbInstance => "RDS Instance",
            ResourceKind::LambdaFunction => "Lambda Function",
            ResourceKind::IamRole => "IAM Role",
            ResourceKind::LoadBalancer => "Load Balancer",
        }
    }

    /// Whether nodes of this kind contain other nodes and are emitted first.
    pub fn is_grouping(&self) -> bool {
        matches!(self, ResourceKind::Vpc)
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
