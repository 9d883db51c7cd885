//! Built-in knowledge base content.
//!
//! Templates live next to the crate in `templates/` and are compiled in.

use crate::kind::ResourceKind;
use crate::knowledge::KnowledgeEntry;

/// The built-in entries, in insertion order.
pub fn builtin_entries() -> Vec<KnowledgeEntry> {
    ResourceKind::ALL.into_iter().map(builtin_entry).collect()
}

fn builtin_entry(kind: ResourceKind) -> KnowledgeEntry {
    match kind {
        ResourceKind::Instance => KnowledgeEntry {
            kind,
            template: include_str!("../templates/aws_instance.tf.tmpl"),
            required_attributes: &[
                "instance_type",
                "ami_owner",
                "ami_name_filter",
                "associate_public_ip",
                "monitoring",
                "root_volume_size",
            ],
            optional_attributes: &["key_name"],
            examples: &[r#"resource "aws_instance" "web_server" {
  ami                    = data.aws_ami.web_server_ami.id
  instance_type          = "t3.medium"
  vpc_security_group_ids = [aws_security_group.web_server_sg.id]
  subnet_id              = aws_subnet.main_private_1.id

  root_block_device {
    volume_type = "gp3"
    volume_size = 50
    encrypted   = true
  }
}"#],
            advisories: &[
                "Require IMDSv2 (http_tokens = \"required\")",
                "Encrypt every EBS volume at rest",
                "Prefer gp3 volumes for predictable performance",
                "Place instances in private subnets and reach them through a load balancer",
                "Enable detailed monitoring",
            ],
        },
        ResourceKind::S3Bucket => KnowledgeEntry {
            kind,
            template: include_str!("../templates/aws_s3_bucket.tf.tmpl"),
            required_attributes: &["bucket", "force_destroy", "versioning_status", "sse_algorithm"],
            optional_attributes: &["expiration_days"],
            examples: &[r#"resource "aws_s3_bucket" "assets" {
  bucket = "prod-shop-assets"
}

resource "aws_s3_bucket_versioning" "assets_versioning" {
  bucket = aws_s3_bucket.assets.id

  versioning_configuration {
    status = "Enabled"
  }
}"#],
            advisories: &[
                "Enable versioning for data protection",
                "Enforce encryption at rest",
                "Block public access by default",
                "Use lifecycle rules to expire or tier old objects",
            ],
        },
        ResourceKind::Vpc => KnowledgeEntry {
            kind,
            template: include_str!("../templates/aws_vpc.tf.tmpl"),
            required_attributes: &[
                "cidr_block",
                "enable_dns_hostnames",
                "enable_dns_support",
                "public_cidr_block_1",
                "public_cidr_block_2",
                "private_cidr_block_1",
                "private_cidr_block_2",
            ],
            optional_attributes: &["enable_nat_gateway"],
            examples: &[r#"resource "aws_vpc" "main" {
  cidr_block           = "10.0.0.0/16"
  enable_dns_hostnames = true
  enable_dns_support   = true
}"#],
            advisories: &[
                "Spread subnets across at least two availability zones",
                "Keep workloads in private subnets; expose only load balancers publicly",
                "Use NAT gateways for outbound traffic from private subnets",
                "Plan CIDR ranges so they do not overlap with peered networks",
            ],
        },
        ResourceKind::SecurityGroup => KnowledgeEntry {
            kind,
            template: include_str!("../templates/aws_security_group.tf.tmpl"),
            required_attributes: &[
                "description",
                "ingress_from_port",
                "ingress_to_port",
                "ingress_protocol",
                "ingress_cidr_block",
            ],
            optional_attributes: &[],
            examples: &[r#"resource "aws_security_group" "web" {
  name_prefix = "web-"
  description = "Web tier"
  vpc_id      = aws_vpc.main.id

  ingress {
    from_port   = 443
    to_port     = 443
    protocol    = "tcp"
    cidr_blocks = ["0.0.0.0/0"]
  }
}"#],
            advisories: &[
                "Reference source security groups instead of CIDR ranges where possible",
                "Revoke rules on delete to avoid orphaned rules",
                "Grant the least access each tier needs",
                "Describe every rule",
            ],
        },
        ResourceKind::DbInstance => KnowledgeEntry {
            kind,
            template: include_str!("../templates/aws_db_instance.tf.tmpl"),
            required_attributes: &[
                "identifier",
                "engine",
                "engine_version",
                "instance_class",
                "allocated_storage",
                "max_allocated_storage",
                "storage_type",
                "db_name",
                "username",
                "backup_retention_period",
                "backup_window",
                "maintenance_window",
                "multi_az",
                "skip_final_snapshot",
                "deletion_protection",
                "parameter_group_family",
                "performance_insights_enabled",
            ],
            optional_attributes: &[],
            examples: &[r#"resource "aws_db_instance" "orders" {
  identifier        = "orders"
  engine            = "postgres"
  engine_version    = "15"
  instance_class    = "db.t3.small"
  allocated_storage = 50
  username          = "dbadmin"
  password          = var.db_password
  storage_encrypted = true
}"#],
            advisories: &[
                "Never hardcode the master password; pass it as a sensitive variable",
                "Keep databases out of public subnets",
                "Enable automated backups and deletion protection in production",
                "Use Multi-AZ for production workloads",
                "Enable storage autoscaling with max_allocated_storage",
            ],
        },
        ResourceKind::LambdaFunction => KnowledgeEntry {
            kind,
            template: include_str!("../templates/aws_lambda_function.tf.tmpl"),
            required_attributes: &[
                "function_name",
                "filename",
                "handler",
                "runtime",
                "timeout",
                "memory_size",
                "tracing_mode",
            ],
            optional_attributes: &["enable_function_url"],
            examples: &[r#"resource "aws_lambda_function" "thumbnailer" {
  filename      = "thumbnailer.zip"
  function_name = "thumbnailer"
  role          = aws_iam_role.thumbnailer_exec.arn
  handler       = "index.handler"
  runtime       = "python3.13"
  timeout       = 30
  memory_size   = 256
}"#],
            advisories: &[
                "Give each function its own execution role",
                "Set an explicit CloudWatch log retention",
                "Enable active tracing",
                "Attach functions to private subnets only when they need private resources",
                "Protect function URLs with IAM authorization",
            ],
        },
        ResourceKind::IamRole => KnowledgeEntry {
            kind,
            template: include_str!("../templates/aws_iam_role.tf.tmpl"),
            required_attributes: &[
                "role_name",
                "assume_role_action",
                "assume_role_service",
                "managed_policy_arn",
            ],
            optional_attributes: &["description"],
            examples: &[r#"resource "aws_iam_role" "ci" {
  name = "ci-deployer"

  assume_role_policy = jsonencode({
    Version = "2012-10-17"
    Statement = [{
      Action    = "sts:AssumeRole"
      Effect    = "Allow"
      Principal = { Service = "codebuild.amazonaws.com" }
    }]
  })
}"#],
            advisories: &[
                "Grant least privilege; replace broad managed policies before production",
                "Prefer roles over long-lived access keys",
                "Use permission boundaries for delegated administration",
            ],
        },
        ResourceKind::LoadBalancer => KnowledgeEntry {
            kind,
            template: include_str!("../templates/aws_lb.tf.tmpl"),
            required_attributes: &[
                "load_balancer_type",
                "internal",
                "listener_port",
                "listener_protocol",
                "target_port",
                "health_check_path",
            ],
            optional_attributes: &[],
            examples: &[r#"resource "aws_lb" "public" {
  name               = "prod-public"
  load_balancer_type = "application"
  security_groups    = [aws_security_group.public_sg.id]
  subnets            = [aws_subnet.main_public_1.id, aws_subnet.main_public_2.id]
}"#],
            advisories: &[
                "Terminate TLS at the load balancer with an ACM certificate",
                "Place load balancers in public subnets across two availability zones",
                "Configure health checks that reflect real application health",
            ],
        },
    }
}
