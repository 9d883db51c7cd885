//! Synthesis of missing required attributes.

use std::net::Ipv4Addr;
use std::sync::Arc;

use serde_json::{json, Value};
use tracing::trace;

use canvas_templates::TemplateData;

use crate::kind::ResourceKind;
use crate::knowledge::KnowledgeEntry;

/// Address range used when a network does not specify one.
pub const DEFAULT_VPC_CIDR: &str = "10.0.0.0/16";

/// Default database engine.
pub const DEFAULT_ENGINE: &str = "postgres";

/// Source of the current time for generated names.
#[cfg_attr(test, mockall::automock)]
pub trait Clock: Send + Sync {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> i64;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Clock frozen at a given instant, for reproducible output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.0
    }
}

/// Fills required attributes a node did not supply.
#[derive(Clone)]
pub struct DefaultSynthesizer {
    clock: Arc<dyn Clock>,
}

impl Default for DefaultSynthesizer {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl DefaultSynthesizer {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Return `supplied` extended with a value for every missing required
    /// attribute of `entry`. Supplied values are never replaced.
    pub fn fill_defaults(
        &self,
        entry: &KnowledgeEntry,
        resource_name: &str,
        supplied: &TemplateData,
    ) -> TemplateData {
        let mut complete = supplied.clone();

        for field in entry.required_attributes {
            if !complete.contains_key(*field) {
                let value = self.default_for(entry.kind, field, resource_name, supplied);
                trace!("Defaulted {}.{} = {}", resource_name, field, value);
                complete.insert(field.to_string(), value);
            }
        }

        complete
    }

    /// Default for one attribute of one kind.
    pub fn default_for(
        &self,
        kind: ResourceKind,
        field: &str,
        resource_name: &str,
        supplied: &TemplateData,
    ) -> Value {
        match (kind, field) {
            (ResourceKind::S3Bucket, "bucket") => json!(format!(
                "{}-bucket-{}",
                hyphenate(resource_name),
                self.clock.now_millis()
            )),
            (ResourceKind::DbInstance, "identifier") => json!(hyphenate(resource_name)),
            (ResourceKind::DbInstance, "engine_version") => {
                json!(engine_version_for(engine_of(supplied)))
            }
            (ResourceKind::DbInstance, "parameter_group_family") => {
                let engine = engine_of(supplied);
                let version = supplied
                    .get("engine_version")
                    .and_then(Value::as_str)
                    .unwrap_or_else(|| engine_version_for(engine));
                json!(parameter_group_family(engine, version))
            }
            (ResourceKind::LambdaFunction, "function_name") => json!(resource_name),
            (ResourceKind::IamRole, "role_name") => json!(resource_name),
            (ResourceKind::SecurityGroup, "description") => {
                json!(format!("Security group {} managed by CloudCanvas", resource_name))
            }
            (ResourceKind::SecurityGroup, "ingress_cidr_block") => json!(DEFAULT_VPC_CIDR),
            (ResourceKind::Vpc, "public_cidr_block_1") => json!(subnet_cidr(supplied, 1)),
            (ResourceKind::Vpc, "public_cidr_block_2") => json!(subnet_cidr(supplied, 2)),
            (ResourceKind::Vpc, "private_cidr_block_1") => json!(subnet_cidr(supplied, 3)),
            (ResourceKind::Vpc, "private_cidr_block_2") => json!(subnet_cidr(supplied, 4)),
            (_, field) => common_default(field),
        }
    }
}

impl std::fmt::Debug for DefaultSynthesizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefaultSynthesizer").finish_non_exhaustive()
    }
}

fn common_default(field: &str) -> Value {
    match field {
        // Compute
        "instance_type" => json!("t3.micro"),
        "ami_owner" => json!("amazon"),
        "ami_name_filter" => json!("al2023-ami-*-x86_64"),
        "associate_public_ip" => json!(false),
        "monitoring" => json!(true),
        "root_volume_size" => json!(20),

        // Storage
        "force_destroy" => json!(false),
        "versioning_status" => json!("Enabled"),
        "sse_algorithm" => json!("AES256"),

        // Network
        "cidr_block" => json!(DEFAULT_VPC_CIDR),
        "enable_dns_hostnames" | "enable_dns_support" => json!(true),
        "ingress_from_port" | "ingress_to_port" => json!(443),
        "ingress_protocol" => json!("tcp"),

        // Database
        "engine" => json!(DEFAULT_ENGINE),
        "instance_class" => json!("db.t3.micro"),
        "allocated_storage" => json!(20),
        "max_allocated_storage" => json!(100),
        "storage_type" => json!("gp3"),
        "db_name" => json!("mydb"),
        "username" => json!("dbadmin"),
        "backup_retention_period" => json!(7),
        "backup_window" => json!("03:00-04:00"),
        "maintenance_window" => json!("sun:04:00-sun:05:00"),
        "multi_az" => json!(false),
        "skip_final_snapshot" => json!(false),
        "deletion_protection" => json!(true),
        "performance_insights_enabled" => json!(false),

        // Serverless
        "filename" => json!("lambda_function.zip"),
        "handler" => json!("index.handler"),
        "runtime" => json!("python3.13"),
        "timeout" => json!(30),
        "memory_size" => json!(128),
        "tracing_mode" => json!("Active"),

        // Identity
        "assume_role_action" => json!("sts:AssumeRole"),
        "assume_role_service" => json!("ec2.amazonaws.com"),
        "managed_policy_arn" => json!("arn:aws:iam::aws:policy/PowerUserAccess"),

        // Load balancing
        "load_balancer_type" => json!("application"),
        "internal" => json!(false),
        "listener_port" | "target_port" => json!(80),
        "listener_protocol" => json!("HTTP"),
        "health_check_path" => json!("/"),

        _ => json!(""),
    }
}

/// Default listening port for a database engine.
pub fn database_port(engine: &str) -> u16 {
    let engine = engine.to_ascii_lowercase();
    if engine.starts_with("mysql") || engine.starts_with("mariadb") || engine.starts_with("aurora-mysql") {
        3306
    } else if engine.starts_with("oracle") {
        1521
    } else if engine.starts_with("sqlserver") {
        1433
    } else {
        5432
    }
}

fn engine_of(supplied: &TemplateData) -> &str {
    supplied
        .get("engine")
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_ENGINE)
}

fn engine_version_for(engine: &str) -> &'static str {
    match engine {
        "mysql" | "aurora-mysql" => "8.0",
        "mariadb" => "10.11",
        e if e.starts_with("oracle") => "19",
        e if e.starts_with("sqlserver") => "15.00",
        _ => "15",
    }
}

fn parameter_group_family(engine: &str, version: &str) -> String {
    let mut parts = version.split('.');
    let major = parts.next().unwrap_or(version);
    let major_minor = match parts.next() {
        Some(minor) => format!("{}.{}", major, minor),
        None => format!("{}.0", major),
    };

    match engine {
        "postgres" | "aurora-postgresql" => format!("{}{}", engine, major),
        "mysql" | "mariadb" | "aurora-mysql" => format!("{}{}", engine, major_minor),
        _ => format!("{}-{}", engine, major),
    }
}

/// The `index`-th /24 inside the network's range.
///
/// Falls back to `10.0.<index>.0/24` when the range is missing, unparsable or
/// too small to hold a handful of /24 subnets.
fn subnet_cidr(supplied: &TemplateData, index: u32) -> String {
    supplied
        .get("cidr_block")
        .and_then(Value::as_str)
        .and_then(|cidr| carve_slash_24(cidr, index))
        .unwrap_or_else(|| format!("10.0.{}.0/24", index))
}

fn carve_slash_24(cidr: &str, index: u32) -> Option<String> {
    let (addr, prefix) = cidr.split_once('/')?;
    let addr: Ipv4Addr = addr.trim().parse().ok()?;
    let prefix: u32 = prefix.trim().parse().ok()?;
    if prefix > 20 {
        return None;
    }

    let mask = if prefix == 0 { 0 } else { u32::MAX << (32 - prefix) };
    let base = u32::from(addr) & mask;
    Some(format!("{}/24", Ipv4Addr::from(base + (index << 8))))
}

/// S3 bucket names and RDS identifiers reject `_`.
fn hyphenate(name: &str) -> String {
    name.replace('_', "-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::KnowledgeBase;

    fn synthesizer(millis: i64) -> DefaultSynthesizer {
        DefaultSynthesizer::new(Arc::new(FixedClock(millis)))
    }

    #[test]
    fn test_every_required_attribute_is_filled() {
        let kb = KnowledgeBase::load().unwrap();
        let synth = synthesizer(0);

        for entry in kb.entries() {
            let complete = synth.fill_defaults(entry, "res", &TemplateData::new());
            for field in entry.required_attributes {
                assert!(complete.contains_key(*field), "{} missing {}", entry.kind, field);
            }
        }
    }

    #[test]
    fn test_supplied_values_are_kept() {
        let kb = KnowledgeBase::load().unwrap();
        let entry = kb.get(ResourceKind::Instance).unwrap();
        let mut supplied = TemplateData::new();
        supplied.insert("instance_type".to_string(), json!("m5.large"));
        supplied.insert("custom".to_string(), json!(1));

        let complete = synthesizer(0).fill_defaults(entry, "web", &supplied);
        assert_eq!(complete["instance_type"], json!("m5.large"));
        assert_eq!(complete["custom"], json!(1));
        assert_eq!(complete["root_volume_size"], json!(20));
    }

    #[test]
    fn test_bucket_name_uses_clock() {
        let mut clock = MockClock::new();
        clock.expect_now_millis().times(1).return_const(1_700_000_000_000_i64);
        let synth = DefaultSynthesizer::new(Arc::new(clock));

        let value = synth.default_for(ResourceKind::S3Bucket, "bucket", "user_uploads", &TemplateData::new());
        assert_eq!(value, json!("user-uploads-bucket-1700000000000"));
    }

    #[test]
    fn test_database_defaults_follow_engine() {
        let synth = synthesizer(0);
        let mut supplied = TemplateData::new();
        supplied.insert("engine".to_string(), json!("mysql"));

        let version = synth.default_for(ResourceKind::DbInstance, "engine_version", "db", &supplied);
        let family = synth.default_for(ResourceKind::DbInstance, "parameter_group_family", "db", &supplied);
        assert_eq!(version, json!("8.0"));
        assert_eq!(family, json!("mysql8.0"));

        let family = synth.default_for(ResourceKind::DbInstance, "parameter_group_family", "db", &TemplateData::new());
        assert_eq!(family, json!("postgres15"));

        let identifier = synth.default_for(ResourceKind::DbInstance, "identifier", "orders_db", &TemplateData::new());
        assert_eq!(identifier, json!("orders-db"));
    }

    #[test]
    fn test_only_aws_restricted_names_are_hyphenated() {
        let synth = synthesizer(5);
        let empty = TemplateData::new();

        let function = synth.default_for(ResourceKind::LambdaFunction, "function_name", "order_api", &empty);
        let role = synth.default_for(ResourceKind::IamRole, "role_name", "order_api", &empty);
        let db = synth.default_for(ResourceKind::DbInstance, "identifier", "order_api", &empty);
        let bucket = synth.default_for(ResourceKind::S3Bucket, "bucket", "order_api", &empty);

        assert_eq!(function, json!("order_api"));
        assert_eq!(role, json!("order_api"));
        assert_eq!(db, json!("order-api"));
        assert_eq!(bucket, json!("order-api-bucket-5"));
    }

    #[test]
    fn test_subnets_follow_vpc_range() {
        let synth = synthesizer(0);
        let mut supplied = TemplateData::new();
        supplied.insert("cidr_block".to_string(), json!("172.16.0.0/16"));

        let value = synth.default_for(ResourceKind::Vpc, "private_cidr_block_2", "main", &supplied);
        assert_eq!(value, json!("172.16.4.0/24"));

        let value = synth.default_for(ResourceKind::Vpc, "public_cidr_block_1", "main", &TemplateData::new());
        assert_eq!(value, json!("10.0.1.0/24"));

        supplied.insert("cidr_block".to_string(), json!("192.168.1.0/24"));
        let value = synth.default_for(ResourceKind::Vpc, "public_cidr_block_2", "main", &supplied);
        assert_eq!(value, json!("10.0.2.0/24"));
    }

    #[test]
    fn test_unknown_field_defaults_to_empty_string() {
        let synth = synthesizer(0);
        let value = synth.default_for(ResourceKind::Instance, "mystery", "x", &TemplateData::new());
        assert_eq!(value, json!(""));
    }

    #[test]
    fn test_database_ports() {
        assert_eq!(database_port("postgres"), 5432);
        assert_eq!(database_port("MySQL"), 3306);
        assert_eq!(database_port("aurora-mysql"), 3306);
        assert_eq!(database_port("oracle-ee"), 1521);
        assert_eq!(database_port("sqlserver-ex"), 1433);
        assert_eq!(database_port("something"), 5432);
    }
}
