//! Document-wide parameters.

use serde::{Deserialize, Serialize};

/// Values written into the variable defaults and the provider block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentProfile {
    pub environment: String,
    pub application_name: String,
    pub region: String,
    /// CORS allow-list for function URLs.
    pub allowed_origins: Vec<String>,
    /// Version constraint for the AWS provider.
    pub provider_version: String,
    /// Terraform `required_version` constraint.
    pub terraform_version: String,
}

impl Default for DocumentProfile {
    fn default() -> Self {
        Self {
            environment: "dev".to_string(),
            application_name: "myapp".to_string(),
            region: "us-east-1".to_string(),
            allowed_origins: vec!["*".to_string()],
            provider_version: "~> 5.40".to_string(),
            terraform_version: ">= 1.8".to_string(),
        }
    }
}

impl DocumentProfile {
    pub fn with_environment(mut self, env: impl Into<String>) -> Self {
        self.environment = env.into();
        self
    }

    pub fn with_application_name(mut self, name: impl Into<String>) -> Self {
        self.application_name = name.into();
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.allowed_origins = origins;
        self
    }

    /// The allow-list as an HCL list literal.
    pub fn allowed_origins_literal(&self) -> String {
        let items: Vec<String> = self.allowed_origins.iter().map(|o| hcl_string(o)).collect();
        format!("[{}]", items.join(","))
    }
}

/// Quote `value` as an HCL string literal with no template sequences.
pub fn hcl_string(value: &str) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|_| "\"\"".to_string())
        .replace("${", "$${")
        .replace("%{", "%%{")
}
