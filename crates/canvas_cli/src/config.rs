//! Optional `canvas.toml` configuration.
//!
//! ```toml
//! projects_dir = ".canvas/projects"
//! dedupe_identifiers = false
//!
//! [profile]
//! environment = "dev"
//! application_name = "myapp"
//! region = "us-east-1"
//! allowed_origins = ["*"]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use canvas_iac::{DocumentProfile, IdentifierPolicy};

/// Config file looked up in the working directory.
pub const CONFIG_FILE: &str = "canvas.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub profile: DocumentProfile,
    pub projects_dir: PathBuf,
    pub dedupe_identifiers: bool,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            profile: DocumentProfile::default(),
            projects_dir: PathBuf::from(".canvas/projects"),
            dedupe_identifiers: false,
        }
    }
}

impl CanvasConfig {
    /// Load an explicit config file, or `canvas.toml` when present, or defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None if Path::new(CONFIG_FILE).is_file() => Self::from_file(Path::new(CONFIG_FILE)),
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Reading config from {:?}", path);
        let content = fs::read_to_string(path)
            .with_context(|| format!("Config file not found: {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn identifier_policy(&self) -> IdentifierPolicy {
        if self.dedupe_identifiers {
            IdentifierPolicy::Suffix
        } else {
            IdentifierPolicy::Preserve
        }
    }
}
