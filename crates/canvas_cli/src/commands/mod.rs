//! CLI command definitions.
//!
//! Each subcommand maps to one engine workflow: generating a document,
//! inspecting the knowledge base, or managing saved projects.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod generate;
pub mod kb;
pub mod project;

/// CloudCanvas - diagram-to-Terraform generator
#[derive(Parser)]
#[command(name = "canvas")]
#[command(version, about = "CloudCanvas - diagram-to-Terraform generator")]
#[command(long_about = r#"
CloudCanvas turns an infrastructure diagram (nodes and connections) into a
dependency-ordered Terraform document for AWS.

WORKFLOWS:
  generate  → Generate Terraform from a graph file
  kb        → Inspect and validate the resource knowledge base
  project   → Save, load, list and delete projects

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments
  3 - Validation failure
  4 - Template error
  5 - IaC error
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (defaults to ./canvas.toml when present)
    #[arg(short, long, global = true, env = "CANVAS_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate Terraform from a graph file
    Generate(generate::GenerateArgs),

    /// Inspect the resource knowledge base
    Kb(kb::KbArgs),

    /// Manage saved projects
    Project(project::ProjectArgs),
}
