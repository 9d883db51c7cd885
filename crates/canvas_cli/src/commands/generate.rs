//! Generate command - Turn a graph file into Terraform.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use canvas_graph::GraphReader;
use canvas_iac::{IdentifierPolicy, TerraformGenerator};
use canvas_kb::{FixedClock, KnowledgeBase};

use crate::config::CanvasConfig;

#[derive(Args)]
pub struct GenerateArgs {
    /// Graph file (.json, .yaml or .yml)
    #[arg(short, long)]
    pub graph: PathBuf,

    /// Output directory for main.tf
    #[arg(short, long, default_value = ".", conflicts_with = "stdout")]
    pub out: PathBuf,

    /// Print the document instead of writing main.tf
    #[arg(long)]
    pub stdout: bool,

    #[command(flatten)]
    pub overrides: GeneratorOverrides,
}

/// Flags shared by every command that generates text.
#[derive(Args, Default)]
pub struct GeneratorOverrides {
    /// Fixed clock in epoch milliseconds, for reproducible output
    #[arg(long)]
    pub timestamp: Option<i64>,

    /// Rename colliding identifiers with _2, _3, ... suffixes
    #[arg(long)]
    pub dedupe_identifiers: bool,

    /// Default for the environment variable
    #[arg(long)]
    pub environment: Option<String>,

    /// Default for the application_name variable
    #[arg(long)]
    pub application: Option<String>,

    /// Default for the aws_region variable
    #[arg(long)]
    pub region: Option<String>,
}

impl GeneratorOverrides {
    /// Build a generator from the config file with these flags on top.
    pub fn build(&self, config: &CanvasConfig) -> Result<TerraformGenerator> {
        let kb = KnowledgeBase::load().context("Knowledge base template validation failed")?;

        let mut profile = config.profile.clone();
        if let Some(env) = &self.environment {
            profile = profile.with_environment(env);
        }
        if let Some(app) = &self.application {
            profile = profile.with_application_name(app);
        }
        if let Some(region) = &self.region {
            profile = profile.with_region(region);
        }

        let policy = if self.dedupe_identifiers {
            IdentifierPolicy::Suffix
        } else {
            config.identifier_policy()
        };

        let mut generator = TerraformGenerator::new(Arc::new(kb))
            .with_profile(profile)
            .with_identifier_policy(policy);
        if let Some(millis) = self.timestamp {
            generator = generator.with_clock(Arc::new(FixedClock(millis)));
        }
        Ok(generator)
    }
}

pub fn execute(args: GenerateArgs, config: &CanvasConfig) -> Result<()> {
    info!("Generating Terraform from {:?}", args.graph);

    let graph = GraphReader::read(&args.graph)
        .with_context(|| format!("Failed to read graph file {}", args.graph.display()))?;
    let generator = args.overrides.build(config)?;
    let text = generator.generate_graph(&graph);

    if args.stdout {
        print!("{}", text);
        return Ok(());
    }

    let path = TerraformGenerator::export(&args.out, &text).context("Terraform export failed")?;
    println!(
        "✅ Wrote {} ({} nodes, {} connections)",
        path.display(),
        graph.nodes.len(),
        graph.edges.len()
    );
    Ok(())
}
