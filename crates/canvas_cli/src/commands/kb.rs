//! Kb command - Inspect the resource knowledge base.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use tracing::info;

use canvas_kb::{KnowledgeBase, ResourceMatcher};
use canvas_templates::TemplateRenderer;

#[derive(Args)]
pub struct KbArgs {
    #[command(subcommand)]
    pub command: KbCommand,
}

#[derive(Subcommand)]
pub enum KbCommand {
    /// List supported resource kinds and their aliases
    List,

    /// Show attributes, examples and advisories for a kind
    Show {
        /// Kind key, alias or any string the matcher understands
        kind: String,
    },

    /// Validate every built-in template
    Validate,
}

pub fn execute(args: KbArgs) -> Result<()> {
    match args.command {
        KbCommand::List => list(),
        KbCommand::Show { kind } => show(&kind),
        KbCommand::Validate => validate(),
    }
}

fn load() -> Result<KnowledgeBase> {
    KnowledgeBase::load().context("Knowledge base template validation failed")
}

fn list() -> Result<()> {
    let kb = load()?;

    println!("📚 {} resource kinds:\n", kb.entries().len());
    for entry in kb.entries() {
        println!(
            "  {:<22} {:<16} aliases: {}",
            entry.kind.as_str(),
            entry.kind.display_name(),
            entry.kind.aliases().join(", ")
        );
    }
    Ok(())
}

fn show(kind: &str) -> Result<()> {
    let kb = load()?;
    let matched = ResourceMatcher::new(&kb)
        .match_kind(kind)
        .and_then(|k| kb.get(k))
        .with_context(|| format!("Resource kind not found: {}", kind))?;

    println!("{} ({})", matched.kind.display_name(), matched.kind);
    if matched.kind.as_str() != kind {
        println!("  matched from '{}'", kind);
    }

    println!("\nRequired attributes:");
    for attr in matched.required_attributes {
        println!("  - {}", attr);
    }
    if !matched.optional_attributes.is_empty() {
        println!("\nOptional attributes:");
        for attr in matched.optional_attributes {
            println!("  - {}", attr);
        }
    }

    println!("\nAdvisories:");
    for advisory in kb.advisories(kind) {
        println!("  - {}", advisory);
    }

    for example in kb.examples(kind) {
        println!("\nExample:\n{}", example);
    }
    Ok(())
}

fn validate() -> Result<()> {
    info!("Validating knowledge base templates");
    let kb = load()?;
    let renderer = TemplateRenderer::new();

    for entry in kb.entries() {
        let outline = renderer
            .validate(entry.template)
            .with_context(|| format!("Template validation failed for {}", entry.kind))?;
        let blocks: Vec<_> = outline.blocks.iter().map(|b| b.name.as_str()).collect();
        println!(
            "✅ {:<22} {} placeholders, blocks: {}",
            entry.kind.as_str(),
            outline.scalars.len(),
            if blocks.is_empty() { "-".to_string() } else { blocks.join(", ") }
        );
    }

    println!("\nAll {} templates are valid", kb.entries().len());
    Ok(())
}
