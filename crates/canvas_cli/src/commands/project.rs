//! Project command - Save, load, list and delete projects.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use tracing::info;

use canvas_graph::{GraphReader, GraphWriter, Project, ProjectStore};
use canvas_iac::TerraformGenerator;

use crate::commands::generate::GeneratorOverrides;
use crate::config::CanvasConfig;

#[derive(Args)]
pub struct ProjectArgs {
    /// Project store directory (overrides projects_dir from the config)
    #[arg(long, global = true)]
    pub projects_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: ProjectCommand,
}

#[derive(Subcommand)]
pub enum ProjectCommand {
    /// Generate Terraform for a graph and store both under a name
    Save {
        /// Project name
        #[arg(short, long)]
        name: String,

        /// Graph file (.json, .yaml or .yml)
        #[arg(short, long)]
        graph: PathBuf,

        #[command(flatten)]
        overrides: GeneratorOverrides,
    },

    /// Print a stored project's Terraform, or export it
    Load {
        /// Project name
        #[arg(short, long)]
        name: String,

        /// Write main.tf into this directory instead of printing
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Also write the stored graph to this file (.json, .yaml or .yml)
        #[arg(long)]
        graph_out: Option<PathBuf>,
    },

    /// List stored projects
    List,

    /// Delete a stored project
    Delete {
        /// Project name
        #[arg(short, long)]
        name: String,
    },
}

pub fn execute(args: ProjectArgs, config: &CanvasConfig) -> Result<()> {
    let root = args
        .projects_dir
        .unwrap_or_else(|| config.projects_dir.clone());
    let store = ProjectStore::new(&root);

    match args.command {
        ProjectCommand::Save {
            name,
            graph,
            overrides,
        } => {
            info!("Saving project '{}' from {:?}", name, graph);
            let graph = GraphReader::read(&graph)
                .with_context(|| format!("Failed to read graph file {}", graph.display()))?;
            let text = overrides.build(config)?.generate_graph(&graph);

            let path = store
                .save(&Project::new(name.clone(), graph, text))
                .with_context(|| format!("Failed to save project {}", name))?;
            println!("✅ Saved project '{}' to {}", name, path.display());
        }
        ProjectCommand::Load {
            name,
            out,
            graph_out,
        } => {
            let project = store
                .load(&name)
                .with_context(|| format!("Failed to load project {}", name))?;
            if let Some(path) = graph_out {
                GraphWriter::write(&path, &project.graph())
                    .with_context(|| format!("Failed to write graph file {}", path.display()))?;
                info!("Wrote graph of '{}' to {:?}", name, path);
            }
            match out {
                Some(dir) => {
                    let path = TerraformGenerator::export(&dir, &project.generated_text)
                        .context("Terraform export failed")?;
                    println!("✅ Wrote {}", path.display());
                }
                None => print!("{}", project.generated_text),
            }
        }
        ProjectCommand::List => {
            let names = store.list()?;
            if names.is_empty() {
                println!("No projects in {}", root.display());
            }
            for name in names {
                println!("  {}", name);
            }
        }
        ProjectCommand::Delete { name } => {
            store
                .delete(&name)
                .with_context(|| format!("Failed to delete project {}", name))?;
            println!("🗑️  Deleted project '{}'", name);
        }
    }

    Ok(())
}
