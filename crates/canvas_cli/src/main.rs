//! CloudCanvas CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Invalid arguments
//! - 3: Validation failure
//! - 4: Template error
//! - 5: IaC error

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use canvas_graph::GraphError;
use canvas_iac::IacError;
use canvas_kb::KbError;

mod commands;
mod config;

use commands::{Cli, Commands};
use config::CanvasConfig;

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_ARGS: u8 = 2;
    pub const VALIDATION_FAILURE: u8 = 3;
    pub const TEMPLATE_ERROR: u8 = 4;
    pub const IAC_ERROR: u8 = 5;
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { "canvas=debug" } else { "canvas=info" };
    let mut filter = EnvFilter::from_default_env();
    for directive in [level, "warn"] {
        if let Ok(directive) = directive.parse() {
            filter = filter.add_directive(directive);
        }
    }
    // Logging may already be initialized, continue either way
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    let result = CanvasConfig::load(cli.config.as_deref()).and_then(|config| match cli.command {
        Commands::Generate(args) => commands::generate::execute(args, &config),
        Commands::Kb(args) => commands::kb::execute(args),
        Commands::Project(args) => commands::project::execute(args, &config),
    });

    match result {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            let exit_code = categorize_error(&e);
            eprintln!("❌ Error: {:#}", e);
            ExitCode::from(exit_code)
        }
    }
}

/// Categorize error to determine exit code
fn categorize_error(e: &anyhow::Error) -> u8 {
    for cause in e.chain() {
        if let Some(kb) = cause.downcast_ref::<KbError>() {
            return match kb {
                KbError::InvalidTemplate { .. } => ExitCodes::TEMPLATE_ERROR,
                _ => ExitCodes::VALIDATION_FAILURE,
            };
        }
        if let Some(graph) = cause.downcast_ref::<GraphError>() {
            return match graph {
                GraphError::ProjectNotFound(_)
                | GraphError::NameConflict { .. }
                | GraphError::UnsupportedFormat(_) => ExitCodes::INVALID_ARGS,
                _ => ExitCodes::GENERAL_ERROR,
            };
        }
        if cause.downcast_ref::<IacError>().is_some() {
            return ExitCodes::IAC_ERROR;
        }
    }

    let msg = e.to_string().to_lowercase();
    if msg.contains("validation") {
        ExitCodes::VALIDATION_FAILURE
    } else if msg.contains("template") {
        ExitCodes::TEMPLATE_ERROR
    } else if msg.contains("terraform") {
        ExitCodes::IAC_ERROR
    } else if msg.contains("argument") || msg.contains("not found") {
        ExitCodes::INVALID_ARGS
    } else {
        ExitCodes::GENERAL_ERROR
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_categorize_typed_errors() {
        let err = Err::<(), _>(GraphError::ProjectNotFound("x".into()))
            .context("Failed to load project x")
            .unwrap_err();
        assert_eq!(categorize_error(&err), ExitCodes::INVALID_ARGS);

        let err = anyhow::Error::new(GraphError::NameConflict {
            name: "web-shop".into(),
            existing: "Web Shop".into(),
        });
        assert_eq!(categorize_error(&err), ExitCodes::INVALID_ARGS);

        let err = anyhow::Error::new(IacError::ExportFailed("disk".into()));
        assert_eq!(categorize_error(&err), ExitCodes::IAC_ERROR);

        let err = anyhow::Error::new(KbError::UndeclaredBlock {
            kind: canvas_kb::ResourceKind::Vpc,
            block: "x".into(),
        });
        assert_eq!(categorize_error(&err), ExitCodes::VALIDATION_FAILURE);
    }

    #[test]
    fn test_categorize_by_message() {
        assert_eq!(
            categorize_error(&anyhow::anyhow!("Resource kind not found: widget")),
            ExitCodes::INVALID_ARGS
        );
        assert_eq!(
            categorize_error(&anyhow::anyhow!("something odd")),
            ExitCodes::GENERAL_ERROR
        );
    }

    #[test]
    fn test_cli_parses_generate() {
        let cli = Cli::try_parse_from([
            "canvas",
            "generate",
            "--graph",
            "g.yaml",
            "--stdout",
            "--timestamp",
            "0",
        ])
        .unwrap();
        match cli.command {
            Commands::Generate(args) => {
                assert!(args.stdout);
                assert_eq!(args.overrides.timestamp, Some(0));
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn test_cli_rejects_out_with_stdout() {
        let result = Cli::try_parse_from([
            "canvas", "generate", "--graph", "g.json", "--out", "x", "--stdout",
        ]);
        assert!(result.is_err());
    }
}
