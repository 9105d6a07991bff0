// SPDX-FileCopyrightText: 2026 Plugboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugboard - inspect and probe tool providers.
//!
//! This is the binary entry point. It loads configuration, wires the
//! registry, and dispatches to the subcommand modules.

mod inspect;
mod probe;
mod wiring;

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use plugboard_core::PlugboardError;

/// Plugboard - inspect and probe tool providers.
#[derive(Parser, Debug)]
#[command(name = "plugboard", version, about, long_about = None)]
struct Cli {
    /// Configuration file to load instead of the default search path.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print machine-readable JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    plain: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// List registered providers and whether they are configured.
    Providers,
    /// List the tools an app offers.
    Tools {
        /// Provider name, e.g. `clock`.
        app: String,
    },
    /// Show an integration's configuration form.
    Schema {
        /// Integration name, e.g. `plausible`.
        app: String,
    },
    /// Show the provider catalog, optionally filtered.
    Catalog {
        /// Case-insensitive filter on name, label and description.
        query: Option<String>,
    },
    /// Print the system-prompt block for available apps.
    Prompt,
    /// Probe an integration's connection with stored or overridden settings.
    Test {
        /// Integration name.
        app: String,
        /// Override a setting for this probe only (repeatable).
        #[arg(long = "set", value_name = "KEY=VALUE", value_parser = probe::parse_assignment)]
        set: Vec<(String, serde_json::Value)>,
        /// Give up after this many seconds.
        #[arg(long, default_value_t = probe::DEFAULT_TIMEOUT_SECS)]
        timeout_secs: u64,
    },
}

/// Output settings shared by every subcommand.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    pub json: bool,
    pub color: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => plugboard_config::load_and_validate_path(path),
        None => plugboard_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            plugboard_config::render_errors(errors);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.core.log_level);

    let output = Output {
        json: cli.json,
        color: !cli.plain && !cli.json && std::io::stdout().is_terminal(),
    };
    let plugboard = wiring::build_plugboard(config);

    match run(cli.command, &plugboard, output).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("plugboard: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Runs one subcommand. `Ok(false)` means the command ran but reported failure.
async fn run(
    command: Commands,
    plugboard: &plugboard_registry::Plugboard,
    output: Output,
) -> Result<bool, PlugboardError> {
    let text = match command {
        Commands::Providers => inspect::providers(plugboard, output)?,
        Commands::Tools { app } => inspect::tools(plugboard, &app, output)?,
        Commands::Schema { app } => inspect::schema(plugboard, &app, output)?,
        Commands::Catalog { query } => inspect::catalog(plugboard, query.as_deref(), output)?,
        Commands::Prompt => inspect::prompt(plugboard),
        Commands::Test {
            app,
            set,
            timeout_secs,
        } => {
            let report = probe::run_probe(plugboard, &app, set, timeout_secs).await?;
            println!("{}", probe::render(&report, output)?);
            return Ok(report.result.success);
        }
    };
    println!("{text}");
    Ok(true)
}

/// Installs the global subscriber. `RUST_LOG` wins over the configured level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("plugboard={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_test_with_overrides() {
        let cli = Cli::try_parse_from([
            "plugboard",
            "--json",
            "test",
            "plausible",
            "--set",
            "url=https://stats.example.com",
            "--set",
            "api_key=abc",
            "--timeout-secs",
            "3",
        ])
        .unwrap();

        assert!(cli.json);
        match cli.command {
            Commands::Test {
                app,
                set,
                timeout_secs,
            } => {
                assert_eq!(app, "plausible");
                assert_eq!(set.len(), 2);
                assert_eq!(set[0].0, "url");
                assert_eq!(timeout_secs, 3);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn rejects_malformed_assignment() {
        let result = Cli::try_parse_from(["plugboard", "test", "plausible", "--set", "novalue"]);
        assert!(result.is_err());
    }

    #[test]
    fn catalog_query_is_optional() {
        let cli = Cli::try_parse_from(["plugboard", "catalog"]).unwrap();
        assert!(matches!(cli.command, Commands::Catalog { query: None }));
    }
}
