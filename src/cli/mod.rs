//! depdrift CLI - Command-line interface for dependency risk checks
//!
//! A thin orchestration layer over the analysis engine: load project data,
//! fetch registry metadata, build the graph, run both analyzers, render the
//! report and exit with the code it recommends.

mod commands;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::Config;
use crate::domain::graph::Environment;

/// depdrift - Detect dependency drift and supply-chain risk in npm projects
#[derive(Parser, Debug)]
#[command(
    name = "depdrift",
    version,
    about = "Detect dependency drift and supply-chain risk in npm projects",
    long_about = "depdrift inspects a project's package.json and package-lock.json, \
                  reconstructs the resolved dependency graph with npm registry metadata, \
                  and reports version drift and supply-chain risk heuristics.\n\n\
                  The process exit code encodes the worst finding: 0 clean, 1 drift, \
                  2 security, 3 both, 4 internal error."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run drift and security checks on a project
    #[command(visible_alias = "c")]
    Check(commands::check::CheckArgs),
}

/// Scan environment recorded in the report
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EnvironmentArg {
    #[default]
    Local,
    Ci,
    Prod,
}

impl From<EnvironmentArg> for Environment {
    fn from(arg: EnvironmentArg) -> Self {
        match arg {
            EnvironmentArg::Local => Environment::Local,
            EnvironmentArg::Ci => Environment::Ci,
            EnvironmentArg::Prod => Environment::Prod,
        }
    }
}

/// CLI application runner
pub struct CliApp {
    cli: Cli,
}

impl CliApp {
    /// Parse arguments into a new CLI application instance.
    pub fn new() -> Self {
        Self { cli: Cli::parse() }
    }

    /// Run the selected command, returning the process exit code.
    pub async fn run(self, config: &Config) -> anyhow::Result<i32> {
        match self.cli.command {
            Commands::Check(ref args) => commands::check::run(config, args).await,
        }
    }
}

impl Default for CliApp {
    fn default() -> Self {
        Self::new()
    }
}
