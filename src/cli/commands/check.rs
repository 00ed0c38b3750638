//! Check command - run drift and security analysis on an npm project

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tracing::debug;

use crate::application::errors::ApplicationError;
use crate::application::graph_builder::build_dependency_graph;
use crate::application::reporting::formats::{generate_console_report, generate_json_report};
use crate::application::reporting::{ReportAssembler, ScanMeta, ScanReport, EXIT_INTERNAL_ERROR};
use crate::application::security::SecurityPolicy;
use crate::application::{DriftAnalyzer, SecurityAnalyzer};
use crate::cli::EnvironmentArg;
use crate::config::Config;
use crate::infrastructure::project::load_project;
use crate::infrastructure::registry::{MetadataProvider, NpmRegistryClient};

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Path to the Node project (defaults to the current directory)
    #[arg(long, default_value = ".")]
    pub path: PathBuf,

    /// Output the report in JSON format
    #[arg(long)]
    pub json: bool,

    /// Environment recorded in the report
    #[arg(long, value_enum, default_value = "local")]
    pub env: EnvironmentArg,

    /// Upload results to SaaS (reserved)
    #[arg(long)]
    pub upload: bool,
}

/// Run the check command, returning the report's recommended exit code.
///
/// Internal failures exit with [`EXIT_INTERNAL_ERROR`]; in JSON mode they are
/// emitted as a JSON error object so machine consumers always read valid JSON.
pub async fn run(config: &Config, args: &CheckArgs) -> Result<i32> {
    if args.upload {
        eprintln!("Warning: Upload is not enabled in the open-source CLI.");
    }

    match scan(config, args).await {
        Ok((report, rendered)) => {
            println!("{}", rendered);
            Ok(report.summary.recommended_exit_code)
        }
        Err(e) => {
            if args.json {
                let envelope = serde_json::json!({
                    "error": e.to_string(),
                    "exitCode": EXIT_INTERNAL_ERROR,
                });
                println!("{}", envelope);
            } else {
                eprintln!("Error: {}", e);
            }
            Ok(EXIT_INTERNAL_ERROR)
        }
    }
}

async fn scan(
    config: &Config,
    args: &CheckArgs,
) -> Result<(ScanReport, String), ApplicationError> {
    let project_dir = if args.path.is_absolute() {
        args.path.clone()
    } else {
        std::env::current_dir()?.join(&args.path)
    };

    let project = load_project(&project_dir).await?;

    let names = project.lockfile.package_names();
    debug!("fetching registry metadata for {} packages", names.len());
    let provider = NpmRegistryClient::new(&config.registry)?;
    let metadata = provider.fetch_many(&names).await;
    debug!("resolved metadata for {} packages", metadata.len());

    let graph = build_dependency_graph(&project, &metadata, args.env.into());

    let drift = DriftAnalyzer::default().detect(&graph);
    let security = SecurityAnalyzer::new(SecurityPolicy {
        unmaintained_after_months: config.analysis.unmaintained_after_months,
        ..SecurityPolicy::default()
    })
    .analyze(&graph);

    let meta = ScanMeta::generate(&graph.root, &project.lockfile_bytes);
    let report = ReportAssembler::assemble(meta, drift, security);

    let rendered = if args.json {
        generate_json_report(&report)?
    } else {
        generate_console_report(&report)
    };

    Ok((report, rendered))
}
