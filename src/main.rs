//! depdrift - Command-line entry point

use depdrift::application::reporting::EXIT_INTERNAL_ERROR;
use depdrift::cli::CliApp;
use depdrift::{init_tracing, Config};

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            EXIT_INTERNAL_ERROR
        }
    };
    std::process::exit(exit_code);
}

async fn run() -> anyhow::Result<i32> {
    // Parse arguments first so --help/--version work regardless of config state.
    let app = CliApp::new();

    let config = Config::load()?;
    init_tracing(&config.logging)?;

    app.run(&config).await
}
