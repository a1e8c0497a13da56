use anyhow::{anyhow, Context};
use clap::Parser;
use tracing::{info, warn};

use symbio::api::{start_api_server, AppState};
use symbio::artifacts::ArtifactLoader;
use symbio::cli::{self, Cli, Commands};
use symbio::config::AppConfig;

mod main_runtime;

use main_runtime::{init_logging, init_logging_simple};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_from(&cli.config)
        .with_context(|| format!("failed to load configuration from {}", cli.config.display()))?;
    cli.apply_overrides(&mut config);
    if let Err(errors) = config.validate() {
        return Err(anyhow!("invalid configuration: {}", errors.join("; ")));
    }

    match cli.command() {
        Commands::Check => run_check(&config),
        Commands::Serve => {
            init_logging(&config.logging);
            run_serve(config).await
        }
    }
}

fn run_check(config: &AppConfig) -> anyhow::Result<()> {
    init_logging_simple();

    let artifacts = ArtifactLoader::new(&config.artifacts).load_all();
    println!("Artifacts in {}:", config.artifacts.dir.display());
    print!("{}", cli::format_report(artifacts.reports()));

    cli::check_outcome(&artifacts)
}

async fn run_serve(config: AppConfig) -> anyhow::Result<()> {
    let addr = config.server.socket_addr().map_err(|e| anyhow!(e))?;

    info!("Starting SYMBIO prediction API v{}", env!("CARGO_PKG_VERSION"));
    info!("Artifacts directory: {}", config.artifacts.dir.display());

    let artifacts = ArtifactLoader::new(&config.artifacts).load_all();
    if !artifacts.all_present() {
        warn!("Serving with missing artifacts; affected endpoints will answer 500");
    }

    let state = AppState::new(artifacts, config.artifacts.require_label_encoder);
    start_api_server(addr, state).await?;
    Ok(())
}
