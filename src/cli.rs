use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::artifacts::{ArtifactReport, ArtifactSet, LoadOutcome};
use crate::config::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "symbio")]
#[command(version)]
#[command(about = "SYMBIO risk and profile prediction API", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding default.toml and environment overlays
    #[arg(short, long, default_value = "config", env = "SYMBIO_CONFIG_DIR")]
    pub config: PathBuf,

    /// Override server.host
    #[arg(long)]
    pub host: Option<String>,

    /// Override server.port
    #[arg(long)]
    pub port: Option<u16>,

    /// Override artifacts.dir
    #[arg(long)]
    pub artifacts_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Load the artifacts and serve the HTTP API (default)
    Serve,
    /// Load the artifacts, print a report and exit
    Check,
}

impl Cli {
    pub fn command(&self) -> Commands {
        self.command.unwrap_or(Commands::Serve)
    }

    /// Apply command line overrides on top of the loaded configuration.
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(dir) = &self.artifacts_dir {
            config.artifacts.dir = dir.clone();
        }
    }
}

/// Render the artifact load report as printed by `symbio check`.
pub fn format_report(reports: &[ArtifactReport]) -> String {
    let mut out = String::new();
    for report in reports {
        let status = match &report.outcome {
            LoadOutcome::Loaded => "\x1b[32m✓ loaded\x1b[0m".to_string(),
            LoadOutcome::Missing => "\x1b[33m- missing\x1b[0m".to_string(),
            LoadOutcome::Failed(msg) => format!("\x1b[31m✗ failed\x1b[0m ({msg})"),
        };
        out.push_str(&format!(
            "  {:<14} {}  {}\n",
            report.kind.as_str(),
            report.path.display(),
            status
        ));
    }
    out
}

/// Verdict of `symbio check`: a file that failed to load is an error, a
/// missing one is only reported.
pub fn check_outcome(artifacts: &ArtifactSet) -> anyhow::Result<()> {
    if !artifacts.has_failures() {
        return Ok(());
    }

    let failed: Vec<_> = artifacts
        .reports()
        .iter()
        .filter(|r| matches!(r.outcome, LoadOutcome::Failed(_)))
        .map(|r| r.kind.as_str())
        .collect();
    anyhow::bail!("artifacts failed to load: {}", failed.join(", "))
}
