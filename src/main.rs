mod cli;
mod error;
mod kubernetes;
mod quantity;
mod report;
mod summary;
mod types;

use clap::Parser;
use std::io::{IsTerminal, Write};
use tracing::debug;

use cli::{Cli, OutputFormat};
use types::{Scope, WorkloadUnit};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only the report
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let scope = Scope::from_flag(&cli.namespace);
    debug!("Querying pods in {}", scope);

    let config =
        kubernetes::load_config(cli.kubeconfig.as_deref(), cli.context.as_deref()).await?;
    let client = kubernetes::connect(config)?;
    let pods = kubernetes::list_pods(&client, &scope).await?;

    let table = summary::summarize(pods.iter().map(WorkloadUnit::from));

    let stdout = std::io::stdout();
    let styled = stdout.is_terminal();
    let mut out = stdout.lock();
    match cli.output {
        OutputFormat::Table => report::write_table(&mut out, &table, styled)?,
        OutputFormat::Yaml => report::write_yaml(&mut out, &table)?,
    }
    out.flush()?;

    Ok(())
}
