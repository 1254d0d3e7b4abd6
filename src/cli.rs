use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "kubectl-ns-summary")]
#[command(about = "Summarize pods per namespace: phase counts and requested CPU/memory")]
pub struct Cli {
    /// Path to the kubeconfig file (defaults to $KUBECONFIG, then ~/.kube/config, then in-cluster)
    #[arg(long)]
    pub kubeconfig: Option<PathBuf>,

    /// Namespace to query, empty means all namespaces
    #[arg(short = 'n', long, default_value = "")]
    pub namespace: String,

    /// Kubeconfig context to use (defaults to the current context)
    #[arg(long)]
    pub context: Option<String>,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Fixed-width table
    #[default]
    Table,
    /// YAML mapping of namespace to summary
    Yaml,
}
