use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "tally",
    about = "Tally — per-process variable collections for rule engines",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Load a pattern dataset and report its patterns
    Patterns(PatternsArgs),
    /// Run a concurrent workload against one collection
    Stress(StressArgs),
}

#[derive(Args)]
pub struct PatternsArgs {
    /// Dataset name, resolved against --root
    pub dataset: String,
    /// Directory relative dataset names are resolved against
    #[arg(long, default_value = ".")]
    pub root: PathBuf,
    /// Print every pattern instead of just the count
    #[arg(long)]
    pub list: bool,
}

#[derive(Args)]
pub struct StressArgs {
    #[arg(short, long, default_value = "4")]
    pub threads: usize,
    /// Operations per thread
    #[arg(short = 'n', long, default_value = "10000")]
    pub ops: usize,
    #[arg(short, long, default_value = "GLOBAL")]
    pub collection: String,
    /// Keys each worker cycles through
    #[arg(long, default_value = "16")]
    pub keys: usize,
    /// Store configuration (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,
}
