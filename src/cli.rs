use clap::{Parser, Subcommand};

/// Top-level CLI interface for the scoring service
#[derive(Parser)]
#[command(
    name = "carbonscorex",
    version = "0.1.0",
    about = "CarbonScoreX carbon scoring service CLI"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the HTTP scoring API (predict, batch-predict, health, model-info)
    Serve {
        /// Host/IP to bind (overrides configuration)
        #[arg(long)]
        host: Option<String>,
        /// Port to bind (overrides configuration)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Score a single metrics record from a JSON file and print the result
    Score {
        #[arg(short, long)]
        input: String,
        /// Force the rule-based scorer even when a model artifact is present
        #[arg(long)]
        fallback: bool,
    },

    /// Inspect the model artifacts in the configured directory
    ModelInfo,
}
