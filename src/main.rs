// CarbonScoreX - main.rs
// Bootstrap runner: configuration, tracing, and command dispatch.

use std::path::Path;
use std::process::exit;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use carbonscorex::carbonweb::build_score_router;
use carbonscorex::cli::{Cli, Commands};
use carbonscorex::company_metrics::CompanyMetrics;
use carbonscorex::config_loader::{load_config, CarbonConfig};
use carbonscorex::input_validator::validate_metrics;
use carbonscorex::score_service::CarbonScoreService;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let mut config = match load_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            exit(1);
        }
    };

    init_tracing(&config.log_level);

    let outcome = match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            serve(config).await
        }
        Commands::Score { input, fallback } => score_file(&config, &input, fallback),
        Commands::ModelInfo => model_info(&config),
    };

    if let Err(e) = outcome {
        eprintln!("{e:#}");
        exit(1);
    }
}

fn init_tracing(level: &str) {
    let level = level.parse().unwrap_or(tracing::Level::INFO);
    tracing_subscriber::fmt().with_max_level(level).init();
}

async fn serve(config: CarbonConfig) -> anyhow::Result<()> {
    let service = Arc::new(CarbonScoreService::from_artifact_dir(Path::new(
        &config.model_dir,
    )));
    let app = build_score_router(service);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(%addr, "carbon scoring service listening");
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}

fn score_file(config: &CarbonConfig, input: &str, force_fallback: bool) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(input)
        .with_context(|| format!("failed to read metrics file {input}"))?;
    let metrics: CompanyMetrics =
        serde_json::from_str(&raw).with_context(|| format!("invalid metrics JSON in {input}"))?;
    validate_metrics(&metrics).context("metrics rejected")?;

    let service = if force_fallback {
        CarbonScoreService::fallback_only("fallback forced via --fallback")
    } else {
        CarbonScoreService::from_artifact_dir(Path::new(&config.model_dir))
    };

    let prediction = service.predict(&metrics).context("prediction failed")?;
    println!("{}", serde_json::to_string_pretty(&prediction)?);
    Ok(())
}

fn model_info(config: &CarbonConfig) -> anyhow::Result<()> {
    let service = CarbonScoreService::from_artifact_dir(Path::new(&config.model_dir));
    println!("{}", serde_json::to_string_pretty(&service.model_info())?);
    Ok(())
}
