use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use household_income::api::{AppState, create_router};
use household_income::config::ConfigLoader;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Serve the household income engine over HTTP.
///
/// Tables are read from the configuration directory. When it is missing or
/// invalid, the built-in 2025 tables are used instead.
#[derive(Parser, Debug)]
#[command(name = "household-income")]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory containing tax_year.yaml, tax.yaml, benefits.yaml, childcare.yaml and housing/
    #[arg(short, long, env = "HOUSEHOLD_INCOME_CONFIG", default_value = "config/at2025")]
    config: PathBuf,

    /// Address to listen on
    #[arg(short, long, env = "HOUSEHOLD_INCOME_BIND", default_value = "127.0.0.1:3000")]
    bind: SocketAddr,

    /// Log level used when RUST_LOG is not set (debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let loader = ConfigLoader::load_or_default(&args.config);
    info!(
        tables = %loader.metadata().name,
        year = loader.metadata().year,
        "Configuration ready"
    );

    let router = create_router(AppState::new(loader));
    let listener = tokio::net::TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("Failed to bind {}", args.bind))?;

    info!(address = %args.bind, "Listening");
    axum::serve(listener, router)
        .await
        .context("Server terminated unexpectedly")?;

    Ok(())
}
