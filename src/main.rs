//! Investy server
//!
//! Serves the dashboard and proxies Mono API calls.
//!
//! Run with: cargo run -- serve
//!
//! # Configuration
//!
//! Config file (`--config`, or the default locations) plus environment:
//! - `API_ENDPOINT`: Mono API base URL (default: https://api.withmono.com)
//! - `PUBLIC_KEY`: Mono Connect widget key
//! - `SECRET_KEY`: Mono secret key (never sent to the browser)
//! - `INVESTY_HOST` / `INVESTY_PORT`: Bind address (default: 127.0.0.1:8085)
//! - `INVESTY_DATA_DIR`: Directory for store.json
//! - `RUST_LOG`: Log filter (overrides `INVESTY_LOG_LEVEL`)

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use investy::api::{serve, ApiConfig, AppState};
use investy::config::{generate_default_config, Config, LoggingConfig};
use investy::dashboard::{Dashboard, FetchOutcome};
use investy::provider::{MonoClient, MonoConfig};
use investy::store::Store;

#[derive(Parser)]
#[command(name = "investy")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Dashboard and backend proxy for Mono linked investment accounts")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file path (default: search standard locations)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the dashboard server (default)
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print a default config file
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (host, port) = match cli.command {
        Some(Commands::Config) => {
            print!("{}", generate_default_config());
            return Ok(());
        }
        Some(Commands::Serve { host, port }) => (host, port),
        None => (None, None),
    };

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default()?,
    };
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    init_tracing(&config.logging);
    run(config).await
}

async fn run(config: Config) -> anyhow::Result<()> {
    tracing::info!("Starting Investy v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Provider endpoint: {}", config.provider.api_endpoint);
    for warning in config.warnings() {
        tracing::warn!("{}", warning);
    }

    let provider = Arc::new(
        MonoClient::new(MonoConfig::from(&config.provider))
            .context("failed to build Mono HTTP client")?,
    );

    let store_path = config.store.store_path();
    tracing::info!("Store: {:?}", store_path);
    let store = Arc::new(
        Store::open(&store_path)
            .await
            .with_context(|| format!("failed to open store at {:?}", store_path))?,
    );

    let dashboard = Arc::new(Dashboard::new(provider, store));

    // Reload data for a previously linked account
    match dashboard.refresh().await {
        Some(report) => {
            let loaded = |outcome: &FetchOutcome<_>| if outcome.is_success() { "ok" } else { "failed" };
            tracing::info!(
                account_id = %report.account_id,
                assets = loaded(&report.assets),
                earnings = loaded(&report.earnings),
                "Refreshed linked account"
            );
        }
        None => tracing::info!("No linked account yet"),
    }

    let api_config = ApiConfig::from_config(&config);

    serve(AppState::new(dashboard, api_config.clone()), &api_config).await?;

    tracing::info!("Investy stopped");
    Ok(())
}

/// Initialize tracing from the logging config; `RUST_LOG` wins when set
fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("investy={},tower_http=info", logging.level))
    });

    let registry = tracing_subscriber::registry().with(filter);

    if logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
