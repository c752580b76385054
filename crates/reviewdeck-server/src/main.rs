use anyhow::{Context, Result};
use axum::routing::get;
use axum::Router;
use clap::{ArgAction, Parser};
use review_config::{Config, PathManager};
use review_core::ApprovalLedger;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

mod error;
mod logging;
mod routes;
mod state;

use state::AppState;

#[derive(Parser)]
#[command(name = "reviewdeck")]
#[command(about = "Reviewdeck - property review management API")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to the platform config dir)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Bind address, overriding the configured one (e.g. 0.0.0.0:5000)
    #[arg(long, value_name = "ADDR")]
    bind: Option<String>,

    /// Write logs to the rotating server log file instead of stderr
    #[arg(long, action = ArgAction::SetTrue)]
    log_to_file: bool,

    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = PathManager::default();
    paths
        .ensure_directories()
        .context("Failed to create application directories")?;

    let log_file = cli.log_to_file.then(|| paths.server_log_file());
    logging::init_logging(cli.verbose, cli.quiet, log_file)
        .context("Failed to initialize logging")?;

    let config_path = cli.config.unwrap_or_else(|| paths.config_file());
    let config = Config::load_or_default(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    config.validate().context("Invalid configuration")?;

    let source = review_sources::create_source(&config, &paths)
        .context("Failed to create review source")?;
    let ledger = ApprovalLedger::new(paths.approved_reviews_file());

    let bind_addr = cli.bind.unwrap_or_else(|| config.server.bind_addr.clone());
    let state = Arc::new(AppState::new(config, source, ledger));

    let app = Router::new()
        .route("/", get(routes::root))
        .route("/health", get(routes::health))
        .route("/api", get(routes::api_info))
        .route("/api/reviews", get(routes::get_all_reviews))
        .route("/api/reviews/search", get(routes::search_reviews))
        .route("/api/reviews/stats", get(routes::get_stats))
        .route("/api/reviews/approved", get(routes::get_approved))
        .route("/api/reviews/:id", get(routes::get_review_by_id))
        .route(
            "/api/reviews/:id/approve",
            axum::routing::post(routes::approve_review).delete(routes::unapprove_review),
        )
        .fallback(routes::not_found)
        .layer(CorsLayer::permissive())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", bind_addr))?;
    info!("reviewdeck listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    // Ctrl-C is the only shutdown trigger; there is no background work to drain
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to install Ctrl-C handler: {}", e);
    }
    info!("shutdown signal received");
}
