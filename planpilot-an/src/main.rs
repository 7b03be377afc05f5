//! planpilot-an - Non-inferiority Analysis microservice
//!
//! **Module Identity:**
//! - Name: planpilot-an (Analysis)
//! - Default bind: 0.0.0.0:8000
//!
//! Compares AI-generated against manually planned VMAT cases and serves the
//! reference multi-site study set.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use planpilot_common::config::{load_config, resolve_config_source};
use planpilot_common::SampleRepository;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use planpilot_an::{build_router, AppState};

/// Command-line arguments for planpilot-an
#[derive(Parser, Debug)]
#[command(name = "planpilot-an")]
#[command(about = "AI vs manual VMAT plan non-inferiority analysis service")]
#[command(version)]
struct Args {
    /// Path to TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to bind (overrides config file)
    #[arg(long, env = "PLANPILOT_HOST")]
    host: Option<String>,

    /// Port to listen on (overrides config file)
    #[arg(short, long, env = "PLANPILOT_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config is loaded before tracing so the log level can come from it
    let source = resolve_config_source(args.config.as_deref());
    let config = load_config(&source).context("Failed to load configuration")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "planpilot_an={level},planpilot_common={level},tower_http={level}",
                    level = config.logging.level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting PlanPilot-VMAT Analysis (planpilot-an) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    match source.path() {
        Some(path) => info!("Config: {}", path.display()),
        None => warn!("No config file found, using compiled defaults"),
    }

    // Thresholds in force for this deployment
    for policy in config.margins.entries() {
        info!(
            "Margin {}: {:?} {} (gating: {})",
            policy.metric, policy.margin.mode, policy.margin.value, policy.gating
        );
    }

    let samples = SampleRepository::reference(&config.margins)
        .context("Failed to analyze reference sample cases")?;
    info!("✓ Loaded {} sample cases", samples.len());

    let state = AppState::new(config.margins, samples);
    let app = build_router(state);

    let host = args.host.unwrap_or(config.host);
    let port = args.port.unwrap_or(config.port);
    let listener = tokio::net::TcpListener::bind((host.as_str(), port))
        .await
        .with_context(|| format!("Failed to bind to {}:{}", host, port))?;
    let addr = listener.local_addr().context("Failed to read bound address")?;
    info!("planpilot-an listening on http://{}", addr);
    info!("Health check: http://{}/api/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
