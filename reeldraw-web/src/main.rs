//! reeldraw-web - fair random movie picker for Letterboxd lists
//!
//! Serves a small web UI plus a JSON API. Given a handful of list URLs,
//! picks one film uniformly at random across every film they contain:
//! lists are weighted by size, then one film is sampled from a random
//! page of the winning list.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use reeldraw_common::config::{self, TomlConfig};
use reeldraw_common::letterboxd::LetterboxdClient;
use reeldraw_web::{build_router, AppState};
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for reeldraw-web
#[derive(Parser, Debug)]
#[command(name = "reeldraw-web")]
#[command(about = "Fair random movie picker across Letterboxd lists")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "REELDRAW_PORT")]
    port: Option<u16>,

    /// Address to bind
    #[arg(short, long, env = "REELDRAW_BIND")]
    bind: Option<String>,

    /// Path to a TOML configuration file
    #[arg(short, long, env = "REELDRAW_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "reeldraw_web=debug,reeldraw_common=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting ReelDraw (reeldraw-web) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();
    let file = TomlConfig::load_or_default(args.config.as_deref())
        .context("Failed to load configuration")?;
    let config = config::resolve(args.port, args.bind, file);
    info!(
        "Upstream: {} (timeout {}s)",
        config.upstream.base_url, config.upstream.timeout_secs
    );

    let client =
        LetterboxdClient::new(&config.upstream).context("Failed to build upstream client")?;
    let state = AppState::new(Arc::new(client));
    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", config.bind, config.port)
        .parse()
        .context("Invalid bind address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("Listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

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
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
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
