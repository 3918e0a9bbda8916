//! Edge Router
//!
//! An HTTP router for the edge of a deployment, built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                       ┌──────────────────────────────────────────────────┐
//!                       │                   EDGE ROUTER                    │
//!                       │                                                  │
//!    Client Request     │  ┌─────────┐    ┌───────────┐    ┌───────────┐   │
//!    ───────────────────┼─▶│  http   │───▶│  request  │───▶│  routing  │   │
//!                       │  │ server  │    │    url    │    │   table   │   │
//!                       │  └─────────┘    └───────────┘    └─────┬─────┘   │
//!                       │                                        │ Action  │
//!                       │                      ┌─────────────────┼──────┐  │
//!                       │                      ▼                 ▼      ▼  │
//!                       │               ┌───────────┐    ┌──────────┐ 404  │
//!                       │               │ synthetic │    │ upstream │──────┼──▶ Origin
//!                       │               └─────┬─────┘    └────┬─────┘      │
//!                       │                     └───────┬───────┘            │
//!                       │                             ▼                    │
//!    Client Response    │                    ┌────────────────┐            │
//!    ◀──────────────────┼────────────────────│ header policy  │            │
//!                       │                    └────────────────┘            │
//!                       └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use edge_router::config::{load_config, RouterConfig};
use edge_router::http::HttpServer;
use edge_router::lifecycle::Shutdown;
use edge_router::observability::init_logging;

#[derive(Parser)]
#[command(name = "edge-router")]
#[command(about = "Exact-URL edge router with a fixed security header policy", long_about = None)]
struct Cli {
    /// TOML configuration file. Built-in defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RouterConfig::default(),
    };

    init_logging(&config.observability)?;

    tracing::info!("edge-router v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        config_file = ?cli.config,
        bind_address = %config.listener.bind_address,
        public_scheme = %config.listener.public_scheme,
        routes = config.routes.len(),
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        "Listening for connections"
    );

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config)?;
    let server_shutdown = shutdown.subscribe();
    shutdown.trigger_on_signal();

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
