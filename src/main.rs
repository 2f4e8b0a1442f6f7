//! Tenant subdomain edge (v1)
//!
//! Sits in front of a multi-tenant web application and routes requests by
//! their Host header.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌───────────────────────────────────────────────────┐
//!                     │                   TENANT EDGE                     │
//!   Client Request    │  ┌──────────┐   ┌────────────┐   ┌─────────────┐  │
//!   ──────────────────┼─▶│  http    │──▶│ subdomain  │──▶│   routing   │  │
//!                     │  │  server  │   │ middleware │   │ host rules  │  │
//!                     │  └──────────┘   └─────┬──────┘   └─────────────┘  │
//!                     │                       │                           │
//!                     │         redirect ◀────┤ rewrite / pass-through    │
//!                     │        (307, done)    ▼                           │
//!   Client Response   │                ┌────────────┐                     │
//!   ◀─────────────────┼────────────────│  forward   │◀────────────────────┼──── Upstream
//!                     │                └────────────┘                     │     App
//!                     │  config · observability · lifecycle               │
//!                     └───────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use tenant_edge::config::{load_config, EdgeConfig};
use tenant_edge::error::EdgeError;
use tenant_edge::lifecycle::{startup, Shutdown};
use tenant_edge::observability::logging;

#[derive(Parser)]
#[command(name = "tenant-edge")]
#[command(about = "Subdomain-aware edge router for multi-tenant apps", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults plus environment when omitted.
    #[arg(short, long, env = "EDGE_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), EdgeError> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => EdgeConfig::from_env()?,
    };

    logging::init_tracing(&config.observability)?;
    tracing::info!("tenant-edge v{} starting", env!("CARGO_PKG_VERSION"));

    let shutdown = Shutdown::new();
    startup::run(config, &shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
