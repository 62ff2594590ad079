//! HTTP server command
//!
//! Runs the parkctl HTTP API over the configured SQLite store.

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;

use parkctl_core::ParkctlConfig;
use parkctl_server::db;
use parkctl_server::http::{run_server, ServerConfig};
use parkctl_server::ParkingService;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (overrides config/PARKCTL_BIND)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Database URL (overrides config/DATABASE_URL)
    #[arg(long)]
    pub database_url: Option<String>,

    /// Number of parking slots (overrides config/PARKCTL_CAPACITY)
    #[arg(long)]
    pub capacity: Option<u32>,
}

/// Run the HTTP server
pub async fn run_serve(mut settings: ParkctlConfig, args: ServeArgs) -> Result<()> {
    if let Some(url) = args.database_url {
        settings.database.url = url;
    }
    if let Some(capacity) = args.capacity {
        settings.parking.capacity = capacity;
    }
    settings.validate()?;

    let config = ServerConfig {
        bind_addr: args.bind.unwrap_or(settings.server.bind),
        cors_permissive: args.cors_permissive || settings.server.cors_permissive,
    };

    tracing::info!(
        database = %settings.database.url,
        capacity = settings.parking.capacity,
        "Starting parkctl server on {}",
        config.bind_addr
    );

    let pool = db::connect(&settings.database.url)
        .await
        .context("Failed to open database")?;
    let service = ParkingService::new(pool, &settings.parking);

    // Run server (blocks until shutdown)
    run_server(service, config)
        .await
        .context("Server error")?;

    Ok(())
}
