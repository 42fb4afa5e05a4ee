//! eiregion server entry point.
//!
//! Loads configuration, opens the cache database and serves postal code
//! lookups over HTTP or MCP stdio. Logging goes to stderr so it never mixes
//! with JSON-RPC on stdout.

use std::sync::Arc;

use anyhow::{Context, Result};
use rmcp::service::serve_server;
use rmcp::transport::io::stdio;
use tracing_subscriber::EnvFilter;

use eiregion_client::EiRegionSite;
use eiregion_core::{AppConfig, CacheDb, Resolver, Transport};

mod error;
mod handler;
mod http;
mod tools;

#[cfg(test)]
mod testing;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load().context("loading configuration")?;

    let db = CacheDb::open(&config.db_path)
        .await
        .with_context(|| format!("opening cache database {}", config.db_path.display()))?;
    let site = EiRegionSite::from_config(&config).context("building remote source client")?;
    let resolver = Resolver::new(Arc::new(db.clone()), Arc::new(site)).with_freshness(config.freshness());

    let served = match config.transport {
        Transport::Http => serve_http(&config, resolver).await,
        Transport::Stdio => serve_stdio(resolver).await,
    };

    db.close().await.context("closing cache database")?;
    tracing::info!("eiregion stopped");

    served
}

async fn serve_http(config: &AppConfig, resolver: Resolver) -> Result<()> {
    let addr = config.listen_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;

    tracing::info!(%addr, "Starting eiregion server on http transport");

    axum::serve(listener, http::router(resolver))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn serve_stdio(resolver: Resolver) -> Result<()> {
    tracing::info!("Starting eiregion server on stdio transport");

    let handler = handler::EiRegionServer::new(resolver);
    let server = serve_server(handler, stdio()).await?;
    server.waiting().await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
