use anyhow::Result;
use clap::Parser;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use snapi::{api, config::Config, graph::SocialGraph, store::RedisStore};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::parse();

    // Connect once at startup; a connection error fails the process.
    let store = RedisStore::connect(&config.redis_url).await?;
    tracing::info!(url = %config.redis_url, "database connected");

    let graph = SocialGraph::new(store, config.prefix.clone());
    let app = api::router(graph).layer(TraceLayer::new_for_http());

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "API server running");
    axum::serve(listener, app).await?;
    Ok(())
}
