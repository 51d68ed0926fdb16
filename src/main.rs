use std::net::SocketAddr;

use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Config;
use server::make_app;
use store::Store;

mod config;
mod datamodel;
mod error;
mod server;
mod store;

#[cfg(test)]
mod client;
#[cfg(test)]
mod tests;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();

    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .init();

    let store = Store::open(&config.database).await?;
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(
        %addr,
        database = %store.path().display(),
        "serving GraphQL on {}",
        server::GRAPHQL_PATH
    );

    axum::serve(listener, make_app(store)).await?;
    Ok(())
}
