//! Backend entry-point: wires the in-memory store into the HTTP server.

use std::sync::Arc;

use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use backend::outbound::MemoryUserStore;
use backend::server::{ServerConfig, bind};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = ServerConfig::from_env().map_err(std::io::Error::other)?;
    let store = Arc::new(MemoryUserStore::new());
    let bound = bind(&config, store)?;
    bound.server.await
}
