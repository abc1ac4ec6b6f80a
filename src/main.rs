//! Resort API server
//!
//! ```text
//! PORT=5000 JWT_SECRET=change-me SEED_DATA=true cargo run --bin resort-server
//! ```

use anyhow::Result;
use resort::prelude::*;
use resort::seed::seed_if_empty;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    match dotenvy::dotenv() {
        Err(e) if !e.not_found() => eprintln!("failed to read .env: {e}"),
        _ => {}
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::load()?;
    tracing::info!(?config, "configuration loaded");

    if config.jwt_secret.is_none() {
        tracing::warn!("JWT_SECRET is not set, sign-in and sign-up will fail");
    }

    let addr = config.listen_addr();
    let seed = config.seed;
    let host = ServerHost::connect(config).await?;

    if seed {
        seed_if_empty(&host).await?;
    }

    ServerBuilder::new(host).serve(&addr).await
}
