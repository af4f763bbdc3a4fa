//! Wettkämpfe Timer share server
//!
//! Serves the shared-round API and oEmbed documents.
//!
//! # Usage
//!
//! ```bash
//! BASE_URL=https://timer.example.org cargo run --bin wettkampf-server
//!
//! # In-memory storage
//! REPOSITORY_TYPE=memory cargo run --bin wettkampf-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 3000)
//! - `BASE_URL`: Public origin used in shared URLs
//! - `ROUNDS_STORAGE_DIR`: Directory for shared rounds (default: ./data/rounds)
//! - `REPOSITORY_TYPE` / `NODE_ENV`: storage backend selection
//! - `RUST_LOG`: Log filter, e.g. `info` or `wettkampf_timer=debug` (default: info)
//!
//! A `repository.toml` in the working directory or its parent pins the
//! storage backend (see `db::repo_config`).

use std::net::SocketAddr;

use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use wettkampf_timer::config::AppConfig;
use wettkampf_timer::http::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting Wettkämpfe Timer share server");

    let config = AppConfig::load()?;
    info!(
        base_url = %config.base_url,
        repository_type = ?config.repository_type,
        storage_dir = %config.storage_dir.display(),
        "Configuration loaded"
    );

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let state = AppState::from_config(config)?;

    if !state.storage.get().health_check().await? {
        anyhow::bail!("Shared round storage is not available");
    }

    let app = create_router(state);

    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
