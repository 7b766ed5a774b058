//! Encounter viewer binary.
//!
//! Polls the snapshot written by the controller and logs narration and
//! initiative changes until interrupted.
//!
//! # Examples
//!
//! ```bash
//! TRACKER_SNAPSHOT_PATH=/tmp/battle_state.json cargo run -p tracker-client --bin viewer
//! ```

use anyhow::Result;
use client_frontend_core::{Consumer, ConsumerConfig};
use tracker_client::{logging, viewer};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = ConsumerConfig::from_env();
    let _log_guard = logging::setup_logging("viewer.log")?;

    tracing::info!("Starting encounter viewer");
    tracing::info!("Snapshot: {}", config.snapshot_path.display());

    let consumer = Consumer::builder().config(config).build()?;
    let rendered = viewer::follow(consumer, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl-c: {}", e);
        }
    })
    .await?;

    tracing::info!("Viewer stopped after {} frames", rendered);
    Ok(())
}
