//! Scripted controller that drives a short encounter through the publisher.
//!
//! Useful for watching the viewer without a real controller attached.
//!
//! # Examples
//!
//! ```bash
//! TRACKER_SNAPSHOT_PATH=/tmp/battle_state.json \
//! TRACKER_BESTIARY_PATH=data/monsters.json \
//!     cargo run -p tracker-client --bin demo-encounter
//! ```

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use runtime::{PublisherConfig, Runtime};
use tracker_client::logging;
use tracker_content::{BestiaryLoader, JsonBestiary};
use tracker_core::{CombatantFactory, CombatantState, MonsterRequest};

const STEP_DELAY: Duration = Duration::from_millis(800);

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = PublisherConfig::from_env();
    let _log_guard = logging::setup_logging("demo.log")?;

    let bestiary = match std::env::var("TRACKER_BESTIARY_PATH") {
        Ok(path) => BestiaryLoader::load(&PathBuf::from(path))?,
        Err(_) => JsonBestiary::new(),
    };
    tracing::info!("Bestiary entries: {}", bestiary.len());
    tracing::info!("Snapshot: {}", config.snapshot_path.display());

    let runtime = Runtime::builder().config(config).build().await?;
    let encounter = runtime.encounter();

    let mut rng = StdRng::from_entropy();
    let mut factory = CombatantFactory::new();
    let aria = factory.create_player("Aria", None, &mut rng);
    let bram = factory.create_player("Bram", None, &mut rng);
    let goblins = factory
        .create_monsters(&MonsterRequest::new("Goblin", 2), &bestiary, &mut rng)
        .context("Failed to create goblins")?;
    let goblin_ids: Vec<_> = goblins.iter().map(|goblin| goblin.id()).collect();
    let (aria_id, bram_id) = (aria.id(), bram.id());

    encounter.write(|e| {
        e.add_combatants([aria, bram]);
        e.add_combatants(goblins);
    })?;

    let first = encounter.write(|e| e.start_combat())?;
    tracing::info!("First to act: {:?}", first);
    step(&runtime).await?;

    encounter.write(|e| e.add_effect(bram_id, "Bless", Some(3)))??;
    encounter.write(|e| e.set_concentration(bram_id, true))??;
    step(&runtime).await?;

    encounter.write(|e| e.damage(&goblin_ids, 4))??;
    step(&runtime).await?;

    if let Some(&first_goblin) = goblin_ids.first() {
        encounter.write(|e| e.set_state(first_goblin, CombatantState::Dead))??;
    }
    encounter.write(|e| e.set_state(aria_id, CombatantState::Unconscious))??;
    step(&runtime).await?;

    for _ in 0..4 {
        let group = encounter.write(|e| e.next_turn())?;
        let round = encounter.read(|e| e.round())?;
        tracing::info!("Round {}: {:?}", round, group);
        step(&runtime).await?;
    }

    encounter.write(|e| e.end_combat())?;
    step(&runtime).await?;

    runtime.shutdown().await?;
    tracing::info!("Demo finished");
    Ok(())
}

async fn step(runtime: &Runtime) -> Result<()> {
    let outcome = runtime.flush().await?;
    tracing::debug!("publish: {:?}", outcome);
    tokio::time::sleep(STEP_DELAY).await;
    Ok(())
}
