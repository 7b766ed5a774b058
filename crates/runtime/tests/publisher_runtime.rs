use std::sync::Arc;
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use runtime::{PublisherConfig, Runtime, TickOutcome};
use snapshot_protocol::{
    FileSnapshotStore, InMemorySnapshotStore, SnapshotDocument, SnapshotStore, WireState,
};
use tracker_core::{CombatantFactory, CombatantState, EmptyBestiary, MonsterRequest};

fn slow_config(path: std::path::PathBuf) -> PublisherConfig {
    PublisherConfig {
        snapshot_path: path,
        // Long enough that only explicit flushes publish during the test.
        publish_interval: Duration::from_secs(3600),
        command_buffer: 4,
    }
}

#[tokio::test]
async fn publishes_combat_and_ends_idle() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("battle_state.json");
    let runtime = Runtime::builder()
        .config(slow_config(path.clone()))
        .build()
        .await
        .unwrap();

    let mut factory = CombatantFactory::new();
    let mut rng = StdRng::seed_from_u64(21);
    let hero = factory.create_player("Aria", Some(18), &mut rng);
    let wolves = factory
        .create_monsters(
            &MonsterRequest::new("Wolf", 2)
                .with_initiative(12)
                .with_hp_formula("11"),
            &EmptyBestiary,
            &mut rng,
        )
        .unwrap();
    let wolf_ids: Vec<_> = wolves.iter().map(|w| w.id()).collect();

    let encounter = runtime.encounter();
    encounter
        .write(|e| {
            e.add_combatant(hero);
            e.add_combatants(wolves);
            e.start_combat();
        })
        .unwrap();

    // The first interval tick fires immediately, so the flush may find the
    // document already written.
    let outcome = runtime.flush().await.unwrap();
    assert!(matches!(outcome, TickOutcome::Written | TickOutcome::Unchanged));
    assert_eq!(runtime.flush().await.unwrap(), TickOutcome::Unchanged);

    let store = FileSnapshotStore::new(&path).unwrap();
    let doc = store.read().unwrap().unwrap();
    assert!(doc.running);
    assert_eq!(doc.round, Some(1));
    assert_eq!(doc.active_ids, vec!["id_1".to_string()]);
    assert_eq!(doc.combatants.len(), 3);
    assert_eq!(doc.combatants[1].display_name, "Wolf");

    encounter
        .write(|e| e.set_state(wolf_ids[0], CombatantState::Dead))
        .unwrap()
        .unwrap();
    assert_eq!(runtime.flush().await.unwrap(), TickOutcome::Written);
    let doc = store.read().unwrap().unwrap();
    assert_eq!(doc.combatant("id_2").map(|c| c.state), Some(WireState::Dead));

    runtime.shutdown().await.unwrap();
    assert_eq!(store.read().unwrap(), Some(SnapshotDocument::idle()));
}

#[tokio::test]
async fn interval_ticks_publish_without_flush() {
    let store = Arc::new(InMemorySnapshotStore::new());
    let mut config = slow_config(std::path::PathBuf::from("unused.json"));
    config.publish_interval = Duration::from_millis(5);

    let runtime = Runtime::builder()
        .config(config)
        .store(store.clone())
        .build()
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(50)).await;

    // Idle is written once, not on every tick.
    assert_eq!(store.writes(), 1);

    runtime.shutdown().await.unwrap();
    assert_eq!(store.writes(), 2);
}
