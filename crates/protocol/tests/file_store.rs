use std::fs;

use snapshot_protocol::{
    CombatantEntry, FileSnapshotStore, SnapshotDocument, SnapshotStore, StoreError, WireKind,
};

fn sample() -> SnapshotDocument {
    let entry = CombatantEntry {
        id: "id_1".into(),
        name: "Aria".into(),
        display_name: "Aria".into(),
        kind: WireKind::Player,
        ..CombatantEntry::default()
    };
    SnapshotDocument::running(1, vec!["id_1".into()], vec![entry]).with_timestamp(1_700_000_000.25)
}

#[test]
fn missing_file_reads_as_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileSnapshotStore::new(dir.path().join("battle_state.json")).unwrap();

    assert!(store.read().unwrap().is_none());
}

#[test]
fn write_replaces_whole_document() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileSnapshotStore::new(dir.path().join("nested/battle_state.json")).unwrap();

    store.write(&sample()).unwrap();
    assert_eq!(store.read().unwrap(), Some(sample()));

    store.write(&SnapshotDocument::idle()).unwrap();
    assert_eq!(store.read().unwrap(), Some(SnapshotDocument::idle()));

    // Only the target remains; the temp file was renamed away.
    let entries: Vec<_> = fs::read_dir(dir.path().join("nested"))
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(entries, vec!["battle_state.json"]);
}

#[test]
fn written_file_is_pretty_json() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileSnapshotStore::new(dir.path().join("state.json")).unwrap();
    store.write(&sample()).unwrap();

    let text = fs::read_to_string(store.path()).unwrap();
    assert!(text.contains("\n  \"running\": true"));
}

#[test]
fn corrupt_file_is_a_json_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    fs::write(&path, "{ not json").unwrap();
    let store = FileSnapshotStore::new(&path).unwrap();

    assert!(matches!(store.read(), Err(StoreError::Json(_))));
}
