use std::fs;

use tempfile::TempDir;

use taskmap::model::{NodePositions, Position, ViewportState};
use taskmap::storage::{FileStore, KeyValueStore, MemoryStore};
use taskmap::view_state::{ViewStore, NODE_POSITIONS_KEY, SELECTED_TEAM_KEY, VIEWPORT_KEY};

fn sample_positions() -> NodePositions {
    let mut positions = NodePositions::new();
    positions.insert("t1_intro".to_string(), Position::new(-12.5, 40.0));
    positions.insert("t2".to_string(), Position::new(200.0, 0.25));
    positions
}

fn sample_viewport() -> ViewportState {
    ViewportState {
        zoom: 1.5,
        pan: Position::new(-30.0, 75.5),
    }
}

fn exercise_slots<S: KeyValueStore>(view: &mut ViewStore<S>) {
    assert!(view.node_positions().is_none());
    assert!(view.viewport().is_none());
    assert!(view.selected_team_id().is_none());

    view.set_node_positions(&sample_positions()).expect("positions");
    view.set_viewport(&sample_viewport()).expect("viewport");
    view.set_selected_team_id("red").expect("team");

    assert_eq!(view.node_positions(), Some(sample_positions()));
    assert_eq!(view.viewport(), Some(sample_viewport()));
    assert_eq!(view.selected_team_id().as_deref(), Some("red"));
}

#[test]
fn memory_store_slots_read_back() {
    let mut view = ViewStore::new(MemoryStore::new());
    exercise_slots(&mut view);
}

#[test]
fn file_store_slots_survive_reopen() {
    let temp = TempDir::new().expect("tempdir");
    let mut view = ViewStore::new(FileStore::in_dir(temp.path()));
    exercise_slots(&mut view);

    let reopened = ViewStore::new(FileStore::in_dir(temp.path()));
    assert_eq!(reopened.node_positions(), Some(sample_positions()));
    assert_eq!(reopened.viewport(), Some(sample_viewport()));
    assert_eq!(reopened.selected_team_id().as_deref(), Some("red"));
}

#[test]
fn stored_values_use_expected_wire_shapes() {
    let mut view = ViewStore::new(MemoryStore::new());
    view.set_viewport(&sample_viewport()).expect("viewport");
    view.set_node_positions(&sample_positions()).expect("positions");
    view.set_selected_team_id("blue").expect("team");

    let raw_viewport = view.inner().get(VIEWPORT_KEY).expect("raw viewport");
    let parsed: serde_json::Value = serde_json::from_str(&raw_viewport).expect("json");
    assert_eq!(parsed["zoom"], 1.5);
    assert_eq!(parsed["pan"]["x"], -30.0);

    let raw_positions = view.inner().get(NODE_POSITIONS_KEY).expect("raw positions");
    let parsed: serde_json::Value = serde_json::from_str(&raw_positions).expect("json");
    assert_eq!(parsed["t2"]["x"], 200.0);

    // Team id is a bare string, not JSON-quoted
    assert_eq!(view.inner().get(SELECTED_TEAM_KEY).as_deref(), Some("blue"));
}

#[test]
fn malformed_slots_read_as_absent() {
    let mut store = MemoryStore::new();
    store.set(NODE_POSITIONS_KEY, "{\"t1\": {\"x\": 1").expect("set");
    store.set(VIEWPORT_KEY, "not json at all").expect("set");
    let view = ViewStore::new(store);

    assert!(view.node_positions().is_none());
    assert!(view.viewport().is_none());
}

#[test]
fn wrong_shape_reads_as_absent() {
    let mut store = MemoryStore::new();
    store.set(VIEWPORT_KEY, "[1, 2, 3]").expect("set");
    let view = ViewStore::new(store);
    assert!(view.viewport().is_none());
}

#[test]
fn corrupt_store_file_reads_as_absent() {
    let temp = TempDir::new().expect("tempdir");
    let store = FileStore::in_dir(temp.path());
    fs::write(store.path(), "\u{0}\u{1}garbage").expect("write");
    let view = ViewStore::new(store);

    assert!(view.node_positions().is_none());
    assert!(view.viewport().is_none());
    assert!(view.selected_team_id().is_none());
}

#[test]
fn clear_all_leaves_team_selection() {
    let temp = TempDir::new().expect("tempdir");
    let mut view = ViewStore::new(FileStore::in_dir(temp.path()));
    exercise_slots(&mut view);

    view.clear_all().expect("clear");

    assert!(view.node_positions().is_none());
    assert!(view.viewport().is_none());
    assert_eq!(view.selected_team_id().as_deref(), Some("red"));
}

#[test]
fn empty_team_id_reads_as_unaffiliated() {
    let mut view = ViewStore::new(MemoryStore::new());
    view.set_selected_team_id("").expect("team");
    assert!(view.selected_team_id().is_none());
}
