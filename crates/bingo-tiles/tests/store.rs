//! Integration tests for the tile store and filtered views.

use proptest::prelude::*;
use tempfile::tempdir;

use bingo_model::Tile;
use bingo_tiles::{
    FileSnapshot, FilteredView, ImportError, InitialSource, MemorySnapshot, Outcome, TileStore,
    TypeFilter,
};

const KINDS: [&str; 4] = ["Early", "Mid", "Late", "Passive"];

fn sample_tiles(len: usize) -> Vec<Tile> {
    (0..len)
        .map(|idx| Tile::new(idx as u64, format!("Tile {idx}"), KINDS[idx % KINDS.len()]))
        .collect()
}

fn ids<S>(store: &TileStore<S>) -> Vec<String> {
    store.tiles().map(Tile::id_text).collect()
}

proptest! {
    #[test]
    fn moves_permute_without_loss(
        len in 1usize..12,
        moves in proptest::collection::vec((0usize..14, 0usize..14), 0..20),
    ) {
        let mut store = TileStore::open(sample_tiles(len), MemorySnapshot::new());
        for (from, to) in moves {
            let _ = store.move_absolute(from, to);
        }
        let mut after = ids(&store);
        after.sort();
        let mut before: Vec<String> = sample_tiles(len).iter().map(Tile::id_text).collect();
        before.sort();
        prop_assert_eq!(after, before);
    }

    #[test]
    fn self_move_is_noop(len in 1usize..10, index in 0usize..10) {
        let mut store = TileStore::open(sample_tiles(len), MemorySnapshot::new());
        let before = ids(&store);
        prop_assert!(!store.move_absolute(index, index).changed());
        prop_assert_eq!(ids(&store), before);
    }

    #[test]
    fn filtering_preserves_store_order(
        len in 0usize..16,
        kind in proptest::sample::select(vec!["ALL", "Early", "mid", "LATE"]),
        query in "[0-9 ]{0,2}",
    ) {
        let store = TileStore::open(sample_tiles(len), MemorySnapshot::new());
        let view = FilteredView::compute(&store, &query, &TypeFilter::parse(kind));
        let positions: Vec<usize> = (0..view.len())
            .map(|visible| view.to_absolute_index(&store, visible).unwrap())
            .collect();
        prop_assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }
}

#[test]
fn export_then_import_reproduces_order() {
    let mut source = sample_tiles(4);
    source[1].insert("LongDescription", "Hover text");
    source[2].insert("Points", 5);
    let mut store = TileStore::open(source, MemorySnapshot::new());
    let _ = store.move_absolute(0, 3);
    let before = store.to_vec();

    let exported = store.export_json().unwrap();
    let outcome = store.import_json(&exported).unwrap();

    assert!(matches!(outcome, Outcome::Saved));
    assert_eq!(store.to_vec(), before);
    assert_eq!(store.export_json().unwrap(), exported);
}

#[test]
fn hand_written_import_exports_field_for_field() {
    let text = r#"[
        {"Id": "b-2", "Name": "Jad", "Type": "Late", "Goal": "3", "Shots": null},
        {"Id": null, "Name": 12, "Description": null, "Image": false},
        {"Name": "Kraken", "Tags": ["sea", {"deep": true}], "Points": 1.5}
    ]"#;
    let mut store = TileStore::open(sample_tiles(2), MemorySnapshot::new());

    let outcome = store.import_json(text).unwrap();

    assert!(matches!(outcome, Outcome::Saved));
    assert_eq!(store.len(), 3);
    let input: serde_json::Value = serde_json::from_str(text).unwrap();
    assert_eq!(
        store.export_json().unwrap(),
        serde_json::to_string_pretty(&input).unwrap()
    );
}

#[test]
fn snapshot_with_mistyped_fields_is_restored() {
    let snapshot = MemorySnapshot::with_contents(
        r#"[{"Id":2,"Name":"b","Shots":"2"},{"Id":1,"Name":"a","Description":null}]"#,
    );
    let store = TileStore::open(sample_tiles(2), snapshot);

    assert_eq!(store.initial_source(), InitialSource::Snapshot);
    let names: Vec<&str> = store.tiles().map(Tile::name).collect();
    assert_eq!(names, vec!["b", "a"]);
    assert_eq!(ids(&store), vec!["2", "1"]);
    assert_eq!(
        store.get(1).and_then(|tile| tile.get("Description")),
        Some(&serde_json::Value::Null)
    );
}

#[test]
fn identical_tiles_resolve_to_their_own_position() {
    let twin = Tile::new(7, "Twin", "Early");
    let source = vec![twin.clone(), Tile::new(8, "Other", "Late"), twin];
    let mut store = TileStore::open(source, MemorySnapshot::new());

    let view = FilteredView::compute(&store, "twin", &TypeFilter::All);
    assert_eq!(view.len(), 2);
    assert_eq!(view.to_absolute_index(&store, 0), Some(0));
    assert_eq!(view.to_absolute_index(&store, 1), Some(2));

    // Move the second twin to the front; the first twin must follow to slot 1.
    let first = view.handle(0).unwrap();
    let second = view.handle(1).unwrap();
    let _ = store.move_resolved(view.to_absolute_index(&store, 1), Some(0));
    assert_eq!(store.position(second), Some(0));
    assert_eq!(store.position(first), Some(1));
}

#[test]
fn rejected_import_leaves_store_and_snapshot_untouched() {
    let mut store = TileStore::open(sample_tiles(3), MemorySnapshot::new());
    let _ = store.move_absolute(0, 1);
    let snapshot = store.storage().contents().map(str::to_string);
    let before = ids(&store);

    for text in ["{}", "not json", "[1, 2]", "\"tiles\""] {
        let error = store.import_json(text).unwrap_err();
        assert!(matches!(
            error,
            ImportError::NotAnArray { .. } | ImportError::Parse(_) | ImportError::NotARecord { .. }
        ));
    }

    assert_eq!(ids(&store), before);
    assert_eq!(store.storage().contents().map(str::to_string), snapshot);
}

#[test]
fn file_snapshot_survives_reopen() {
    let dir = tempdir().unwrap();

    let mut store = TileStore::open(sample_tiles(3), FileSnapshot::in_dir(dir.path()));
    let _ = store.move_absolute(2, 0);
    let ordered = ids(&store);
    drop(store);

    let reopened = TileStore::open(sample_tiles(3), FileSnapshot::in_dir(dir.path()));
    assert_eq!(ids(&reopened), ordered);
    assert_eq!(ordered, vec!["2", "0", "1"]);
}

#[test]
fn reset_overwrites_snapshot_with_source() {
    let dir = tempdir().unwrap();

    let mut store = TileStore::open(sample_tiles(3), FileSnapshot::in_dir(dir.path()));
    let _ = store.move_absolute(0, 2);
    let _ = store.reset_to_source();
    drop(store);

    let reopened = TileStore::open(sample_tiles(3), FileSnapshot::in_dir(dir.path()));
    assert_eq!(ids(&reopened), vec!["0", "1", "2"]);
}
