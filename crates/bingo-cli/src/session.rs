//! Wiring between the data root, the dataset catalog, and the tile store.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use bingo_data::{load_source_set, load_tiles};
use bingo_index::{DatasetCatalog, EraResolver};
use bingo_tiles::{
    DragGesture, FileSnapshot, FilteredView, Outcome, SnapshotStorage, TileStore, TypeFilter,
};

use crate::config::ResolvedPaths;

/// Build the dataset catalog from every entity list under `root`.
pub fn load_catalog(root: &Path) -> Result<DatasetCatalog> {
    let set = load_source_set(root)
        .with_context(|| format!("load datasets from {}", root.display()))?;
    info!(
        root = %root.display(),
        entities = set.entity_count(),
        eras = set.eras.len(),
        "loaded datasets"
    );
    let mut catalog = DatasetCatalog::new(EraResolver::new(&set.eras));
    for source in set.sources {
        catalog.add_source(source.key, source.label, source.entities);
    }
    Ok(catalog)
}

/// Open the tile store over the canonical tile file and its snapshot.
pub fn open_tile_store(paths: &ResolvedPaths) -> Result<TileStore<FileSnapshot>> {
    let source = load_tiles(&paths.tile_source)
        .with_context(|| format!("load tiles from {}", paths.tile_source.display()))?;
    debug!(snapshot = %paths.snapshot_path.display(), "opening tile store");
    Ok(TileStore::open(
        source,
        FileSnapshot::new(&paths.snapshot_path),
    ))
}

/// Move the tile shown at `from` onto the tile shown at `to`, both counted
/// in the view selected by `query` and `filter`.
pub fn move_visible<S: SnapshotStorage>(
    store: &mut TileStore<S>,
    query: &str,
    filter: &TypeFilter,
    from: usize,
    to: usize,
) -> Outcome {
    let view = FilteredView::compute(store, query, filter);
    let mut drag = DragGesture::new();
    drag.begin(&view, from);
    drag.drop_onto(store, &view, to)
}

/// One-line notice for an outcome that needs the user's attention.
pub fn outcome_notice(outcome: &Outcome) -> Option<String> {
    outcome.warning().map(|error| match error.suggestion() {
        Some(suggestion) => format!("{} {}", error.user_message(), suggestion),
        None => error.user_message(),
    })
}

#[cfg(test)]
mod tests {
    use bingo_model::Tile;
    use bingo_tiles::MemorySnapshot;

    use super::*;

    fn store() -> TileStore<MemorySnapshot> {
        TileStore::open(
            vec![
                Tile::new(1, "Kraken", "Early"),
                Tile::new(2, "Jad", "Late"),
                Tile::new(3, "Zulrah", "Mid"),
                Tile::new(4, "Inferno", "Late"),
            ],
            MemorySnapshot::new(),
        )
    }

    fn names(store: &TileStore<MemorySnapshot>) -> Vec<String> {
        store.tiles().map(|tile| tile.name().to_string()).collect()
    }

    #[test]
    fn move_visible_translates_filtered_indices() {
        let mut store = store();
        let outcome = move_visible(&mut store, "", &TypeFilter::parse("late"), 1, 0);
        assert!(outcome.changed());
        assert_eq!(names(&store), vec!["Kraken", "Inferno", "Jad", "Zulrah"]);
    }

    #[test]
    fn move_visible_out_of_range_is_noop() {
        let mut store = store();
        assert!(!move_visible(&mut store, "", &TypeFilter::All, 0, 9).changed());
        assert_eq!(names(&store), vec!["Kraken", "Jad", "Zulrah", "Inferno"]);
    }

    #[test]
    fn saved_outcome_has_no_notice() {
        let mut store = store();
        let outcome = store.move_absolute(0, 1);
        assert!(outcome_notice(&outcome).is_none());
    }

    #[test]
    fn failed_save_has_notice() {
        let mut store = TileStore::open(
            vec![Tile::new(1, "a", "Early"), Tile::new(2, "b", "Early")],
            MemorySnapshot::new().with_quota(1),
        );
        let notice = outcome_notice(&store.move_absolute(0, 1)).unwrap();
        assert!(notice.contains("session only"));
    }
}
