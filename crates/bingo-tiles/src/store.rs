//! The authoritative tile order.
//!
//! Tiles live in an arena; the order is a list of handles into it. A handle
//! carries the generation of the arena it was issued from, so handles held
//! by a filtered view or a drag gesture stop resolving once the sequence is
//! replaced by an import or a reset.
//!
//! Every mutation writes the new order to the snapshot storage before it
//! returns. A failed write leaves the in-memory order in place and comes
//! back as [`Outcome::SaveFailed`].

use tracing::{debug, info, warn};

use bingo_model::Tile;

use crate::error::{ImportError, PersistenceError};
use crate::exchange::{parse_tiles, to_export_json, to_snapshot_json};
use crate::storage::SnapshotStorage;

/// Stable reference to one tile record in a [`TileStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileHandle {
    generation: u32,
    slot: u32,
}

/// Direction of a single-step keyboard move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDirection {
    Up,
    Down,
}

/// Result of a store operation.
#[must_use]
#[derive(Debug)]
pub enum Outcome {
    /// Nothing changed; nothing was written.
    Unchanged,
    /// The order changed and was persisted.
    Saved,
    /// The order changed in memory but could not be persisted.
    SaveFailed(PersistenceError),
}

impl Outcome {
    pub fn changed(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }

    pub fn warning(&self) -> Option<&PersistenceError> {
        match self {
            Self::SaveFailed(error) => Some(error),
            Self::Unchanged | Self::Saved => None,
        }
    }
}

/// Where the initial order came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitialSource {
    Snapshot,
    Canonical,
}

#[derive(Debug)]
pub struct TileStore<S> {
    source: Vec<Tile>,
    arena: Vec<Tile>,
    order: Vec<TileHandle>,
    generation: u32,
    initial: InitialSource,
    storage: S,
}

impl<S> TileStore<S> {
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Whether the order was restored from a snapshot or the canonical set.
    pub fn initial_source(&self) -> InitialSource {
        self.initial
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Tiles in order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.order.iter().map(|&handle| self.tile(handle))
    }

    /// Handles in order.
    pub fn handles(&self) -> &[TileHandle] {
        &self.order
    }

    /// Tile at absolute index `index`.
    pub fn get(&self, index: usize) -> Option<&Tile> {
        self.order.get(index).map(|&handle| self.tile(handle))
    }

    /// Tile behind `handle`, if the handle belongs to the current sequence.
    pub fn resolve(&self, handle: TileHandle) -> Option<&Tile> {
        if handle.generation != self.generation {
            return None;
        }
        self.arena.get(handle.slot as usize)
    }

    /// Absolute index of `handle` in the current order.
    pub fn position(&self, handle: TileHandle) -> Option<usize> {
        self.order.iter().position(|&current| current == handle)
    }

    /// Clone of the current order.
    pub fn to_vec(&self) -> Vec<Tile> {
        self.tiles().cloned().collect()
    }

    /// The current order as pretty JSON (two-space indent).
    pub fn export_json(&self) -> serde_json::Result<String> {
        to_export_json(&self.tiles().collect::<Vec<_>>())
    }

    fn tile(&self, handle: TileHandle) -> &Tile {
        &self.arena[handle.slot as usize]
    }

    /// Install `tiles` as a fresh arena under a new generation.
    fn install(&mut self, tiles: Vec<Tile>) {
        self.generation = self.generation.wrapping_add(1);
        let generation = self.generation;
        self.order = (0..tiles.len())
            .map(|slot| TileHandle {
                generation,
                slot: slot as u32,
            })
            .collect();
        self.arena = tiles;
    }
}

impl<S: SnapshotStorage> TileStore<S> {
    /// Restore the order from `storage`, falling back to `source`.
    ///
    /// A snapshot that cannot be read or is not an array of records is
    /// ignored.
    pub fn open(source: Vec<Tile>, storage: S) -> Self {
        let restored = match storage.load() {
            Ok(Some(text)) => match parse_tiles(&text) {
                Ok(tiles) => Some(tiles),
                Err(error) => {
                    warn!(%error, "ignoring malformed tile snapshot");
                    None
                }
            },
            Ok(None) => None,
            Err(error) => {
                warn!(%error, "could not read tile snapshot");
                None
            }
        };
        let (tiles, initial) = match restored {
            Some(tiles) => (tiles, InitialSource::Snapshot),
            None => (source.clone(), InitialSource::Canonical),
        };
        info!(count = tiles.len(), source = ?initial, "opened tile store");
        let mut store = Self {
            source,
            arena: Vec::new(),
            order: Vec::new(),
            generation: 0,
            initial,
            storage,
        };
        store.install(tiles);
        store
    }

    /// Move the tile at `from` so it sits at `to` once removed.
    ///
    /// The target is read after the removal, so a forward move lands one
    /// slot further than the tile originally at `to`. Out-of-range indices
    /// and `from == to` leave the order unchanged.
    pub fn move_absolute(&mut self, from: usize, to: usize) -> Outcome {
        let len = self.order.len();
        if from == to || from >= len || to >= len {
            debug!(from, to, len, "move skipped");
            return Outcome::Unchanged;
        }
        let moved = self.order.remove(from);
        self.order.insert(to, moved);
        debug!(from, to, "moved tile");
        self.persist()
    }

    /// Move with indices that may have failed to resolve; `None` is a no-op.
    pub fn move_resolved(&mut self, from: Option<usize>, to: Option<usize>) -> Outcome {
        match (from, to) {
            (Some(from), Some(to)) => self.move_absolute(from, to),
            _ => {
                debug!(?from, ?to, "unresolved move dropped");
                Outcome::Unchanged
            }
        }
    }

    /// Swap the tile at `index` with its neighbour in `direction`.
    pub fn move_step(&mut self, index: usize, direction: StepDirection) -> Outcome {
        let target = match direction {
            StepDirection::Up => index.checked_sub(1),
            StepDirection::Down => index.checked_add(1),
        };
        match target {
            Some(target) if target < self.order.len() => self.move_absolute(index, target),
            _ => Outcome::Unchanged,
        }
    }

    /// Replace the whole order with `tiles`.
    pub fn replace_all(&mut self, tiles: Vec<Tile>) -> Outcome {
        info!(count = tiles.len(), "replacing tile order");
        self.install(tiles);
        self.persist()
    }

    /// Parse `text` and replace the order with it.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError`] when `text` is not a JSON array of records;
    /// the order is left untouched.
    pub fn import_json(&mut self, text: &str) -> Result<Outcome, ImportError> {
        let tiles = parse_tiles(text)?;
        Ok(self.replace_all(tiles))
    }

    /// Discard the current order in favour of the canonical source.
    pub fn reset_to_source(&mut self) -> Outcome {
        info!(count = self.source.len(), "resetting tile order to source");
        let tiles = self.source.clone();
        self.install(tiles);
        self.persist()
    }

    fn persist(&mut self) -> Outcome {
        let json = match to_snapshot_json(&self.tiles().collect::<Vec<_>>()) {
            Ok(json) => json,
            Err(source) => {
                let error = PersistenceError::Serialization { source };
                warn!(%error, "tile order kept in memory only");
                return Outcome::SaveFailed(error);
            }
        };
        match self.storage.save(&json) {
            Ok(()) => Outcome::Saved,
            Err(error) => {
                warn!(%error, "tile order kept in memory only");
                Outcome::SaveFailed(error)
            }
        }
    }
}
