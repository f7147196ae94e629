//! Curated bingo tile ordering.
//!
//! This crate keeps the authoritative tile order and reconciles edits made
//! against filtered views with it.
//!
//! # Features
//!
//! - **Arena-backed order** with generation-tagged handles, so views never
//!   confuse identical-looking tiles
//! - **Write-through persistence** of every mutation to a snapshot slot
//! - **Atomic writes** for file snapshots (temp file + rename)
//! - **JSON import/export** of the whole order
//!
//! # Example
//!
//! ```ignore
//! use bingo_tiles::{FileSnapshot, FilteredView, TileStore, TypeFilter};
//!
//! let mut store = TileStore::open(source_tiles, FileSnapshot::in_dir(&state_dir));
//! let view = FilteredView::compute(&store, "kraken", &TypeFilter::All);
//! let from = view.to_absolute_index(&store, 0);
//! let to = view.to_absolute_index(&store, 1);
//! let outcome = store.move_resolved(from, to);
//! if let Some(warning) = outcome.warning() {
//!     eprintln!("{}", warning.user_message());
//! }
//! ```

mod drag;
mod error;
mod exchange;
mod storage;
mod store;
mod view;

pub use drag::DragGesture;
pub use error::{ImportError, PersistenceError, Result};
pub use exchange::parse_tiles;
pub use storage::{FileSnapshot, MemorySnapshot, SNAPSHOT_FILE, SnapshotStorage};
pub use store::{InitialSource, Outcome, StepDirection, TileHandle, TileStore};
pub use view::{FilteredView, TypeFilter};
