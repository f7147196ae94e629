//! Filtered, searched views over a [`TileStore`].

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use bingo_model::Tile;

use crate::store::{TileHandle, TileStore};

/// Tile type filter. `ALL` (any case) keeps every type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TypeFilter {
    #[default]
    All,
    Only(String),
}

impl TypeFilter {
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("ALL") {
            Self::All
        } else {
            Self::Only(value.to_string())
        }
    }

    pub fn matches(&self, tile: &Tile) -> bool {
        match self {
            Self::All => true,
            Self::Only(kind) => tile.kind().to_lowercase() == kind.to_lowercase(),
        }
    }
}

impl FromStr for TypeFilter {
    type Err = Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(value))
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("ALL"),
            Self::Only(kind) => f.write_str(kind),
        }
    }
}

fn matches_query(tile: &Tile, query: &str) -> bool {
    if query.trim().is_empty() {
        return true;
    }
    let query = query.to_lowercase();
    tile.name().to_lowercase().contains(&query)
        || tile.description().to_lowercase().contains(&query)
        || tile.id_text().to_lowercase().contains(&query)
}

/// Order-preserving subsequence of a store, held as handles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteredView {
    handles: Vec<TileHandle>,
}

impl FilteredView {
    /// Keep tiles whose type passes `filter` and whose name, description,
    /// or id contains `query` (case-insensitive). A blank query keeps all.
    pub fn compute<S>(store: &TileStore<S>, query: &str, filter: &TypeFilter) -> Self {
        let handles = store
            .handles()
            .iter()
            .zip(store.tiles())
            .filter(|(_, tile)| filter.matches(tile) && matches_query(tile, query))
            .map(|(&handle, _)| handle)
            .collect();
        Self { handles }
    }

    /// View of every tile in store order.
    pub fn unfiltered<S>(store: &TileStore<S>) -> Self {
        Self {
            handles: store.handles().to_vec(),
        }
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn handle(&self, visible: usize) -> Option<TileHandle> {
        self.handles.get(visible).copied()
    }

    /// Visible tiles, skipping handles that no longer resolve.
    pub fn tiles<'a, S>(&'a self, store: &'a TileStore<S>) -> impl Iterator<Item = &'a Tile> + 'a {
        self.handles
            .iter()
            .filter_map(move |&handle| store.resolve(handle))
    }

    /// Absolute store index of the tile shown at `visible`.
    ///
    /// `None` when `visible` is out of range or the view predates a
    /// replacement of the store's sequence.
    pub fn to_absolute_index<S>(&self, store: &TileStore<S>, visible: usize) -> Option<usize> {
        self.handle(visible)
            .and_then(|handle| store.position(handle))
    }
}
