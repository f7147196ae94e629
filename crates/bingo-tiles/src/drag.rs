use tracing::debug;

use crate::storage::SnapshotStorage;
use crate::store::{Outcome, TileHandle, TileStore};
use crate::view::FilteredView;

/// State of one drag-and-drop gesture.
///
/// Holds the dragged tile between `begin` and `drop_onto`; dropping always
/// clears it, whether or not a move happened.
#[derive(Debug, Default)]
pub struct DragGesture {
    dragged: Option<TileHandle>,
}

impl DragGesture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start dragging the tile shown at `visible` in `view`.
    pub fn begin(&mut self, view: &FilteredView, visible: usize) {
        self.dragged = view.handle(visible);
        debug!(visible, resolved = self.dragged.is_some(), "drag started");
    }

    pub fn is_active(&self) -> bool {
        self.dragged.is_some()
    }

    pub fn cancel(&mut self) {
        self.dragged = None;
    }

    /// Drop onto the tile shown at `visible`, moving the dragged tile there.
    pub fn drop_onto<S: SnapshotStorage>(
        &mut self,
        store: &mut TileStore<S>,
        view: &FilteredView,
        visible: usize,
    ) -> Outcome {
        let from = self
            .dragged
            .take()
            .and_then(|handle| store.position(handle));
        let to = view.to_absolute_index(store, visible);
        store.move_resolved(from, to)
    }
}
