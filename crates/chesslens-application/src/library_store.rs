//! Library Store
//!
//! Holds the local view of the user's saved boards and keeps it consistent
//! with the remote library. Deletes are optimistic: the board disappears from
//! the local collection immediately and comes back if the server refuses.
//!
//! The store is the only writer of the collection. Readers either take a
//! snapshot with [`LibraryStore::boards`] or follow changes through
//! [`LibraryStore::subscribe`].
//!
//! # Concurrent deletes
//!
//! Each delete captures its own snapshot. If two deletes overlap and the
//! first to fail settles after the other succeeded, its rollback restores the
//! already-deleted board as well; the collection then reflects whichever
//! delete settled last until the next [`load`](LibraryStore::load).

use crate::optimistic::with_optimistic_update;
use chesslens_core::board::{BoardId, BoardRecord, LibraryService};
use chesslens_core::filter::CategoryFilter;
use chesslens_core::session::{SessionContext, SessionGate};
use chesslens_core::{LensError, Result};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

/// Shared, immutable snapshot of the collection.
pub type LibraryCollection = Arc<Vec<BoardRecord>>;

pub struct LibraryStore {
    service: Arc<dyn LibraryService>,
    gate: SessionGate,
    boards: watch::Sender<LibraryCollection>,
}

impl LibraryStore {
    /// Creates an empty store. Call [`load`](Self::load) to populate it.
    pub fn new(service: Arc<dyn LibraryService>, session: SessionContext) -> Self {
        let (boards, _) = watch::channel(Arc::new(Vec::new()));
        Self {
            service,
            gate: SessionGate::new(session),
            boards,
        }
    }

    /// Fetches the full collection and replaces the local view with it.
    ///
    /// On failure the local view is cleared, so no stale or partial data is
    /// left for the display layer, and a `Fetch` error is returned.
    pub async fn load(&self) -> Result<LibraryCollection> {
        self.gate.require()?;
        debug!("Loading library");

        match self.service.list_boards().await {
            Ok(boards) => {
                let boards = Arc::new(boards);
                info!(count = boards.len(), "Library loaded");
                self.boards.send_replace(Arc::clone(&boards));
                Ok(boards)
            }
            Err(err) => {
                let err = err.classify_as(LensError::Fetch);
                error!(error = %err, "Failed to load library");
                self.boards.send_replace(Arc::new(Vec::new()));
                Err(err)
            }
        }
    }

    /// Deletes a board optimistically.
    ///
    /// The board is removed from the local view (and observers notified)
    /// before the remote delete is issued. If the remote delete fails, the
    /// collection as it was immediately before the removal is restored and a
    /// `Delete` error is returned.
    pub async fn remove(&self, id: &BoardId) -> Result<()> {
        self.gate.require()?;
        debug!(board_id = %id, "Removing board");

        let service = Arc::clone(&self.service);
        let result = with_optimistic_update(
            &self.boards,
            |boards: &mut Vec<BoardRecord>| boards.retain(|board| &board.id != id),
            async move {
                service
                    .delete_board(id)
                    .await
                    .map_err(|err| err.classify_as(LensError::Delete))
            },
        )
        .await;

        match &result {
            Ok(()) => info!(board_id = %id, "Board deleted"),
            Err(err) => warn!(board_id = %id, error = %err, "Delete failed, library rolled back"),
        }
        result
    }

    /// The current collection.
    pub fn boards(&self) -> LibraryCollection {
        Arc::clone(&self.boards.borrow())
    }

    /// The current collection narrowed to `filter`.
    pub fn filtered(&self, filter: CategoryFilter) -> Vec<BoardRecord> {
        filter.apply(&self.boards()).into_owned()
    }

    /// Looks up a board in the local view.
    pub fn get(&self, id: &BoardId) -> Option<BoardRecord> {
        self.boards.borrow().iter().find(|board| &board.id == id).cloned()
    }

    /// Follows every change to the collection.
    pub fn subscribe(&self) -> watch::Receiver<LibraryCollection> {
        self.boards.subscribe()
    }
}
