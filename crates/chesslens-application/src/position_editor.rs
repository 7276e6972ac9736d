//! Position Editor
//!
//! Edit sessions for a single saved board. The user works on local copies of
//! the FEN, category and notes; nothing reaches the server until
//! [`PositionEditor::commit`], which sends all three fields in one update.
//!
//! Edits are not optimistic: the working copy is only visible
//! inside its own session, so a failed commit simply leaves it in place for
//! another try.

use chesslens_core::board::{BoardId, BoardRecord, BoardUpdate, LibraryService, UNCATEGORIZED};
use chesslens_core::fen::{self, Side};
use chesslens_core::session::{SessionContext, SessionGate};
use chesslens_core::{LensError, Result};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Working state for one board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    id: BoardId,
    fen: String,
    category: String,
    notes: String,
    image_location: Option<String>,
}

impl EditSession {
    /// Seeds the working copies from a fetched record.
    ///
    /// An unset category becomes [`UNCATEGORIZED`] and unset notes become
    /// empty, in the working copy only.
    pub fn from_record(record: &BoardRecord) -> Self {
        Self {
            id: record.id.clone(),
            fen: record.fen.clone(),
            category: record
                .category
                .clone()
                .unwrap_or_else(|| UNCATEGORIZED.to_string()),
            notes: record.notes.clone().unwrap_or_default(),
            image_location: record.image_location.clone(),
        }
    }

    pub fn id(&self) -> &BoardId {
        &self.id
    }

    pub fn fen(&self) -> &str {
        &self.fen
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn image_location(&self) -> Option<&str> {
        self.image_location.as_deref()
    }

    pub fn set_fen(&mut self, text: impl Into<String>) {
        self.fen = text.into();
    }

    pub fn set_category(&mut self, value: impl Into<String>) {
        self.category = value.into();
    }

    pub fn set_notes(&mut self, text: impl Into<String>) {
        self.notes = text.into();
    }

    /// The side-to-move shown by the turn toggle.
    pub fn side_to_move(&self) -> Side {
        fen::side_to_move(&self.fen)
    }

    /// The turn toggle: rewrites the side-to-move field of the working FEN.
    pub fn set_side_to_move(&mut self, side: Side) {
        let updated = fen::set_side_to_move(&self.fen, side);
        self.set_fen(updated);
    }

    /// The full working copy as a partial-update request.
    pub fn to_update(&self) -> BoardUpdate {
        BoardUpdate::full(&self.fen, &self.category, &self.notes)
    }
}

/// Opens and commits edit sessions against the remote library.
pub struct PositionEditor {
    service: Arc<dyn LibraryService>,
    gate: SessionGate,
}

impl PositionEditor {
    pub fn new(service: Arc<dyn LibraryService>, session: SessionContext) -> Self {
        Self {
            service,
            gate: SessionGate::new(session),
        }
    }

    /// Fetches a board and starts an edit session for it.
    ///
    /// # Returns
    ///
    /// - `Ok(EditSession)`: working copies seeded from the server record
    /// - `Err(LensError::NotFound)`: the board does not exist
    /// - `Err(LensError::Fetch)`: the read failed
    /// - `Err(LensError::Unauthenticated)`: no credential
    pub async fn open(&self, id: &BoardId) -> Result<EditSession> {
        self.gate.require()?;
        debug!(board_id = %id, "Opening edit session");

        let record = self.service.get_board(id).await.map_err(|err| {
            let err = err.classify_as(LensError::Fetch);
            error!(board_id = %id, error = %err, "Failed to load board");
            err
        })?;

        Ok(EditSession::from_record(&record))
    }

    /// Sends the whole working copy as one update.
    ///
    /// On success the server's record is returned; it is authoritative and
    /// may differ from the working copy if the server normalized anything.
    /// On failure a `Save` error is returned and `session` is untouched.
    pub async fn commit(&self, session: &EditSession) -> Result<BoardRecord> {
        self.gate.require()?;
        let update = session.to_update();
        debug!(board_id = %session.id, "Committing edit session");

        match self.service.update_board(&session.id, &update).await {
            Ok(record) => {
                info!(board_id = %record.id, "Board updated");
                Ok(record)
            }
            Err(err) => {
                let err = err.classify_as(LensError::Save);
                error!(board_id = %session.id, error = %err, "Failed to save board");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{InMemoryLibrary, board};
    use std::sync::atomic::Ordering;

    const FEN: &str = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3";

    fn signed_in() -> SessionContext {
        SessionContext::with_credential("token".into())
    }

    fn editor_with(boards: Vec<BoardRecord>) -> (Arc<InMemoryLibrary>, PositionEditor) {
        let library = Arc::new(InMemoryLibrary::with_boards(boards));
        let editor = PositionEditor::new(library.clone(), signed_in());
        (library, editor)
    }

    #[tokio::test]
    async fn test_open_seeds_working_copy() {
        let (_, editor) = editor_with(vec![board(7, FEN, None)]);

        let session = editor.open(&BoardId::from(7)).await.unwrap();

        assert_eq!(session.fen(), FEN);
        assert_eq!(session.category(), UNCATEGORIZED);
        assert_eq!(session.notes(), "");
        assert_eq!(session.image_location(), Some("https://images.test/7.png"));
    }

    #[tokio::test]
    async fn test_open_missing_board_is_not_found() {
        let (_, editor) = editor_with(vec![]);

        let err = editor.open(&BoardId::from(99)).await.unwrap_err();

        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_open_transport_failure_is_fetch_error() {
        let (library, editor) = editor_with(vec![board(7, FEN, None)]);
        library.fail_get.store(true, Ordering::SeqCst);

        let err = editor.open(&BoardId::from(7)).await.unwrap_err();

        assert!(matches!(err, LensError::Fetch(_)));
    }

    #[tokio::test]
    async fn test_open_requires_credential() {
        let library = Arc::new(InMemoryLibrary::with_boards(vec![board(7, FEN, None)]));
        let editor = PositionEditor::new(library, SessionContext::new());

        assert_eq!(
            editor.open(&BoardId::from(7)).await,
            Err(LensError::Unauthenticated)
        );
    }

    #[tokio::test]
    async fn test_turn_toggle_rewrites_fen() {
        let (_, editor) = editor_with(vec![board(7, "8/8/8/8/8/8/8/8", None)]);
        let mut session = editor.open(&BoardId::from(7)).await.unwrap();

        session.set_side_to_move(Side::Black);
        assert_eq!(session.fen(), "8/8/8/8/8/8/8/8 b - - 0 1");
        assert_eq!(session.side_to_move(), Side::Black);

        session.set_side_to_move(Side::White);
        assert_eq!(session.fen(), "8/8/8/8/8/8/8/8 w - - 0 1");
    }

    #[tokio::test]
    async fn test_commit_sends_all_fields_once() {
        let (library, editor) = editor_with(vec![board(7, FEN, None)]);
        let mut session = editor.open(&BoardId::from(7)).await.unwrap();
        session.set_category("Puzzle");
        session.set_notes("fork");
        session.set_side_to_move(Side::Black);

        let record = editor.commit(&session).await.unwrap();

        let updates = library.updates.lock().unwrap();
        assert_eq!(updates.len(), 1);
        let (id, update) = &updates[0];
        assert_eq!(id, &BoardId::from(7));
        assert_eq!(update.fen.as_deref(), Some(session.fen()));
        assert_eq!(update.category.as_deref(), Some("Puzzle"));
        assert_eq!(update.notes.as_deref(), Some("fork"));
        assert_eq!(record.category.as_deref(), Some("Puzzle"));
        assert_eq!(fen::side_to_move(&record.fen), Side::Black);
    }

    #[tokio::test]
    async fn test_failed_commit_keeps_working_copy() {
        let (library, editor) = editor_with(vec![board(7, FEN, None)]);
        library.fail_update.store(true, Ordering::SeqCst);
        let mut session = editor.open(&BoardId::from(7)).await.unwrap();
        session.set_category("Puzzle");
        session.set_notes("fork");
        let before = session.clone();

        let err = editor.commit(&session).await.unwrap_err();

        assert!(matches!(err, LensError::Save(_)));
        assert!(err.is_recoverable());
        assert_eq!(session, before);
        assert_eq!(session.category(), "Puzzle");

        library.fail_update.store(false, Ordering::SeqCst);
        let record = editor.commit(&session).await.unwrap();
        assert_eq!(record.notes.as_deref(), Some("fork"));
        assert_eq!(library.updates.lock().unwrap().len(), 2);
    }
}
