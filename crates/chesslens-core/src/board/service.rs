//! Remote library service trait.
//!
//! Defines the contract for the server-side store of saved boards.

use super::model::{BoardId, BoardRecord, BoardUpdate};
use crate::capture::ImageUpload;
use crate::error::Result;
use async_trait::async_trait;

/// An abstract remote store for the user's saved boards.
///
/// This trait decouples the library workflows from the transport (HTTP in
/// production, in-memory fakes in tests). Every method requires an
/// authenticated session; implementations refuse to send a request without
/// a credential and report `LensError::Unauthenticated`.
///
/// # Error contract
///
/// Implementations convert every transport or server failure into the kind
/// listed for the method. Nothing else escapes.
#[async_trait]
pub trait LibraryService: Send + Sync {
    /// Uploads the source image and creates a board for `fen`.
    ///
    /// # Returns
    ///
    /// - `Ok(BoardRecord)`: the created board with its assigned id
    /// - `Err(LensError::Save)`: the upload or record creation failed
    async fn create_board(&self, image: &ImageUpload, fen: &str) -> Result<BoardRecord>;

    /// Lists all boards, in the order the server returns them.
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<BoardRecord>)`: the full collection
    /// - `Err(LensError::Fetch)`: the read failed
    async fn list_boards(&self) -> Result<Vec<BoardRecord>>;

    /// Fetches a single board.
    ///
    /// # Returns
    ///
    /// - `Ok(BoardRecord)`: board found
    /// - `Err(LensError::NotFound)`: no board with that id
    /// - `Err(LensError::Fetch)`: the read failed
    async fn get_board(&self, id: &BoardId) -> Result<BoardRecord>;

    /// Applies a partial update.
    ///
    /// # Returns
    ///
    /// - `Ok(BoardRecord)`: the server's normalized record after the update
    /// - `Err(LensError::Save)`: the update failed
    async fn update_board(&self, id: &BoardId, update: &BoardUpdate) -> Result<BoardRecord>;

    /// Deletes a board.
    ///
    /// # Returns
    ///
    /// - `Ok(())`: deleted
    /// - `Err(LensError::Delete)`: the delete failed
    async fn delete_board(&self, id: &BoardId) -> Result<()>;
}
