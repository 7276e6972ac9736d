//! Board domain model.
//!
//! A board is one saved chess position in the user's library: the FEN text,
//! the photograph it was scanned from, and the user's own annotations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Label shown for records whose category is absent or outside [`Category`].
///
/// This is a presentation value only. It is never written back on behalf of
/// the user.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Opaque identifier assigned by the remote service.
///
/// The wire form may be a JSON number or a string; both collapse into the
/// same textual id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawBoardId", into = "String")]
pub struct BoardId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawBoardId {
    Number(i64),
    Text(String),
}

impl From<RawBoardId> for BoardId {
    fn from(raw: RawBoardId) -> Self {
        match raw {
            RawBoardId::Number(n) => BoardId(n.to_string()),
            RawBoardId::Text(s) => BoardId(s),
        }
    }
}

impl BoardId {
    pub fn new(id: impl Into<String>) -> Self {
        BoardId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BoardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<BoardId> for String {
    fn from(id: BoardId) -> Self {
        id.0
    }
}

impl From<&str> for BoardId {
    fn from(id: &str) -> Self {
        BoardId(id.to_string())
    }
}

impl From<String> for BoardId {
    fn from(id: String) -> Self {
        BoardId(id)
    }
}

impl From<i64> for BoardId {
    fn from(id: i64) -> Self {
        BoardId(id.to_string())
    }
}

/// The fixed set of categories a board can be filed under.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
pub enum Category {
    Tactics,
    Opening,
    Middlegame,
    Endgame,
    Blunder,
    Puzzle,
    Important,
    Strategy,
}

impl Category {
    /// The stored and displayed name of the category.
    pub fn label(self) -> &'static str {
        self.into()
    }
}

/// A saved chess position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardRecord {
    /// Identifier assigned by the remote service on creation
    pub id: BoardId,
    /// Full FEN text of the position
    pub fen: String,
    /// URL of the source photograph
    pub image_location: Option<String>,
    /// Raw stored category, not necessarily a member of [`Category`]
    pub category: Option<String>,
    /// Free-form notes
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl BoardRecord {
    /// The stored category if it is one of the known [`Category`] values.
    pub fn known_category(&self) -> Option<Category> {
        self.category.as_deref().and_then(|c| c.parse().ok())
    }
}

/// Maps a record's stored category to the label shown to the user.
///
/// Known categories show as themselves; absent or unknown values show as
/// [`UNCATEGORIZED`].
pub fn display_category(record: &BoardRecord) -> &'static str {
    record
        .known_category()
        .map(Category::label)
        .unwrap_or(UNCATEGORIZED)
}

/// Partial update of a board. Only present fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fen: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl BoardUpdate {
    /// An update carrying all three editable fields.
    pub fn full(
        fen: impl Into<String>,
        category: impl Into<String>,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            fen: Some(fen.into()),
            category: Some(category.into()),
            notes: Some(notes.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fen.is_none() && self.category.is_none() && self.notes.is_none()
    }
}
