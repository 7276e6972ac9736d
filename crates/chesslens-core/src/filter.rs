//! Category filtering of a library collection.
//!
//! A read-only view: the input collection is never modified, and the "All"
//! selection hands back the very same slice.

use crate::board::{BoardRecord, Category, UNCATEGORIZED, display_category};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Label of the selection that shows every board.
pub const ALL: &str = "All";

/// The category selection of the library view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
    /// Boards whose stored category is absent or unknown
    Uncategorized,
}

impl CategoryFilter {
    /// The label this selection matches against [`display_category`].
    pub fn label(&self) -> &'static str {
        match self {
            CategoryFilter::All => ALL,
            CategoryFilter::Only(category) => category.label(),
            CategoryFilter::Uncategorized => UNCATEGORIZED,
        }
    }

    pub fn matches(&self, record: &BoardRecord) -> bool {
        match self {
            CategoryFilter::All => true,
            _ => display_category(record) == self.label(),
        }
    }

    /// Applies the selection to `collection`.
    ///
    /// `All` borrows the input unchanged. Any other selection returns the
    /// matching records in their original order.
    pub fn apply<'a>(&self, collection: &'a [BoardRecord]) -> Cow<'a, [BoardRecord]> {
        match self {
            CategoryFilter::All => Cow::Borrowed(collection),
            _ => Cow::Owned(
                collection
                    .iter()
                    .filter(|record| self.matches(record))
                    .cloned()
                    .collect(),
            ),
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ALL => Ok(CategoryFilter::All),
            UNCATEGORIZED => Ok(CategoryFilter::Uncategorized),
            other => other
                .parse::<Category>()
                .map(CategoryFilter::Only)
                .map_err(|_| format!("Unknown category: '{}'", other)),
        }
    }
}
