//! Navigation targets.
//!
//! The core decides *where* a workflow should lead; how the move is
//! performed (a page change, printing the next command) belongs to the
//! presentation layer behind [`Navigator`].

use crate::board::BoardId;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Library,
    /// The position editor for one saved board
    Editor(BoardId),
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Login => f.write_str("/login"),
            Route::Library => f.write_str("/library"),
            Route::Editor(id) => write!(f, "/board/{}", id),
        }
    }
}

pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}
