//! Board domain module.
//!
//! This module contains the saved-position domain model and the remote
//! library service interface.
//!
//! # Module Structure
//!
//! - `model`: `BoardRecord`, `BoardId`, `BoardUpdate`, `Category` and the
//!   display-category mapping
//! - `service`: `LibraryService` trait for the remote library
//!
//! # Usage
//!
//! ```ignore
//! use chesslens_core::board::{BoardRecord, Category, LibraryService};
//! ```

mod model;
pub mod service;

// Re-export public API
pub use model::{BoardId, BoardRecord, BoardUpdate, Category, UNCATEGORIZED, display_category};

pub use service::LibraryService;
