//! Domain layer for ChessLens.
//!
//! Pure types and service interfaces: FEN field edits, saved boards and their
//! categories, the credential session and its gate, and the traits the
//! application layer drives (remote library, prediction, authentication,
//! link-out, navigation). Nothing in this crate performs I/O.

pub mod auth;
pub mod board;
pub mod capture;
pub mod config;
pub mod error;
pub mod fen;
pub mod filter;
pub mod navigation;
pub mod service;
pub mod session;

// Re-export common error type
pub use error::{LensError, Result};
