//! Application layer for ChessLens.
//!
//! This crate provides the use cases that coordinate the domain types with
//! the remote services: the library store with optimistic deletes, the
//! position editor, and the capture workflow.

pub mod capture_workflow;
pub mod library_store;
pub mod optimistic;
pub mod position_editor;

#[cfg(test)]
mod testing;

pub use capture_workflow::{CaptureOutcome, CaptureState, CaptureWorkflow};
pub use library_store::LibraryStore;
pub use optimistic::with_optimistic_update;
pub use position_editor::{EditSession, PositionEditor};
