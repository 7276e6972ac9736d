pub mod analyze;
pub mod auth;
pub mod board;
pub mod library;
