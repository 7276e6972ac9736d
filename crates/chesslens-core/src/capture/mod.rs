//! Capture domain module.
//!
//! Types and service interfaces for turning a photograph into a FEN.
//!
//! # Module Structure
//!
//! - `model`: `ImageUpload` and `Prediction`
//! - `service`: `PredictionService` and `AnalysisLauncher` traits

mod model;
pub mod service;

pub use model::{ImageUpload, Prediction};
pub use service::{AnalysisLauncher, PredictionService};
