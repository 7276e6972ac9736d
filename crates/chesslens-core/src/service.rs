//! Service trait re-exports.
//!
//! Centralized access to every remote and presentation-side collaborator the
//! workflows depend on.

pub use crate::auth::AuthService;
pub use crate::board::LibraryService;
pub use crate::capture::{AnalysisLauncher, PredictionService};
pub use crate::navigation::Navigator;
