//! Capture service traits.

use super::model::{ImageUpload, Prediction};
use crate::error::Result;
use async_trait::async_trait;

/// Image-to-FEN recognition service.
///
/// Does not require authentication.
#[async_trait]
pub trait PredictionService: Send + Sync {
    /// Predicts the position shown in `image`.
    ///
    /// # Returns
    ///
    /// - `Ok(Prediction)`: the predicted FEN and its analysis link
    /// - `Err(LensError::Prediction)`: recognition failed or the service was unreachable
    async fn predict(&self, image: &ImageUpload) -> Result<Prediction>;
}

/// Opens an external analysis link.
///
/// Fire-and-forget: implementations must not block and must not fail the
/// caller. Problems are logged and otherwise ignored.
pub trait AnalysisLauncher: Send + Sync {
    fn launch(&self, url: &str);
}
