//! Capture Workflow
//!
//! One user action, "analyze this photo", spanning several remote calls:
//!
//! 1. Predict the FEN from the image. Failure ends the invocation.
//! 2. Open the external analysis link (fire-and-forget).
//! 3. If signed in, save the image and FEN to the library. Awaited, because
//!    the new id is needed for the next step.
//! 4. If the save succeeded, navigate to the editor for the new board.
//!
//! A workflow instance runs at most one capture at a time. A second call while
//! one is in flight is rejected with [`LensError::Busy`], never queued.

use chesslens_core::board::{BoardRecord, LibraryService};
use chesslens_core::capture::{AnalysisLauncher, ImageUpload, Prediction, PredictionService};
use chesslens_core::navigation::{Navigator, Route};
use chesslens_core::session::{SessionContext, SessionGate};
use chesslens_core::{LensError, Result};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    Idle,
    Analyzing,
}

/// How a successful prediction ended.
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureOutcome {
    /// Not signed in: the analysis link was opened, nothing was saved.
    Unsaved { prediction: Prediction },
    /// Saved to the library and navigated to the editor.
    Saved {
        prediction: Prediction,
        record: BoardRecord,
    },
    /// The analysis link was opened but saving failed. Nothing is rolled back.
    SaveFailed {
        prediction: Prediction,
        error: LensError,
    },
}

impl CaptureOutcome {
    pub fn prediction(&self) -> &Prediction {
        match self {
            CaptureOutcome::Unsaved { prediction }
            | CaptureOutcome::Saved { prediction, .. }
            | CaptureOutcome::SaveFailed { prediction, .. } => prediction,
        }
    }
}

/// Clears the busy flag on every exit path, including early returns.
struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| BusyGuard(flag))
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct CaptureWorkflow {
    predictor: Arc<dyn PredictionService>,
    library: Arc<dyn LibraryService>,
    launcher: Arc<dyn AnalysisLauncher>,
    navigator: Arc<dyn Navigator>,
    gate: SessionGate,
    busy: AtomicBool,
}

impl CaptureWorkflow {
    pub fn new(
        predictor: Arc<dyn PredictionService>,
        library: Arc<dyn LibraryService>,
        launcher: Arc<dyn AnalysisLauncher>,
        navigator: Arc<dyn Navigator>,
        session: SessionContext,
    ) -> Self {
        Self {
            predictor,
            library,
            launcher,
            navigator,
            gate: SessionGate::new(session),
            busy: AtomicBool::new(false),
        }
    }

    pub fn state(&self) -> CaptureState {
        if self.busy.load(Ordering::Acquire) {
            CaptureState::Analyzing
        } else {
            CaptureState::Idle
        }
    }

    /// Runs one capture.
    ///
    /// # Returns
    ///
    /// - `Ok(CaptureOutcome)`: the prediction succeeded; see the variant for
    ///   what happened to the save
    /// - `Err(LensError::Prediction)`: the image was not analyzed
    /// - `Err(LensError::Busy)`: another capture is in flight
    pub async fn analyze(&self, image: &ImageUpload) -> Result<CaptureOutcome> {
        let _busy = BusyGuard::acquire(&self.busy).ok_or_else(|| {
            warn!("Capture rejected: already analyzing");
            LensError::Busy
        })?;

        if !image.is_image() {
            return Err(LensError::prediction(format!(
                "'{}' is not an image ({})",
                image.file_name, image.content_type
            )));
        }

        debug!(file = %image.file_name, bytes = image.len(), "Submitting image for prediction");
        let prediction = self.predictor.predict(image).await.map_err(|err| {
            let err = err.classify_as(LensError::Prediction);
            error!(error = %err, "Prediction failed");
            err
        })?;
        info!(fen = %prediction.fen, "Position predicted");

        self.launcher.launch(&prediction.external_analysis_url);

        if !self.gate.check().is_allowed() {
            debug!("Not signed in, skipping save");
            return Ok(CaptureOutcome::Unsaved { prediction });
        }

        match self.library.create_board(image, &prediction.fen).await {
            Ok(record) => {
                info!(board_id = %record.id, "Capture saved to library");
                self.navigator.navigate(Route::Editor(record.id.clone()));
                Ok(CaptureOutcome::Saved { prediction, record })
            }
            Err(err) => {
                let error = err.classify_as(LensError::Save);
                error!(error = %error, "Failed to save capture");
                Ok(CaptureOutcome::SaveFailed { prediction, error })
            }
        }
    }
}
