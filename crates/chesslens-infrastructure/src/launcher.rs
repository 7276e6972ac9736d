//! Opening analysis links in the system browser.

use chesslens_core::capture::AnalysisLauncher;
use tracing::{debug, warn};

/// Opens links with the platform's default handler, without waiting for it.
///
/// Failures are logged and swallowed; the capture continues either way.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserLauncher;

impl AnalysisLauncher for BrowserLauncher {
    fn launch(&self, url: &str) {
        debug!(%url, "Opening analysis link");
        if let Err(e) = open::that_detached(url) {
            warn!(%url, error = %e, "Failed to open analysis link");
        }
    }
}

/// Only logs the link. For headless use, where the caller prints it instead.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLauncher;

impl AnalysisLauncher for NoopLauncher {
    fn launch(&self, url: &str) {
        debug!(%url, "Browser disabled, not opening analysis link");
    }
}
