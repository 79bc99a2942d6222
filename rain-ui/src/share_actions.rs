//! Share-button handling: opening links and copying with a fallback.

use std::sync::Arc;
use std::time::Duration;

use rain_core::share::{ShareError, ShareLinks, ShareTarget};
use tracing::{debug, warn};

use crate::ports::{CalculatorView, ShareLauncher};
use crate::scheduler::Scheduler;

pub const COPIED_MESSAGE: &str = "Result copied to the clipboard.";
pub const COPY_FAILED_MESSAGE: &str = "Could not copy. Use Ctrl+C/Cmd+C.";
pub const OPEN_FAILED_MESSAGE: &str = "Could not open the share link.";

const FEEDBACK_KEY: &str = "share-feedback";

pub struct ShareActions {
    launcher: Arc<dyn ShareLauncher>,
    view: Arc<dyn CalculatorView>,
    timers: Scheduler<&'static str>,
    feedback_clear: Duration,
}

impl ShareActions {
    pub fn new(
        launcher: Arc<dyn ShareLauncher>,
        view: Arc<dyn CalculatorView>,
        feedback_clear: Duration,
    ) -> Self {
        Self {
            launcher,
            view,
            timers: Scheduler::new(),
            feedback_clear,
        }
    }

    /// Runs one share action. Failures are shown as transient feedback and
    /// also returned to the caller.
    pub async fn run(
        &self,
        links: &ShareLinks,
        target: ShareTarget,
    ) -> Result<(), ShareError> {
        match links.url(target) {
            Some(url) => {
                debug!(%target, "opening share link");
                self.launcher.open_url(url).inspect_err(|e| {
                    warn!(%target, error = %e, "share link failed");
                    self.flash(OPEN_FAILED_MESSAGE);
                })
            }
            None => self.copy(&links.message).await,
        }
    }

    /// Copies `text`, trying the clipboard API first and the legacy
    /// technique second.
    pub async fn copy(&self, text: &str) -> Result<(), ShareError> {
        let copied = match self.launcher.write_clipboard(text).await {
            Ok(()) => Ok(()),
            Err(e) => {
                debug!(error = %e, "clipboard API unavailable, using legacy copy");
                self.launcher.legacy_copy(text)
            }
        };

        match &copied {
            Ok(()) => self.flash(COPIED_MESSAGE),
            Err(e) => {
                warn!(error = %e, "copy failed");
                self.flash(COPY_FAILED_MESSAGE);
            }
        }
        copied
    }

    /// Shows `message` and clears it after the feedback delay. A newer
    /// message replaces the pending clear.
    fn flash(&self, message: &str) {
        self.view.set_share_feedback(Some(message));
        let view = Arc::clone(&self.view);
        self.timers.schedule(FEEDBACK_KEY, self.feedback_clear, async move {
            view.set_share_feedback(None);
        });
    }
}
