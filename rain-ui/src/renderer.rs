//! Paints results into a [`CalculatorView`] and persists what was shown.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use rain_core::share::ShareContacts;
use rain_core::store::ResultStore;
use rain_core::{HarvestResult, SavedHarvest};
use tracing::{error, info, warn};

use crate::ports::CalculatorView;
use crate::report::ResultReport;

pub const RENDER_ERROR_MESSAGE: &str = "Error displaying result.";

/// Busy indicator held for the duration of a unit of work.
///
/// The indicator is cleared when the guard is dropped, on every exit path.
pub struct LoadingState<'a> {
    view: &'a dyn CalculatorView,
    flag: Option<&'a AtomicBool>,
}

impl<'a> LoadingState<'a> {
    /// Marks the view busy and shows `status`.
    pub fn begin(
        view: &'a dyn CalculatorView,
        flag: &'a AtomicBool,
        status: &str,
    ) -> Self {
        flag.store(true, Ordering::SeqCst);
        view.set_busy(true);
        view.show_status(status);
        Self {
            view,
            flag: Some(flag),
        }
    }

    /// Guard that only clears the view's indicator.
    fn clearing(view: &'a dyn CalculatorView) -> Self {
        Self { view, flag: None }
    }
}

impl Drop for LoadingState<'_> {
    fn drop(&mut self) {
        if let Some(flag) = self.flag {
            flag.store(false, Ordering::SeqCst);
        }
        self.view.set_busy(false);
    }
}

pub struct PresentationRenderer {
    view: Arc<dyn CalculatorView>,
    store: Arc<ResultStore>,
    default_tank_capacity_l: f64,
    page_url: String,
    contacts: ShareContacts,
}

impl PresentationRenderer {
    pub fn new(
        view: Arc<dyn CalculatorView>,
        store: Arc<ResultStore>,
        default_tank_capacity_l: f64,
        page_url: impl Into<String>,
        contacts: ShareContacts,
    ) -> Self {
        Self {
            view,
            store,
            default_tank_capacity_l,
            page_url: page_url.into(),
            contacts,
        }
    }

    /// Paints `result`, shows the panels and persists the displayed record.
    ///
    /// Failures are logged and replaced by a generic message. The busy
    /// indicator is cleared before returning in every case.
    pub async fn render(&self, result: &HarvestResult) -> Option<ResultReport> {
        let _loading = LoadingState::clearing(self.view.as_ref());
        self.paint(result).await
    }

    /// [`render`](Self::render) without touching the busy indicator, for
    /// callers that already hold a [`LoadingState`].
    pub(crate) async fn paint(&self, result: &HarvestResult) -> Option<ResultReport> {
        let report = match ResultReport::build(
            result,
            self.default_tank_capacity_l,
            &self.page_url,
            &self.contacts,
        ) {
            Ok(report) => report,
            Err(e) => {
                error!(error = %e, "could not display result");
                self.view.render_error(RENDER_ERROR_MESSAGE);
                return None;
            }
        };

        self.view.render_report(&report);
        self.view.set_panels_visible(true);

        let saved = SavedHarvest::new(report.result.clone(), Utc::now());
        match self.store.save(&saved).await {
            Ok(()) => info!(
                volume_l = report.result.volume_l,
                backend = self.store.backend_name(),
                "result displayed and stored"
            ),
            Err(e) => warn!(error = %e, "result displayed but not stored"),
        }

        Some(report)
    }
}
