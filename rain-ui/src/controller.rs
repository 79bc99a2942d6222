//! Input orchestration for the harvest calculator.
//!
//! Two triggers produce a calculation: a debounced auto-calculation after
//! any edit to a watched field, and an explicit submission. Both go through
//! the same loading wrapper and renderer. Neither path is gated against the
//! other, so the last one to finish owns the display and the stored slot.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use rain_core::share::{ShareError, ShareLinks, ShareTarget};
use rain_core::store::ResultStore;
use rain_core::{HarvestCalculator, HarvestInput, InputField};
use tracing::{debug, info, warn};

use crate::form::{CalculatorForm, FieldError};
use crate::ports::CalculatorView;
use crate::renderer::{LoadingState, PresentationRenderer};
use crate::report::ResultReport;
use crate::scheduler::Scheduler;
use crate::share_actions::ShareActions;

pub const PLACEHOLDER_MESSAGE: &str = "No calculation has been made yet.";
pub const LOADING_MESSAGE: &str = "Calculating...";

const AUTO_CALC_KEY: &str = "auto-calc";

/// Fields whose edits schedule an auto-calculation.
pub const WATCHED_FIELDS: [InputField; 6] = [
    InputField::Area,
    InputField::Precipitation,
    InputField::Material,
    InputField::TankCapacity,
    InputField::SystemCost,
    InputField::MonthlySavings,
];

#[derive(Debug, Clone, Copy)]
pub struct ControllerTiming {
    pub debounce: Duration,
    pub busy_delay: Duration,
}

impl Default for ControllerTiming {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(500),
            busy_delay: Duration::from_millis(220),
        }
    }
}

pub struct CalculatorController {
    form: Mutex<CalculatorForm>,
    calculator: HarvestCalculator,
    renderer: PresentationRenderer,
    store: Arc<ResultStore>,
    view: Arc<dyn CalculatorView>,
    share: ShareActions,
    share_links: Mutex<Option<ShareLinks>>,
    timers: Scheduler<&'static str>,
    timing: ControllerTiming,
    busy: AtomicBool,
}

impl CalculatorController {
    pub fn new(
        calculator: HarvestCalculator,
        renderer: PresentationRenderer,
        store: Arc<ResultStore>,
        view: Arc<dyn CalculatorView>,
        share: ShareActions,
        timing: ControllerTiming,
    ) -> Self {
        Self {
            form: Mutex::new(CalculatorForm::new()),
            calculator,
            renderer,
            store,
            view,
            share,
            share_links: Mutex::new(None),
            timers: Scheduler::new(),
            timing,
            busy: AtomicBool::new(false),
        }
    }

    fn form(&self) -> MutexGuard<'_, CalculatorForm> {
        self.form.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current raw form values.
    pub fn form_snapshot(&self) -> CalculatorForm {
        self.form().clone()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    pub fn share_links(&self) -> Option<ShareLinks> {
        self.share_links
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_share_links(&self, links: Option<ShareLinks>) {
        *self.share_links.lock().unwrap_or_else(PoisonError::into_inner) = links;
    }

    /// Writes a field value without scheduling anything.
    pub fn set_field(
        &self,
        field: InputField,
        value: impl Into<String>,
    ) {
        self.form().set(field, value);
    }

    /// Records an edit. Edits to watched fields restart the auto-calculation
    /// timer.
    pub fn on_input(
        self: &Arc<Self>,
        field: InputField,
        value: impl Into<String>,
    ) {
        self.set_field(field, value);
        if !WATCHED_FIELDS.contains(&field) {
            return;
        }
        let this = Arc::clone(self);
        self.timers
            .schedule(AUTO_CALC_KEY, self.timing.debounce, async move {
                this.auto_calculate().await;
            });
    }

    /// Whether an auto-calculation is waiting for its quiet period.
    pub fn auto_calc_pending(&self) -> bool {
        self.timers.is_pending(&AUTO_CALC_KEY)
    }

    /// Calculates silently when the minimal fields are usable, otherwise
    /// does nothing.
    pub async fn auto_calculate(&self) -> Option<ResultReport> {
        let input = self.form().auto_input();
        match input {
            Some(input) => self.calculate_with_loading(input).await,
            None => {
                debug!("auto-calculation skipped, form incomplete");
                None
            }
        }
    }

    /// Explicit submission: full validation, then a calculation.
    ///
    /// Ignored while a calculation is in flight.
    pub async fn submit(&self) -> Result<Option<ResultReport>, FieldError> {
        if self.is_busy() {
            debug!("submission ignored while busy");
            return Ok(None);
        }

        let validated = self.form().validate_submission();
        match validated {
            Ok(input) => Ok(self.calculate_with_loading(input).await),
            Err(field_error) => {
                self.show_field_error(field_error);
                Err(field_error)
            }
        }
    }

    fn show_field_error(&self, field_error: FieldError) {
        if field_error.focus {
            self.view.focus_field(field_error.field);
        }
        self.view.render_error(field_error.message);
        self.view.set_busy(false);
    }

    /// Marks the view busy, waits the minimum visible delay, then calculates
    /// and renders. Busy state is cleared on every exit.
    pub async fn calculate_with_loading(&self, input: HarvestInput) -> Option<ResultReport> {
        let _loading = LoadingState::begin(self.view.as_ref(), &self.busy, LOADING_MESSAGE);
        tokio::time::sleep(self.timing.busy_delay).await;

        match self.calculator.calculate(&input) {
            Ok(result) => {
                let report = self.renderer.paint(&result).await;
                if let Some(report) = &report {
                    self.set_share_links(Some(report.share.clone()));
                }
                report
            }
            Err(e) => {
                warn!(error = %e, "calculation failed");
                self.view.render_error(FieldError::for_error(&e).message);
                None
            }
        }
    }

    /// Clears the stored result and returns the display to its initial
    /// state. Field values are left alone.
    pub async fn reset(&self) {
        self.timers.cancel(&AUTO_CALC_KEY);
        self.store.clear().await;
        self.set_share_links(None);
        self.view.show_placeholder(PLACEHOLDER_MESSAGE);
        self.view.set_panels_visible(false);
        info!("calculator reset");
    }

    /// Restores the stored result, if any, without recalculating.
    pub async fn initialize(&self) -> Option<ResultReport> {
        let Some(saved) = self.store.load().await else {
            self.view.show_placeholder(PLACEHOLDER_MESSAGE);
            return None;
        };

        let written = {
            let mut form = self.form();
            form.populate_from(&saved.result)
                .into_iter()
                .map(|field| (field, form.get(field).to_string()))
                .collect::<Vec<_>>()
        };
        for (field, value) in &written {
            self.view.set_field_value(*field, value);
        }

        info!(saved_at = %saved.saved_at, "restoring stored result");
        let report = self.renderer.render(&saved.result).await;
        if let Some(report) = &report {
            self.set_share_links(Some(report.share.clone()));
        }
        report
    }

    /// Runs a share action for the result on display.
    pub async fn share(&self, target: ShareTarget) -> Result<(), ShareError> {
        let links = self.share_links().ok_or(ShareError::NoResult)?;
        self.share.run(&links, target).await
    }
}
