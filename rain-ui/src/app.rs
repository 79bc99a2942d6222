//! Wiring between configuration, storage and the controllers.

use std::sync::Arc;

use anyhow::{Context, Result};
use rain_core::HarvestCalculator;
use rain_core::store::ResultStore;
use rain_store::BackendKind;
use tracing::debug;

use crate::config::AppConfig;
use crate::contact_form::ContactFormController;
use crate::controller::{CalculatorController, ControllerTiming};
use crate::ports::{CalculatorView, ContactView, ShareLauncher};
use crate::renderer::PresentationRenderer;
use crate::share_actions::ShareActions;

/// Opens the configured backend and wraps it in a [`ResultStore`].
pub async fn open_store(config: &AppConfig) -> Result<Arc<ResultStore>> {
    let storage = &config.storage;
    debug!(backend = %storage.backend, location = %storage.location, "opening result store");

    let context = || format!("cannot open '{}' storage backend", storage.backend);
    let kind = BackendKind::parse(&storage.backend).with_context(context)?;
    let backend = kind.open(&storage.location).await.with_context(context)?;
    Ok(Arc::new(ResultStore::new(backend)))
}

/// Builds the calculator controller and everything it drives.
pub fn build_calculator(
    config: &AppConfig,
    store: Arc<ResultStore>,
    view: Arc<dyn CalculatorView>,
    launcher: Arc<dyn ShareLauncher>,
) -> Result<Arc<CalculatorController>> {
    let calculator = HarvestCalculator::new(config.calculation.harvest_config())
        .context("invalid calculation settings")?;

    let renderer = PresentationRenderer::new(
        Arc::clone(&view),
        Arc::clone(&store),
        config.calculation.default_tank_capacity_l,
        config.share.page_url.clone(),
        config.share.contacts.clone(),
    );
    let share = ShareActions::new(launcher, Arc::clone(&view), config.timing.share_feedback());
    let timing = ControllerTiming {
        debounce: config.timing.debounce(),
        busy_delay: config.timing.busy_delay(),
    };

    Ok(Arc::new(CalculatorController::new(
        calculator, renderer, store, view, share, timing,
    )))
}

pub fn build_contact(
    config: &AppConfig,
    view: Arc<dyn ContactView>,
) -> ContactFormController {
    ContactFormController::new(view, config.timing.contact_send())
}
