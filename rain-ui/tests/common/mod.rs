//! Recording doubles for the front-end ports.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rain_core::contact::ContactField;
use rain_core::store::ResultStore;
use rain_core::{InputField, ShareError};
use rain_store::MemoryBackend;
use rain_ui::app;
use rain_ui::config::AppConfig;
use rain_ui::controller::CalculatorController;
use rain_ui::ports::{CalculatorView, ContactView, ShareLauncher, StatusKind};
use rain_ui::report::ResultReport;

#[derive(Default)]
pub struct Events(Mutex<Vec<String>>);

impl Events {
    pub fn push(&self, event: String) {
        self.0.lock().unwrap().push(event);
    }

    pub fn all(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn with_prefix(&self, prefix: &str) -> Vec<String> {
        self.all()
            .into_iter()
            .filter_map(|e| e.strip_prefix(prefix).map(str::to_string))
            .collect()
    }

    pub fn clear(&self) {
        self.0.lock().unwrap().clear();
    }
}

#[derive(Default)]
pub struct RecordingView {
    pub events: Events,
}

impl CalculatorView for RecordingView {
    fn show_placeholder(&self, message: &str) {
        self.events.push(format!("placeholder:{message}"));
    }
    fn show_status(&self, message: &str) {
        self.events.push(format!("status:{message}"));
    }
    fn render_report(&self, report: &ResultReport) {
        self.events.push(format!("report:{}", report.rows[0].text));
    }
    fn render_error(&self, message: &str) {
        self.events.push(format!("error:{message}"));
    }
    fn set_busy(&self, busy: bool) {
        self.events.push(format!("busy:{busy}"));
    }
    fn focus_field(&self, field: InputField) {
        self.events.push(format!("focus:{}", field.id()));
    }
    fn set_panels_visible(&self, visible: bool) {
        self.events.push(format!("panels:{visible}"));
    }
    fn set_field_value(&self, field: InputField, value: &str) {
        self.events.push(format!("field:{}={value}", field.id()));
    }
    fn set_share_feedback(&self, message: Option<&str>) {
        match message {
            Some(message) => self.events.push(format!("feedback:{message}")),
            None => self.events.push("feedback-cleared".to_string()),
        }
    }
}

/// Launcher whose clipboard paths can be switched off.
#[derive(Default)]
pub struct FakeLauncher {
    pub opened: Mutex<Vec<String>>,
    pub copied: Mutex<Vec<String>>,
    pub clipboard_fails: AtomicBool,
    pub legacy_fails: AtomicBool,
}

impl FakeLauncher {
    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }

    pub fn copied(&self) -> Vec<String> {
        self.copied.lock().unwrap().clone()
    }
}

#[async_trait]
impl ShareLauncher for FakeLauncher {
    fn open_url(&self, url: &str) -> Result<(), ShareError> {
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }

    async fn write_clipboard(&self, text: &str) -> Result<(), ShareError> {
        if self.clipboard_fails.load(Ordering::SeqCst) {
            return Err(ShareError::Clipboard("denied".to_string()));
        }
        self.copied.lock().unwrap().push(format!("clipboard:{text}"));
        Ok(())
    }

    fn legacy_copy(&self, text: &str) -> Result<(), ShareError> {
        if self.legacy_fails.load(Ordering::SeqCst) {
            return Err(ShareError::Clipboard("unsupported".to_string()));
        }
        self.copied.lock().unwrap().push(format!("legacy:{text}"));
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingContactView {
    pub events: Events,
}

impl ContactView for RecordingContactView {
    fn set_field_error(&self, field: ContactField, message: Option<&str>) {
        match message {
            Some(message) => self.events.push(format!("error:{}={message}", field.id())),
            None => self.events.push(format!("ok:{}", field.id())),
        }
    }
    fn focus_field(&self, field: ContactField) {
        self.events.push(format!("focus:{}", field.id()));
    }
    fn set_status(&self, kind: StatusKind, message: &str) {
        self.events.push(format!("status:{kind:?}:{message}"));
    }
    fn clear_status(&self) {
        self.events.push("status-cleared".to_string());
    }
    fn set_submit(&self, enabled: bool, label: &str) {
        self.events.push(format!("submit:{enabled}:{label}"));
    }
    fn reset_form(&self) {
        self.events.push("reset".to_string());
    }
}

pub struct Harness {
    pub controller: Arc<CalculatorController>,
    pub view: Arc<RecordingView>,
    pub launcher: Arc<FakeLauncher>,
    pub store: Arc<ResultStore>,
}

/// Calculator wired to an in-memory store with the default timings.
pub fn harness() -> Harness {
    let view = Arc::new(RecordingView::default());
    let launcher = Arc::new(FakeLauncher::default());
    let store = Arc::new(ResultStore::new(Box::new(MemoryBackend::new())));
    let controller = app::build_calculator(
        &AppConfig::default(),
        Arc::clone(&store),
        view.clone(),
        launcher.clone(),
    )
    .unwrap();

    Harness {
        controller,
        view,
        launcher,
        store,
    }
}
