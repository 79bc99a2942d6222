//! Contact-form controller. Validates on blur, input, submit and Enter; a
//! valid submission is acknowledged after a short delay without being sent
//! anywhere.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use rain_core::contact::{ContactField, ContactSubmission};
use tracing::info;

use crate::ports::{ContactView, StatusKind};

pub const FORM_ERRORS_MESSAGE: &str = "There are errors in the form. Fix them before sending.";
pub const ENTER_BLOCKED_MESSAGE: &str = "Complete the required fields before continuing.";
pub const PREPARING_MESSAGE: &str = "Form valid, preparing to send.";
pub const SENT_MESSAGE: &str = "Inquiry sent successfully. Thank you.";
pub const SENDING_LABEL: &str = "Sending...";
pub const SUBMIT_LABEL: &str = "Send inquiry";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactOutcome {
    /// Validation failed; the errors are shown next to their fields.
    Invalid(Vec<(ContactField, &'static str)>),
    Sent,
    /// A previous submission is still being acknowledged.
    Ignored,
}

pub struct ContactFormController {
    form: Mutex<ContactSubmission>,
    view: Arc<dyn ContactView>,
    send_delay: Duration,
    sending: AtomicBool,
}

impl ContactFormController {
    pub fn new(
        view: Arc<dyn ContactView>,
        send_delay: Duration,
    ) -> Self {
        Self {
            form: Mutex::new(ContactSubmission::default()),
            view,
            send_delay,
            sending: AtomicBool::new(false),
        }
    }

    fn form(&self) -> MutexGuard<'_, ContactSubmission> {
        self.form.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn submission(&self) -> ContactSubmission {
        self.form().clone()
    }

    /// Replaces every field at once, as when a whole form is pasted in.
    pub fn fill(&self, submission: ContactSubmission) {
        *self.form() = submission;
    }

    /// Records an edit to a text field. The consent checkbox goes through
    /// [`Self::on_consent`]; text addressed to it is ignored.
    pub fn on_text_input(
        &self,
        field: ContactField,
        value: &str,
    ) {
        {
            let mut form = self.form();
            let slot = match field {
                ContactField::Name => &mut form.name,
                ContactField::Email => &mut form.email,
                ContactField::Phone => &mut form.phone,
                ContactField::Message => &mut form.message,
                ContactField::Consent => return,
            };
            *slot = value.to_string();
        }
        self.after_input(field);
    }

    pub fn on_consent(&self, checked: bool) {
        self.form().consent = checked;
        self.after_input(ContactField::Consent);
    }

    /// Clears the status line and, once the field is valid, its error.
    fn after_input(&self, field: ContactField) {
        self.view.clear_status();
        if self.form().validate_field(field).is_none() {
            self.view.set_field_error(field, None);
        }
    }

    /// Validates a single field when it loses focus.
    pub fn on_blur(&self, field: ContactField) -> Option<&'static str> {
        let message = self.form().validate_field(field);
        self.view.set_field_error(field, message);
        message
    }

    /// Paints every field's state and focuses the first invalid one.
    fn show_errors(&self) -> Vec<(ContactField, &'static str)> {
        let submission = self.submission();
        let mut errors = Vec::new();
        for &field in ContactField::all() {
            let message = submission.validate_field(field);
            self.view.set_field_error(field, message);
            if let Some(message) = message {
                errors.push((field, message));
            }
        }
        if let Some((first, _)) = errors.first() {
            self.view.focus_field(*first);
        }
        errors
    }

    /// Enter pressed inside the form. Returns `true` when the key press is
    /// blocked because the form is incomplete. Enter inside the message
    /// textarea always passes through.
    pub fn on_enter(&self, in_message: bool) -> bool {
        if in_message || self.form().is_valid() {
            return false;
        }
        self.show_errors();
        self.view.set_status(StatusKind::Error, ENTER_BLOCKED_MESSAGE);
        true
    }

    pub async fn submit(&self) -> ContactOutcome {
        if self.sending.load(Ordering::SeqCst) {
            return ContactOutcome::Ignored;
        }

        let errors = self.show_errors();
        if !errors.is_empty() {
            self.view.set_status(StatusKind::Error, FORM_ERRORS_MESSAGE);
            return ContactOutcome::Invalid(errors);
        }

        let Some(_sending) = SendingGuard::begin(&self.sending, self.view.as_ref()) else {
            return ContactOutcome::Ignored;
        };
        self.view.set_status(StatusKind::Success, PREPARING_MESSAGE);

        tokio::time::sleep(self.send_delay).await;

        self.view.set_status(StatusKind::Success, SENT_MESSAGE);
        *self.form() = ContactSubmission::default();
        self.view.reset_form();
        for &field in ContactField::all() {
            self.view.set_field_error(field, None);
        }
        info!("contact inquiry accepted");
        ContactOutcome::Sent
    }
}

/// Holds the submit button in its sending state. Dropping it re-enables the
/// button, also when the submission future is cancelled mid-delay.
struct SendingGuard<'a> {
    flag: &'a AtomicBool,
    view: &'a dyn ContactView,
}

impl<'a> SendingGuard<'a> {
    fn begin(flag: &'a AtomicBool, view: &'a dyn ContactView) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst).ok()?;
        view.set_submit(false, SENDING_LABEL);
        Some(Self { flag, view })
    }
}

impl Drop for SendingGuard<'_> {
    fn drop(&mut self) {
        self.view.set_submit(true, SUBMIT_LABEL);
        self.flag.store(false, Ordering::SeqCst);
    }
}
