//! Contact-form flows: per-field feedback, blocked Enter and the delayed
//! acknowledgement of a valid inquiry.

mod common;

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use rain_core::contact::{ContactField, ContactSubmission};
use rain_ui::app;
use rain_ui::config::AppConfig;
use rain_ui::contact_form::{
    ContactFormController, ContactOutcome, ENTER_BLOCKED_MESSAGE, FORM_ERRORS_MESSAGE,
    PREPARING_MESSAGE, SENDING_LABEL, SENT_MESSAGE, SUBMIT_LABEL,
};

use common::RecordingContactView;

fn contact() -> (Arc<ContactFormController>, Arc<RecordingContactView>) {
    let view = Arc::new(RecordingContactView::default());
    let controller = app::build_contact(&AppConfig::default(), view.clone());
    (Arc::new(controller), view)
}

fn valid_submission() -> ContactSubmission {
    ContactSubmission {
        name: "Ana López".to_string(),
        email: "ana@example.com".to_string(),
        phone: "+52 (722) 123-4567".to_string(),
        message: "I would like a quote for my roof.".to_string(),
        consent: true,
    }
}

#[tokio::test]
async fn empty_form_reports_every_field_and_focuses_the_first() {
    let (controller, view) = contact();

    let errors = match controller.submit().await {
        ContactOutcome::Invalid(errors) => errors,
        other => panic!("expected validation errors, got {other:?}"),
    };
    let fields: Vec<_> = errors.iter().map(|(field, _)| *field).collect();
    assert_eq!(fields, ContactField::all().to_vec());
    assert_eq!(view.events.with_prefix("focus:"), vec!["nombre"]);
    assert_eq!(
        view.events.with_prefix("status:"),
        vec![format!("Error:{FORM_ERRORS_MESSAGE}")]
    );
}

#[tokio::test]
async fn blur_validates_only_that_field() {
    let (controller, view) = contact();
    controller.on_text_input(ContactField::Email, "ana@");

    let message = controller.on_blur(ContactField::Email);

    assert_eq!(message, Some("Invalid email format. Example: yourname@example.com"));
    assert_eq!(
        view.events.with_prefix("error:"),
        vec!["email=Invalid email format. Example: yourname@example.com"]
    );
}

#[tokio::test]
async fn typing_clears_status_and_a_fixed_error() {
    let (controller, view) = contact();
    controller.on_text_input(ContactField::Name, "An");
    assert_eq!(view.events.with_prefix("ok:"), Vec::<String>::new());

    controller.on_text_input(ContactField::Name, "Ana");

    assert_eq!(view.events.with_prefix("ok:"), vec!["nombre"]);
    assert_eq!(
        view.events.all().iter().filter(|e| *e == "status-cleared").count(),
        2
    );
}

#[tokio::test]
async fn consent_goes_through_its_own_handler() {
    let (controller, _view) = contact();

    controller.on_text_input(ContactField::Consent, "yes");
    assert!(!controller.submission().consent);

    controller.on_consent(true);
    assert!(controller.submission().consent);
}

#[tokio::test]
async fn enter_is_blocked_until_the_form_is_complete() {
    let (controller, view) = contact();

    assert!(controller.on_enter(false));
    assert!(!controller.on_enter(true));
    assert_eq!(
        view.events.with_prefix("status:"),
        vec![format!("Error:{ENTER_BLOCKED_MESSAGE}")]
    );

    controller.fill(valid_submission());
    assert!(!controller.on_enter(false));
}

#[tokio::test(start_paused = true)]
async fn valid_inquiry_is_acknowledged_after_the_delay() {
    let (controller, view) = contact();
    controller.fill(valid_submission());

    let pending = {
        let controller = Arc::clone(&controller);
        tokio::spawn(async move { controller.submit().await })
    };
    tokio::time::sleep(Duration::from_millis(100)).await;

    assert_eq!(
        view.events.with_prefix("submit:"),
        vec![format!("false:{SENDING_LABEL}")]
    );
    assert_eq!(controller.submit().await, ContactOutcome::Ignored);

    assert_eq!(pending.await.unwrap(), ContactOutcome::Sent);
    assert_eq!(
        view.events.with_prefix("status:"),
        vec![
            format!("Success:{PREPARING_MESSAGE}"),
            format!("Success:{SENT_MESSAGE}"),
        ]
    );
    assert_eq!(
        view.events.with_prefix("submit:"),
        vec![format!("false:{SENDING_LABEL}"), format!("true:{SUBMIT_LABEL}")]
    );
    assert_eq!(view.events.with_prefix("reset").len(), 1);
    assert_eq!(controller.submission(), ContactSubmission::default());
}

#[tokio::test(start_paused = true)]
async fn cancelled_submission_re_enables_the_form() {
    let (controller, view) = contact();
    controller.fill(valid_submission());

    let cancelled = tokio::time::timeout(Duration::from_millis(100), controller.submit()).await;
    assert!(cancelled.is_err());
    assert_eq!(
        view.events.with_prefix("submit:"),
        vec![format!("false:{SENDING_LABEL}"), format!("true:{SUBMIT_LABEL}")]
    );

    assert_eq!(controller.submit().await, ContactOutcome::Sent);
}
