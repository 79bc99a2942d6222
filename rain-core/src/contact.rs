//! Contact-form field validation.
//!
//! Each validator returns `None` for a valid value or the message to show
//! next to the field. Text inputs are trimmed before checking.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern is valid")
});

static PHONE_CHARS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+()0-9\s\-.]+$").expect("phone pattern is valid"));

pub const MIN_NAME_CHARS: usize = 3;
pub const MIN_MESSAGE_CHARS: usize = 10;
pub const MIN_PHONE_DIGITS: usize = 7;
pub const MAX_PHONE_DIGITS: usize = 15;

/// Fields of the contact form, in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactField {
    Name,
    Email,
    Phone,
    Message,
    Consent,
}

impl ContactField {
    pub fn all() -> &'static [ContactField] {
        &[
            ContactField::Name,
            ContactField::Email,
            ContactField::Phone,
            ContactField::Message,
            ContactField::Consent,
        ]
    }

    /// Stable element id used by the page layer.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Name => "nombre",
            Self::Email => "email",
            Self::Phone => "telefono",
            Self::Message => "mensaje",
            Self::Consent => "acepto",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::Message => "Message",
            Self::Consent => "Consent",
        }
    }
}

/// Raw values of the contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub consent: bool,
}

pub fn validate_name(value: &str) -> Option<&'static str> {
    let value = value.trim();
    if value.is_empty() {
        return Some("Name is required.");
    }
    if value.chars().count() < MIN_NAME_CHARS {
        return Some("Enter your full name or at least 3 letters.");
    }
    None
}

pub fn validate_email(value: &str) -> Option<&'static str> {
    let value = value.trim();
    if value.is_empty() {
        return Some("Email is required.");
    }
    if !EMAIL_RE.is_match(value) {
        return Some("Invalid email format. Example: yourname@example.com");
    }
    None
}

/// Accepts digits, spaces and `+ ( ) - .`, with 7 to 15 digits in total.
pub fn validate_phone(value: &str) -> Option<&'static str> {
    let value = value.trim();
    if value.is_empty() {
        return Some("Phone is required.");
    }
    if !PHONE_CHARS_RE.is_match(value) {
        return Some("Invalid characters in the phone number.");
    }
    let digits = value.chars().filter(char::is_ascii_digit).count();
    if digits < MIN_PHONE_DIGITS {
        return Some("The phone number must have at least 7 digits.");
    }
    if digits > MAX_PHONE_DIGITS {
        return Some("The phone number looks too long.");
    }
    None
}

pub fn validate_message(value: &str) -> Option<&'static str> {
    let value = value.trim();
    if value.is_empty() {
        return Some("Write your message so we can help you.");
    }
    if value.chars().count() < MIN_MESSAGE_CHARS {
        return Some("The message is too short. Briefly describe your inquiry (min. 10 characters).");
    }
    None
}

pub fn validate_consent(checked: bool) -> Option<&'static str> {
    (!checked).then_some("You must accept the use of your data so we can reply.")
}

impl ContactSubmission {
    /// Runs the validator for a single field.
    pub fn validate_field(&self, field: ContactField) -> Option<&'static str> {
        match field {
            ContactField::Name => validate_name(&self.name),
            ContactField::Email => validate_email(&self.email),
            ContactField::Phone => validate_phone(&self.phone),
            ContactField::Message => validate_message(&self.message),
            ContactField::Consent => validate_consent(self.consent),
        }
    }

    /// Runs every validator and returns the failures in focus order.
    pub fn validate_all(&self) -> Vec<(ContactField, &'static str)> {
        ContactField::all()
            .iter()
            .filter_map(|&field| self.validate_field(field).map(|msg| (field, msg)))
            .collect()
    }

    pub fn is_valid(&self) -> bool {
        self.validate_all().is_empty()
    }
}
