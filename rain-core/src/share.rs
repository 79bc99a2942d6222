//! Share-message and share-link construction.
//!
//! Everything here is pure text composition; opening the links and writing
//! to the clipboard belong to the front end.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculations::common::{is_positive, whole_units};
use crate::calculations::DEFAULT_TANK_CAPACITY_L;
use crate::format::{format_decimal, format_number};
use crate::models::HarvestResult;

pub const DEFAULT_FACEBOOK_CONTACT: &str = "https://www.facebook.com/Santg.sp";
pub const DEFAULT_WHATSAPP_CONTACT: &str = "+52 1 722 146 5696";

/// Contact details appended to every shared message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShareContacts {
    pub facebook: String,
    pub whatsapp: String,
}

impl Default for ShareContacts {
    fn default() -> Self {
        Self {
            facebook: DEFAULT_FACEBOOK_CONTACT.to_string(),
            whatsapp: DEFAULT_WHATSAPP_CONTACT.to_string(),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShareError {
    #[error("unknown share target '{0}'")]
    UnknownTarget(String),

    #[error("could not open link: {0}")]
    Launch(String),

    #[error("clipboard unavailable: {0}")]
    Clipboard(String),

    #[error("no result to share")]
    NoResult,
}

/// The four share actions offered next to a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShareTarget {
    WhatsApp,
    Facebook,
    X,
    Clipboard,
}

impl ShareTarget {
    pub fn all() -> &'static [ShareTarget] {
        &[
            ShareTarget::WhatsApp,
            ShareTarget::X,
            ShareTarget::Facebook,
            ShareTarget::Clipboard,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WhatsApp => "whatsapp",
            Self::Facebook => "facebook",
            Self::X => "x",
            Self::Clipboard => "copy",
        }
    }

    /// Parses a target name; `twitter` is accepted as an alias of `x`.
    pub fn parse(name: &str) -> Result<Self, ShareError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "whatsapp" | "ws" => Ok(Self::WhatsApp),
            "facebook" | "fb" => Ok(Self::Facebook),
            "x" | "twitter" | "tw" => Ok(Self::X),
            "copy" | "clipboard" => Ok(Self::Clipboard),
            _ => Err(ShareError::UnknownTarget(name.to_string())),
        }
    }
}

impl std::fmt::Display for ShareTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Composes the fixed-template message for `result`.
///
/// The ROI sentence appears only when the result carries a payback period.
pub fn share_message(
    result: &HarvestResult,
    contacts: &ShareContacts,
) -> String {
    let mut text = format!(
        "I expect to harvest {} L/year ({} m³/year). ",
        format_number(result.volume_l, 0),
        format_number(result.volume_m3, 3),
    );
    if let Some(months) = result.roi_months.filter(|_| result.has_roi) {
        text.push_str(&format!(
            "I will recover the investment in {} months. ",
            format_decimal(months, 1)
        ));
    }
    let capacity = if is_positive(result.tank_capacity_l) {
        result.tank_capacity_l
    } else {
        DEFAULT_TANK_CAPACITY_L
    };
    text.push_str(&format!(
        "That equals {} tanks. I'm helping the planet! ",
        whole_units(result.volume_l, capacity)
    ));
    text.push_str(&format!(
        "Contact: Facebook {} · WhatsApp {}",
        contacts.facebook, contacts.whatsapp
    ));
    text
}

/// Message plus the three outbound URLs for one result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareLinks {
    pub message: String,
    pub whatsapp: String,
    pub facebook: String,
    pub x: String,
}

impl ShareLinks {
    pub fn build(
        result: &HarvestResult,
        page_url: &str,
        contacts: &ShareContacts,
    ) -> Self {
        let message = share_message(result, contacts);
        let text = encode_uri_component(&message);
        let page = encode_uri_component(page_url);

        Self {
            whatsapp: format!("https://wa.me/?text={text}"),
            facebook: format!("https://www.facebook.com/sharer/sharer.php?u={page}&quote={text}"),
            x: format!("https://twitter.com/intent/tweet?text={text}&url={page}"),
            message,
        }
    }

    /// URL for a link target; `None` for the clipboard.
    pub fn url(&self, target: ShareTarget) -> Option<&str> {
        match target {
            ShareTarget::WhatsApp => Some(&self.whatsapp),
            ShareTarget::Facebook => Some(&self.facebook),
            ShareTarget::X => Some(&self.x),
            ShareTarget::Clipboard => None,
        }
    }
}

/// Percent-encodes `input` the way browsers' `encodeURIComponent` does.
///
/// ```
/// use rain_core::share::encode_uri_component;
///
/// assert_eq!(encode_uri_component("a b&c"), "a%20b%26c");
/// assert_eq!(encode_uri_component("m³"), "m%C2%B3");
/// ```
pub fn encode_uri_component(input: &str) -> String {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";

    let mut out = String::with_capacity(input.len());
    for &byte in input.as_bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(byte as char),
            _ => {
                out.push('%');
                out.push(HEX[(byte >> 4) as usize] as char);
                out.push(HEX[(byte & 0x0F) as usize] as char);
            }
        }
    }
    out
}
