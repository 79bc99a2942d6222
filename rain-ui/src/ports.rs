//! Interfaces between the controllers and the surface that displays them.
//!
//! Controllers only talk to these traits, so the same flow drives the
//! terminal front end and the recording doubles used in tests.

use async_trait::async_trait;
use rain_core::contact::ContactField;
use rain_core::map::{LatLng, MapOptions};
use rain_core::{InputField, ShareError};

use crate::report::ResultReport;

/// Display region, auxiliary panels and form controls of the calculator.
pub trait CalculatorView: Send + Sync {
    /// Replaces the display region with the initial message.
    fn show_placeholder(&self, message: &str);

    /// Replaces the display region with a loading message.
    fn show_status(&self, message: &str);

    fn render_report(&self, report: &ResultReport);

    /// Replaces the display region with an error message.
    fn render_error(&self, message: &str);

    /// Toggles the busy indicator and the submit control.
    fn set_busy(&self, busy: bool);

    fn focus_field(&self, field: InputField);

    /// Shows or hides the bars and share controls.
    fn set_panels_visible(&self, visible: bool);

    fn set_field_value(&self, field: InputField, value: &str);

    /// Sets or clears the transient line under the share controls.
    fn set_share_feedback(&self, message: Option<&str>);
}

/// Outbound share destinations.
#[async_trait]
pub trait ShareLauncher: Send + Sync {
    fn open_url(&self, url: &str) -> Result<(), ShareError>;

    /// Writes through the platform clipboard API.
    async fn write_clipboard(&self, text: &str) -> Result<(), ShareError>;

    /// Copies using the fallback technique of the surface.
    fn legacy_copy(&self, text: &str) -> Result<(), ShareError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Error,
    Success,
}

/// Field errors, status line and controls of the contact form.
pub trait ContactView: Send + Sync {
    fn set_field_error(&self, field: ContactField, message: Option<&str>);

    fn focus_field(&self, field: ContactField);

    fn set_status(&self, kind: StatusKind, message: &str);

    fn clear_status(&self);

    fn set_submit(&self, enabled: bool, label: &str);

    /// Clears every field back to its initial value.
    fn reset_form(&self);
}

/// Third-party map widget.
pub trait MapSurface {
    type Marker;

    fn create_map(&mut self, options: &MapOptions);

    fn add_marker(&mut self, position: LatLng, title: &str) -> Self::Marker;

    /// Attaches a popup with `content` that opens when `marker` is clicked.
    fn bind_info_window(&mut self, marker: &Self::Marker, content: String);
}
