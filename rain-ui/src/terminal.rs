//! Terminal implementations of the front-end ports.
//!
//! The display region is stdout; logs go to stderr so the two never mix.

use std::env;
use std::io::{self, IsTerminal, Write};
use std::process::Stdio;

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use rain_core::contact::ContactField;
use rain_core::map::{LatLng, MapOptions};
use rain_core::{InputField, ShareError};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::ports::{CalculatorView, ContactView, MapSurface, ShareLauncher, StatusKind};
use crate::report::ResultReport;

const BAR_WIDTH: usize = 20;

/// Plain-text rendering of a report.
pub fn report_text(report: &ResultReport) -> String {
    let mut out = String::new();
    for row in &report.rows {
        out.push_str(&format!("{}: {}\n", row.label, row.text));
        if let Some(note) = row.note {
            out.push_str(&format!("    {note}\n"));
        }
    }
    out.push('\n');
    for bar in &report.bars {
        let filled = ((bar.percent / 100.0) * BAR_WIDTH as f64).round() as usize;
        let filled = filled.min(BAR_WIDTH);
        out.push_str(&format!(
            "{:<11}[{}{}] {}\n",
            bar.label,
            "#".repeat(filled),
            " ".repeat(BAR_WIDTH - filled),
            bar.caption
        ));
    }
    out
}

fn print_line(line: &str) {
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{line}");
}

#[derive(Debug, Default)]
pub struct TerminalView;

impl CalculatorView for TerminalView {
    fn show_placeholder(&self, message: &str) {
        print_line(message);
    }

    fn show_status(&self, message: &str) {
        print_line(message);
    }

    fn render_report(&self, report: &ResultReport) {
        print_line(report_text(report).trim_end());
    }

    fn render_error(&self, message: &str) {
        print_line(&format!("Error: {message}"));
    }

    fn set_busy(&self, _busy: bool) {}

    fn focus_field(&self, field: InputField) {
        print_line(&format!("  -> check {}", field.label()));
    }

    fn set_panels_visible(&self, visible: bool) {
        if visible {
            print_line("Share with: rain-harvest share <whatsapp|facebook|x|copy>");
        }
    }

    fn set_field_value(&self, field: InputField, value: &str) {
        print_line(&format!("{}: {value}", field.label()));
    }

    fn set_share_feedback(&self, message: Option<&str>) {
        if let Some(message) = message {
            print_line(message);
        }
    }
}

/// Prints links and copies through a clipboard command, falling back to
/// the OSC 52 terminal escape.
#[derive(Debug, Default)]
pub struct TerminalLauncher;

fn command_exists(command: &str) -> bool {
    let Some(path_var) = env::var_os("PATH") else {
        return false;
    };
    env::split_paths(&path_var).any(|dir| {
        dir.join(command).is_file()
            || (cfg!(target_os = "windows") && dir.join(format!("{command}.exe")).is_file())
    })
}

fn clipboard_command() -> Option<(&'static str, &'static [&'static str])> {
    if cfg!(target_os = "macos") && command_exists("pbcopy") {
        return Some(("pbcopy", &[]));
    }
    if cfg!(target_os = "windows") && command_exists("clip") {
        return Some(("clip", &[]));
    }
    if env::var_os("WAYLAND_DISPLAY").is_some() && command_exists("wl-copy") {
        return Some(("wl-copy", &[]));
    }
    if env::var_os("DISPLAY").is_some() {
        if command_exists("xclip") {
            return Some(("xclip", &["-selection", "clipboard"]));
        }
        if command_exists("xsel") {
            return Some(("xsel", &["--clipboard", "--input"]));
        }
    }
    None
}

/// OSC 52 sequence that asks the terminal to place `text` on the clipboard.
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text.as_bytes()))
}

#[async_trait]
impl ShareLauncher for TerminalLauncher {
    fn open_url(&self, url: &str) -> Result<(), ShareError> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "Open this link to share:\n{url}")
            .map_err(|e| ShareError::Launch(e.to_string()))
    }

    async fn write_clipboard(&self, text: &str) -> Result<(), ShareError> {
        let (cmd, args) = clipboard_command()
            .ok_or_else(|| ShareError::Clipboard("no clipboard command found".to_string()))?;

        let mut child = Command::new(cmd)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| ShareError::Clipboard(e.to_string()))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .await
                .map_err(|e| ShareError::Clipboard(e.to_string()))?;
        }

        let status = child
            .wait()
            .await
            .map_err(|e| ShareError::Clipboard(e.to_string()))?;
        if status.success() {
            Ok(())
        } else {
            Err(ShareError::Clipboard(format!("{cmd} exited with {status}")))
        }
    }

    fn legacy_copy(&self, text: &str) -> Result<(), ShareError> {
        if !io::stdout().is_terminal() {
            return Err(ShareError::Clipboard("stdout is not a terminal".to_string()));
        }
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(osc52_sequence(text).as_bytes())
            .and_then(|()| stdout.flush())
            .map_err(|e| ShareError::Clipboard(e.to_string()))
    }
}

#[derive(Debug, Default)]
pub struct TerminalContactView;

impl ContactView for TerminalContactView {
    fn set_field_error(&self, field: ContactField, message: Option<&str>) {
        if let Some(message) = message {
            print_line(&format!("{}: {message}", field.label()));
        }
    }

    fn focus_field(&self, _field: ContactField) {}

    fn set_status(&self, kind: StatusKind, message: &str) {
        match kind {
            StatusKind::Error => print_line(&format!("Error: {message}")),
            StatusKind::Success => print_line(message),
        }
    }

    fn clear_status(&self) {}

    fn set_submit(&self, _enabled: bool, _label: &str) {}

    fn reset_form(&self) {}
}

/// Lists the map and its popups as text.
#[derive(Debug, Default)]
pub struct TerminalMap {
    markers: usize,
}

impl MapSurface for TerminalMap {
    type Marker = usize;

    fn create_map(&mut self, options: &MapOptions) {
        print_line(&format!(
            "Map centered on ({}, {}), zoom {}, {} view",
            options.center.lat,
            options.center.lng,
            options.zoom,
            options.map_type.as_str()
        ));
    }

    fn add_marker(&mut self, position: LatLng, title: &str) -> usize {
        print_line(&format!("* {title} ({}, {})", position.lat, position.lng));
        self.markers += 1;
        self.markers - 1
    }

    fn bind_info_window(&mut self, _marker: &usize, content: String) {
        print_line(&format!("  {content}"));
    }
}
