//! Terminal capability detection and colouring utilities.

use odin::ResourceKind;
use owo_colors::{OwoColorize, colors::css};

/// Detects whether coloured output should be enabled.
pub fn supports_color() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

/// Detects terminal width, returning None if not available.
pub fn terminal_width() -> Option<u16> {
    terminal_size::terminal_size().map(|(w, _)| w.0)
}

/// Check if the terminal is narrow (< 60 columns).
pub fn is_narrow() -> bool {
    terminal_width().is_some_and(|w| w < 60)
}

/// Extension trait for colourising output.
pub trait Colorize {
    /// Colour as success (green).
    fn success(&self) -> String;
    /// Colour as warning (amber).
    fn warning(&self) -> String;
    /// Colour as error (red).
    fn error(&self) -> String;
    /// Dim the text.
    fn dim(&self) -> String;
    /// Colour according to a booking's resource kind, matching the
    /// day-grid legend.
    fn kind(&self, kind: ResourceKind) -> String;
}

impl Colorize for str {
    fn success(&self) -> String {
        if supports_color() {
            self.fg::<css::Green>().to_string()
        } else {
            self.to_string()
        }
    }

    fn warning(&self) -> String {
        if supports_color() {
            self.fg::<css::Orange>().to_string()
        } else {
            self.to_string()
        }
    }

    fn error(&self) -> String {
        if supports_color() {
            self.fg::<css::Red>().to_string()
        } else {
            self.to_string()
        }
    }

    fn dim(&self) -> String {
        if supports_color() {
            self.dimmed().to_string()
        } else {
            self.to_string()
        }
    }

    fn kind(&self, kind: ResourceKind) -> String {
        if !supports_color() {
            return self.to_string();
        }
        match kind {
            ResourceKind::Room => self.fg::<css::LightBlue>().to_string(),
            ResourceKind::Equipment => self.fg::<css::Gold>().to_string(),
            ResourceKind::External => self.fg::<css::Violet>().to_string(),
        }
    }
}

impl Colorize for String {
    fn success(&self) -> String {
        self.as_str().success()
    }

    fn warning(&self) -> String {
        self.as_str().warning()
    }

    fn error(&self) -> String {
        self.as_str().error()
    }

    fn dim(&self) -> String {
        self.as_str().dim()
    }

    fn kind(&self, kind: ResourceKind) -> String {
        self.as_str().kind(kind)
    }
}
