//! Console colour scheme
//!
//! Commands describe what a line *is* and this module decides how it looks.
//! Colouring never reaches object bytes or files on disk.

use colored::{Color, ColoredString, Colorize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    Error,
    Warning,
    Success,
    Info,
    Debug,
    Notice,
}

impl OutputKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputKind::Error => "error",
            OutputKind::Warning => "warning",
            OutputKind::Success => "success",
            OutputKind::Info => "info",
            OutputKind::Debug => "debug",
            OutputKind::Notice => "notice",
        }
    }
}

pub const OUTPUT_COLORS: phf::Map<&'static str, Color> = phf::phf_map! {
    "error" => Color::Red,
    "warning" => Color::Yellow,
    "success" => Color::Green,
    "info" => Color::Blue,
    "debug" => Color::Cyan,
    "notice" => Color::Magenta,
};

/// Wrap `text` in the colour registered for `kind`
pub fn paint(text: impl AsRef<str>, kind: OutputKind) -> ColoredString {
    match OUTPUT_COLORS.get(kind.as_str()) {
        Some(color) => text.as_ref().color(*color),
        None => text.as_ref().normal(),
    }
}
