//! Centralized UI formatting and color utilities
//!
//! Status lines, field listings and color choices shared by every command.

use colored::Colorize;

use crate::domain::FormField;

/// Check if quiet mode is enabled via environment variable or --quiet flag
pub fn is_quiet() -> bool {
    std::env::var("ETIQUETAS_QUIET")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

/// Print a warning to stderr unless quiet.
pub fn warn(message: &str) {
    if !is_quiet() {
        eprintln!("{} {}", colors::warning("Warning:").bold(), message);
    }
}

/// Print a success line to stdout unless quiet.
pub fn success(message: &str) {
    if !is_quiet() {
        println!("{} {}", colors::success("✓"), message);
    }
}

/// Color scheme for text output
pub mod colors {
    use colored::{ColoredString, Colorize};

    /// Green for success
    pub fn success(text: &str) -> ColoredString {
        text.green()
    }

    /// Yellow for warnings
    pub fn warning(text: &str) -> ColoredString {
        text.yellow()
    }

    /// Red for errors and missing fields
    pub fn error(text: &str) -> ColoredString {
        text.red()
    }

    /// Cyan for identifiers (lots, file names, table names)
    pub fn identifier(text: &str) -> ColoredString {
        text.cyan()
    }

    /// Dimmed for secondary text
    pub fn secondary(text: &str) -> ColoredString {
        text.dimmed()
    }

    /// Bold for headings
    pub fn heading(text: &str) -> ColoredString {
        text.bold()
    }
}

/// Common text formatting patterns
pub mod format {
    use super::FormField;

    /// Pad `caption` so values line up after `width` characters.
    pub fn field_line(caption: &str, value: &str, width: usize) -> String {
        let pad = width.saturating_sub(caption.chars().count());
        format!("{}:{} {}", caption, " ".repeat(pad), value)
    }

    /// Bullet list of missing fields, one per line
    pub fn missing_fields(fields: &[FormField]) -> String {
        fields
            .iter()
            .map(|f| format!("  - {}", f.label()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Format a separator line for sections
    pub fn separator(width: usize) -> String {
        "─".repeat(width)
    }
}
