// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Terminal styling for the `zo` commands.
//!
//! NO_COLOR and FORCE_COLOR win over tty detection.

use colored::{ColoredString, Colorize};

/// Apply the color environment overrides. Call once at startup.
pub fn init() {
    if std::env::var_os("NO_COLOR").is_some() {
        colored::control::set_override(false);
    } else if std::env::var_os("FORCE_COLOR").is_some() {
        colored::control::set_override(true);
    }
}

pub fn error_label() -> ColoredString {
    "error".red().bold()
}

/// Phase summary line: `=== Parse OK ===` or `=== Parse FAILED: 2 errors ===`.
pub fn banner(phase: &str, errors: usize) -> String {
    let msg = match errors {
        0 => format!("{} OK", phase).green().bold(),
        1 => format!("{} FAILED: 1 error", phase).red().bold(),
        n => format!("{} FAILED: {} errors", phase, n).red().bold(),
    };
    format!("{} {} {}", "===".dimmed(), msg, "===".dimmed())
}

/// Per-file mark for `fmt --check`.
pub fn status(ok: bool) -> ColoredString {
    if ok {
        "✓".green()
    } else {
        "✗".red()
    }
}

pub fn file_path(path: &str) -> ColoredString {
    path.underline()
}

// Help screens

pub fn title(name: &str) -> ColoredString {
    name.bold()
}

pub fn version(v: &str) -> ColoredString {
    v.dimmed()
}

pub fn section_header(header: &str) -> ColoredString {
    header.yellow().bold()
}

pub fn command(name: &str) -> ColoredString {
    name.green()
}

pub fn arg(name: &str) -> ColoredString {
    name.cyan()
}
