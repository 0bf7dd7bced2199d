//! Terminal output helpers.

use std::fmt::Display;

use owo_colors::OwoColorize;

/// Print a success line.
pub fn success(message: impl Display) {
    println!("{} {message}", "✓".green());
}

/// Print a warning line.
pub fn warning(message: impl Display) {
    eprintln!("{} {message}", "!".yellow());
}

/// Print an error line.
pub fn error(message: impl Display) {
    eprintln!("{} {message}", "✗".red());
}
