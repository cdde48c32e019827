// UI module for consistent terminal output
//
// All user-facing printing goes through here; the rest of the crate is
// built with print_stdout/print_stderr denied.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use console::style;

/// Print a success message with checkmark
pub fn success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Print an info/action message with arrow
pub fn action(message: &str) {
    println!("{} {}", style("→").cyan(), message);
}

/// Print a warning message
pub fn warning(message: &str) {
    eprintln!("{} {}", style("⚠").yellow(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", style("✗").red(), message);
}

/// Print a dimmed/secondary message
pub fn dim(message: &str) {
    println!("{}", style(message).dim());
}

/// Print a status line, e.g. `HyperTerm  installed`
pub fn status(prefix: &str, message: &str) {
    println!("{} {}", style(prefix).cyan().bold(), message);
}

/// Print unstyled output meant for piping (plugin names, JSON)
pub fn plain(message: &str) {
    println!("{}", message);
}
