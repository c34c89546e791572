//! User interface module - printing and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Writing messages to the terminal

use console::style;

use crate::domain::BackupWarning;

pub mod formatter;

pub use formatter::{
    format_backup_failure, format_backup_report, format_cleanup_report, format_milestones,
    format_status,
};

/// Print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Print a success message with a green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Print a status message with a yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Print a best-effort step failure.
pub fn display_warning(warning: &BackupWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Print a block of preformatted text.
pub fn display_block(text: &str) {
    println!("{}", text);
}
