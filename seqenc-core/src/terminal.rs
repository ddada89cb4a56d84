//! Terminal UI components and styling for seqenc.
//!
//! Everything is emitted through the `log` facade so output ordering stays
//! consistent with the rest of the diagnostics on stderr.

use console::style;
use log::info;

/// Check if color should be used (respects NO_COLOR environment variable)
fn should_use_color() -> bool {
    std::env::var_os("NO_COLOR").is_none() && console::colors_enabled_stderr()
}

/// Print a section header for major workflow phases
pub fn print_section(title: &str) {
    info!("");
    if should_use_color() {
        info!("===== {} =====", style(title.to_uppercase()).cyan());
    } else {
        info!("===== {} =====", title.to_uppercase());
    }
}

/// Print a key-value status line
pub fn print_status(label: &str, value: &str, highlight: bool) {
    let label = format!("{label}:");
    if should_use_color() && highlight {
        info!("  {:<14} {}", label, style(value).bold());
    } else {
        info!("  {:<14} {}", label, value);
    }
}

/// Print a success message
pub fn print_success(message: &str) {
    if should_use_color() {
        info!("  ✓ {}", style(message).green());
    } else {
        info!("  ✓ {message}");
    }
}
