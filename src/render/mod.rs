//! Console rendering of finished ledgers.
//!
//! Renderers consume read-only snapshots and must tolerate partially
//! populated ledgers (short-circuited runs, categories still at INFO).

pub mod compare;
pub mod dashboard;

use colored::Colorize;

use crate::core::status::Status;

/// Status label, colorized unless suppressed. Padding is applied before the
/// color codes so column widths survive colorization.
#[must_use]
pub fn paint_status(status: Status, width: usize, no_color: bool) -> String {
    let label = format!("{:<width$}", status.label());
    if no_color {
        return label;
    }
    match status {
        Status::Success => label.green(),
        Status::Warning => label.yellow(),
        Status::Error => label.red(),
        Status::Info => label.blue(),
    }
    .to_string()
}

/// Section header in the dashboard style.
#[must_use]
pub fn section_header(title: &str, no_color: bool) -> String {
    let underline = "-".repeat(60);
    if no_color {
        format!("{title}\n{underline}")
    } else {
        format!("{}\n{underline}", title.bold())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paint_status_pads_before_coloring() {
        let plain = paint_status(Status::Success, 14, true);
        assert_eq!(plain.chars().count(), 14);
        assert!(plain.starts_with(Status::Success.label()));
    }

    #[test]
    fn section_header_has_underline() {
        let header = section_header("Providers", true);
        assert!(header.starts_with("Providers\n"));
        assert!(header.contains("---"));
    }
}
