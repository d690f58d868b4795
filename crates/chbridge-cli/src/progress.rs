//! Progress bar utilities for CLI operations
//!
//! Renders the transfer engine's progress states on the terminal. This is
//! the only place progress is displayed; the engine itself never prints.

use crate::transfer::{ProgressState, ProgressStats};
use indicatif::{ProgressBar, ProgressStyle};

/// Create a 0-100 percent bar for a transfer operation
pub fn create_transfer_bar(message: &str) -> ProgressBar {
    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg}\n{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}% {prefix}")
            .expect("Invalid progress bar template")
            .progress_chars("#>-"),
    );
    pb.set_message(message.to_string());
    pb
}

/// Create a spinner for indeterminate operations
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("Invalid spinner template"),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Apply a progress state to the bar
pub fn render_state(pb: &ProgressBar, state: &ProgressState) {
    pb.set_position(state.percent.floor() as u64);
    if let Some(stats) = state.stats {
        pb.set_prefix(format_stats(&stats));
    }
}

/// Human-readable stats suffix: "12,345 records (1,200/sec)"
pub fn format_stats(stats: &ProgressStats) -> String {
    if stats.rate > 0.0 {
        format!(
            "{} records ({}/sec)",
            format_count(stats.processed),
            format_count(stats.rate.round() as u64)
        )
    } else {
        format!("{} records", format_count(stats.processed))
    }
}

/// Format a count with thousands separators
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::transfer::ProgressMode;

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(1234567), "1,234,567");
    }

    #[test]
    fn test_format_stats() {
        let stats = ProgressStats {
            processed: 12345,
            total: 100000,
            rate: 1200.4,
        };
        assert_eq!(format_stats(&stats), "12,345 records (1,200/sec)");

        let silent = ProgressStats {
            processed: 10,
            total: 0,
            rate: 0.0,
        };
        assert_eq!(format_stats(&silent), "10 records");
    }

    #[test]
    fn test_render_state_positions_bar() {
        let pb = create_transfer_bar("Exporting trips");
        let state = ProgressState {
            percent: 42.7,
            stats: None,
            mode: ProgressMode::Simulated,
        };
        render_state(&pb, &state);
        assert_eq!(pb.position(), 42);
    }
}
