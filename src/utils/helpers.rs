//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

use chrono::{DateTime, Utc};

/// Format a timestamp for display
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Truncate text to a maximum length with ellipsis
pub fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_length.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

/// Abbreviate a member count for display (1.2K, 3.4M)
pub fn format_member_count(count: Option<i64>) -> String {
    match count {
        None => "unknown".to_string(),
        Some(n) if n < 1_000 => n.to_string(),
        Some(n) if n < 1_000_000 => format!("{:.1}K", n as f64 / 1_000.0),
        Some(n) => format!("{:.1}M", n as f64 / 1_000_000.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("a longer piece of text", 10), "a longe...");
    }

    #[test]
    fn test_format_member_count() {
        assert_eq!(format_member_count(None), "unknown");
        assert_eq!(format_member_count(Some(950)), "950");
        assert_eq!(format_member_count(Some(1_500)), "1.5K");
        assert_eq!(format_member_count(Some(2_400_000)), "2.4M");
    }
}
