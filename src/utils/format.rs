//! Formatting utilities for dashboard display.
//!
//! Consistent renderers for job ages and sizes as shown in the
//! recent-jobs table.

use chrono::{DateTime, Utc};

/// Format byte counts as human-readable strings.
///
/// Uses SI prefixes (KB, MB, GB, TB) with appropriate precision.
pub fn format_bytes(bytes: u64) -> String {
    if bytes >= 1_000_000_000_000 {
        format!("{:.2} TB", bytes as f64 / 1_000_000_000_000.0)
    } else if bytes >= 1_000_000_000 {
        format!("{:.2} GB", bytes as f64 / 1_000_000_000.0)
    } else if bytes >= 1_000_000 {
        format!("{:.1} MB", bytes as f64 / 1_000_000.0)
    } else if bytes >= 1_000 {
        format!("{:.1} KB", bytes as f64 / 1_000.0)
    } else {
        format!("{bytes} B")
    }
}

/// Format a timestamp as a relative age against `now`.
///
/// Returns strings like "just now", "5 minutes ago", "2 hours ago",
/// "3 days ago". Timestamps at or ahead of `now` (clock skew between
/// collaborators) render as "just now".
pub fn format_relative_age(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now - then;
    let seconds = elapsed.num_seconds();

    if seconds < 60 {
        return "just now".to_string();
    }

    let minutes = elapsed.num_minutes();
    if minutes < 60 {
        return plural(minutes, "minute");
    }

    let hours = elapsed.num_hours();
    if hours < 24 {
        return plural(hours, "hour");
    }

    plural(elapsed.num_days(), "day")
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{count} {unit}s ago")
    }
}
