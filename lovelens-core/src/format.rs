//! Formatting helpers shared by report renderers.

use crate::types::WEEKDAY_NAMES;

/// Format minutes as "2h 5m", "45m" or "30s".
pub fn format_minutes(minutes: f64) -> String {
    if minutes <= 0.0 {
        return "0m".to_string();
    }
    if minutes < 1.0 {
        return format!("{}s", (minutes * 60.0).round() as i64);
    }
    let total = minutes.round() as i64;
    let hours = total / 60;
    let mins = total % 60;
    if hours > 0 {
        format!("{}h {}m", hours, mins)
    } else {
        format!("{}m", mins)
    }
}

/// Get hour display (e.g., "10am–11am").
pub fn hour_display(hour: u32) -> String {
    let hour = hour % 24;
    let next = (hour + 1) % 24;
    format!("{}–{}", clock_hour(hour), clock_hour(next))
}

fn clock_hour(hour: u32) -> String {
    let h = match hour % 12 {
        0 => 12,
        h => h,
    };
    let period = if hour < 12 { "am" } else { "pm" };
    format!("{}{}", h, period)
}

/// Get day name from a Sunday-first index.
pub fn day_name(index: usize) -> &'static str {
    WEEKDAY_NAMES.get(index).copied().unwrap_or("Unknown")
}

/// Share of `part` in `total` as a whole percentage, "0%" when empty.
pub fn percentage(part: usize, total: usize) -> String {
    if total == 0 {
        return "0%".to_string();
    }
    format!("{:.0}%", part as f64 / total as f64 * 100.0)
}

/// Truncate to `max` characters, appending "…" when shortened.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}
