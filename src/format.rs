//! Output formatting helpers for plain text and JSON.

use chrono::{DateTime, Utc};

/// Output format for view commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

/// Format a fractional hour count as "2h 30min", or just "45min" when the
/// whole-hour part is zero.
pub fn format_hours(hours: f64) -> String {
    let whole_hours = hours.floor() as i64;
    let minutes = (hours * 60.0).floor() as i64 % 60;
    if whole_hours == 0 {
        format!("{}min", minutes)
    } else {
        format!("{}h {}min", whole_hours, minutes)
    }
}

/// Format a priority score. Tasks with no history rank infinitely urgent
/// and render as "never done".
pub fn format_priority(priority: f64) -> String {
    if priority.is_infinite() {
        "never done".to_string()
    } else {
        format!("{:.2}", priority)
    }
}

/// Render an epoch-ms timestamp as UTC RFC 3339 (second precision).
pub fn format_when(when_ms: i64) -> String {
    match DateTime::<Utc>::from_timestamp_millis(when_ms) {
        Some(dt) => dt.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        None => when_ms.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_hours_splits_whole_and_minutes() {
        assert_eq!(format_hours(2.5), "2h 30min");
        assert_eq!(format_hours(7.0), "7h 0min");
        assert_eq!(format_hours(0.75), "45min");
        assert_eq!(format_hours(0.0), "0min");
    }

    #[test]
    fn format_priority_handles_infinity() {
        assert_eq!(format_priority(f64::INFINITY), "never done");
        assert_eq!(format_priority(1.0), "1.00");
        assert_eq!(format_priority(2.347), "2.35");
    }

    #[test]
    fn format_when_renders_rfc3339() {
        assert_eq!(format_when(0), "1970-01-01T00:00:00Z");
    }

    #[test]
    fn output_format_parses_known_names() {
        assert_eq!(OutputFormat::from_str("text"), Some(OutputFormat::Text));
        assert_eq!(OutputFormat::from_str("JSON"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_str("yaml"), None);
    }
}
