//! Small UI helpers: truncation, cadence labels, timestamps.

use std::time::Duration;

use chrono::{DateTime, Local};

pub fn truncate_middle(s: &str, max: usize) -> String {
    let len = s.chars().count();
    if len <= max { return s.to_string(); }
    if max <= 3 { return "...".into(); }
    let keep = max - 3;
    let left = keep / 2;
    let right = keep - left;
    let head: String = s.chars().take(left).collect();
    let tail: String = s.chars().skip(len - right).collect();
    format!("{head}...{tail}")
}

/// "2s" for whole seconds, "1500ms" otherwise.
pub fn cadence(d: Duration) -> String {
    let ms = d.as_millis();
    if ms % 1000 == 0 { format!("{}s", ms / 1000) } else { format!("{ms}ms") }
}

/// Epoch seconds to local wall-clock time.
pub fn clock(epoch_secs: f64) -> Option<String> {
    let ms = (epoch_secs * 1000.0) as i64;
    let utc = DateTime::from_timestamp_millis(ms)?;
    Some(utc.with_timezone(&Local).format("%H:%M:%S").to_string())
}

/// Time-of-day part of an ISO-8601 stamp ("2024-05-01T12:30:05.123" -> "12:30:05").
pub fn short_time(iso: &str) -> String {
    let t = iso.split_once('T').map(|(_, t)| t).unwrap_or(iso);
    t.chars().take(8).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_on_char_boundaries() {
        assert_eq!(truncate_middle("short", 10), "short");
        assert_eq!(truncate_middle("/mnt/very/long/path", 9), "/mn...ath");
        assert_eq!(truncate_middle("ääääääääää", 7), "ää...ää");
    }

    #[test]
    fn cadence_labels() {
        assert_eq!(cadence(Duration::from_millis(2000)), "2s");
        assert_eq!(cadence(Duration::from_millis(1500)), "1500ms");
    }

    #[test]
    fn short_time_from_iso() {
        assert_eq!(short_time("2024-05-01T12:30:05.123456"), "12:30:05");
        assert_eq!(short_time("12:30"), "12:30");
    }

    #[test]
    fn clock_formats_epoch() {
        let s = clock(1_700_000_000.5).unwrap();
        assert_eq!(s.len(), 8);
        assert_eq!(s.matches(':').count(), 2);
    }
}
