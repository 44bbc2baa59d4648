use crate::monitor::patterns::rate_token;
use crate::monitor::types::RateSample;

/// Converts a rate announced in the content log to bytes per second.
///
/// `KB/s` and `MB/s` are binary multiples; `Mbps` is decimal megabits. Units are matched
/// case-insensitively and anything else converts to zero.
pub fn parse_rate_to_bps(value: f64, unit: &str) -> f64 {
    match unit.to_ascii_lowercase().as_str() {
        "kb/s" => value * 1024.0,
        "mb/s" => value * 1024.0 * 1024.0,
        "mbps" => value * 1_000_000.0 / 8.0,
        _ => 0.0,
    }
}

/// Finds the newest rate announcement in the window.
pub fn latest_rate(lines: &[String]) -> Option<RateSample> {
    lines.iter().enumerate().rev().find_map(|(i, line)| {
        rate_token(line).map(|token| RateSample {
            bytes_per_sec: parse_rate_to_bps(token.value, token.unit),
            line_index: i,
        })
    })
}
