use crate::monitor::constants::PLACEHOLDER;

const UNITS: [&str; 4] = ["B/s", "KB/s", "MB/s", "GB/s"];

/// Scales a byte rate into `[0, 1024)` of the largest fitting unit, up to GB/s.
pub fn scale_speed(bytes_per_sec: f64) -> (f64, &'static str) {
    let mut value = bytes_per_sec;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    (value, UNITS[unit])
}

/// Formats a byte rate with two decimals, e.g. `12.50 MB/s`.
pub fn format_speed(bytes_per_sec: f64) -> String {
    let (value, unit) = scale_speed(bytes_per_sec);
    format!("{value:.2} {unit}")
}

/// Like [`format_speed`], with a placeholder when no rate is known.
pub fn format_optional_speed(bytes_per_sec: Option<f64>) -> String {
    bytes_per_sec.map_or_else(|| PLACEHOLDER.to_string(), format_speed)
}
