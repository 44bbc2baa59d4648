use once_cell::sync::Lazy;
use regex::Regex;

static CURRENT_RATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)Current download rate:\s*([\d.]+)\s*(Mbps|MB/s|KB/s)")
        .expect("rate pattern is valid")
});

static APP_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)AppID\s+(\d+)").expect("app id pattern is valid"));

/// A "Current download rate" announcement found in a line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct RateToken<'a> {
    pub value: f64,
    pub unit: &'a str,
}

/// Extracts the magnitude and unit of a rate announcement.
///
/// Lines whose magnitude is not a valid float (e.g. `1.2.3`) yield `None`.
pub(crate) fn rate_token(line: &str) -> Option<RateToken<'_>> {
    let caps = CURRENT_RATE.captures(line)?;
    let value = caps.get(1)?.as_str().parse::<f64>().ok()?;
    let unit = caps.get(2)?.as_str();
    Some(RateToken { value, unit })
}

/// Extracts the decimal AppID mentioned in a line, if any.
pub(crate) fn item_id(line: &str) -> Option<&str> {
    APP_ID
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
