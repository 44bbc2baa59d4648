use crate::monitor::types::{ActivityCandidate, LookbackSpan};
use serde::Serialize;
use std::fmt;

/// Lifecycle state of the current app, as far as the log lets us tell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusLabel {
    Unknown,
    Suspended,
    Idle,
    Stopped,
    Verifying,
    Paused,
    Preparing,
    Downloading,
    UpdatingStatus,
}

impl StatusLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Suspended => "Suspended",
            Self::Idle => "No activity",
            Self::Stopped => "Stopped",
            Self::Verifying => "Verifying",
            Self::Paused => "Paused",
            Self::Preparing => "Preparing files",
            Self::Downloading => "Downloading",
            Self::UpdatingStatus => "Updating status",
        }
    }
}

impl fmt::Display for StatusLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Markers that make a line worth classifying for the current app.
const STATUS_MARKERS: &[&str] = &[
    "update canceled",
    "state changed",
    "app update changed",
    "pause",
    "verif",
];

/// Classifies a lowercased log line.
///
/// Lines often carry several keywords at once, so the checks run in a fixed priority
/// order and the first hit wins. "staging" only means preparation when the same line does
/// not also say "downloading".
pub fn classify_line(lower: &str) -> StatusLabel {
    if lower.contains("suspended") {
        StatusLabel::Suspended
    } else if lower.contains("none") {
        StatusLabel::Idle
    } else if lower.contains("stopping") {
        StatusLabel::Stopped
    } else if lower.contains("verif") {
        StatusLabel::Verifying
    } else if lower.contains("pause") {
        StatusLabel::Paused
    } else if lower.contains("preallocating")
        || lower.contains("reconfiguring")
        || (lower.contains("staging") && !lower.contains("downloading"))
    {
        StatusLabel::Preparing
    } else if lower.contains("downloading") {
        StatusLabel::Downloading
    } else if lower.contains("running update") || lower.contains("update running") {
        StatusLabel::UpdatingStatus
    } else {
        StatusLabel::Unknown
    }
}

/// Resolves the status of `candidate`, returning the label and the line it came from.
///
/// The scan runs from the newest line in the window (not the anchor) back to the span
/// start, so a suspension logged after the rate line still takes effect. If that yields
/// nothing conclusive, the candidate's own line is classified.
pub fn resolve_status<'a>(
    lines: &'a [String],
    candidate: &'a ActivityCandidate,
    span: LookbackSpan,
) -> (StatusLabel, &'a str) {
    let newest = lines.iter().skip(span.start).rev().find_map(|line| {
        if !line.contains(candidate.item_id.as_str()) {
            return None;
        }
        let lower = line.to_lowercase();
        STATUS_MARKERS
            .iter()
            .any(|m| lower.contains(m))
            .then(|| (classify_line(&lower), line.as_str()))
    });

    match newest {
        Some((label, line)) if label != StatusLabel::Unknown => (label, line),
        _ => {
            let line = candidate.source_line.as_str();
            (classify_line(&line.to_lowercase()), line)
        }
    }
}
