use crate::monitor::constants::{DEFAULT_LOOKBACK_LINES, DEFAULT_TAIL_KIB};
use crate::monitor::status::StatusLabel;
use serde::Serialize;

/// Trailing slice of the content log, oldest line first.
///
/// The first line may be a fragment when the byte budget cuts into it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogWindow {
    lines: Vec<String>,
}

impl LogWindow {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for LogWindow {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            lines: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Most recent transfer rate in the window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RateSample {
    pub bytes_per_sec: f64,
    /// Window index of the announcing line; anchors the activity scan.
    pub line_index: usize,
}

/// How a candidate was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateSource {
    /// Best-scoring state-transition line.
    Transition,
    /// Plain AppID mention, used when no transition line exists.
    Mention,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityCandidate {
    pub item_id: String,
    /// Always zero for [`CandidateSource::Mention`].
    pub score: i32,
    pub source: CandidateSource,
    pub source_line: String,
}

/// Window indices `start..=anchor` considered for candidate scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookbackSpan {
    pub start: usize,
    pub anchor: usize,
}

impl LookbackSpan {
    pub fn ending_at(anchor: usize, lookback_lines: usize) -> Self {
        Self {
            start: anchor.saturating_sub(lookback_lines),
            anchor,
        }
    }

    /// Indices from the anchor back to the span start.
    pub fn newest_first(&self) -> impl Iterator<Item = usize> {
        (self.start..=self.anchor).rev()
    }
}

/// Knobs of the inference pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InferenceSettings {
    pub tail_bytes: u64,
    pub lookback_lines: usize,
}

impl Default for InferenceSettings {
    fn default() -> Self {
        Self {
            tail_bytes: DEFAULT_TAIL_KIB * 1024,
            lookback_lines: DEFAULT_LOOKBACK_LINES,
        }
    }
}

/// Everything inferred from one window.
#[derive(Debug, Clone, PartialEq)]
pub struct Activity {
    pub candidate: Option<ActivityCandidate>,
    pub status: StatusLabel,
    pub speed: Option<RateSample>,
    /// Line the status label was derived from.
    pub status_line: Option<String>,
}

impl Activity {
    /// Nothing could be inferred.
    pub fn unknown() -> Self {
        Self {
            candidate: None,
            status: StatusLabel::Unknown,
            speed: None,
            status_line: None,
        }
    }

    pub fn item_id(&self) -> Option<&str> {
        self.candidate.as_ref().map(|c| c.item_id.as_str())
    }
}
