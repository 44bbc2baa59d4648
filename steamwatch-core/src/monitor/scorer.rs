use crate::monitor::patterns::item_id;
use crate::monitor::types::{ActivityCandidate, CandidateSource, LookbackSpan};

const TRANSITION_MARKERS: &[&str] = &[
    "app update changed",
    "update canceled",
    "state changed",
    "update started",
];

const PREPARATION_MARKERS: &[&str] = &["staging", "preallocating", "reconfiguring"];

/// Whether a lowercased line reports a state transition for an app.
pub fn is_transition(lower: &str) -> bool {
    TRANSITION_MARKERS.iter().any(|m| lower.contains(m))
}

/// Heuristic activity score of a lowercased transition line.
///
/// Every matching rule contributes, so a line can collect both bonuses and penalties.
pub fn score_line(lower: &str) -> i32 {
    let mut score = 0;

    if lower.contains("app update changed") {
        score += 5;
    }
    if lower.contains("downloading") {
        score += 4;
    }
    if PREPARATION_MARKERS.iter().any(|m| lower.contains(m)) {
        score += 2;
    }
    if lower.contains("update started") {
        score += 1;
    }

    if lower.contains("suspended") {
        score -= 10;
    }
    // Transition value "none", e.g. "App update changed : None".
    if lower.contains(" none") {
        score -= 6;
    }
    if lower.contains("stopping") {
        score -= 4;
    }

    score
}

/// Picks the app most likely to be active within `span`.
///
/// Lines are visited from the anchor backwards and a candidate replaces the current best
/// when its score is greater than *or equal to* it. On a tie the oldest line in the span
/// therefore wins.
///
/// The bar starts at -1, so heavily penalized lines (suspended, none) never win on their
/// own. When no transition line clears it, the newest plain AppID mention is used.
pub fn select_active(lines: &[String], span: LookbackSpan) -> Option<ActivityCandidate> {
    let mut best: Option<ActivityCandidate> = None;
    let mut best_score = -1;

    for i in span.newest_first() {
        let Some(line) = lines.get(i) else {
            continue;
        };
        let lower = line.to_lowercase();
        if !lower.contains("appid") {
            continue;
        }
        let Some(id) = item_id(line) else {
            continue;
        };
        if !is_transition(&lower) {
            continue;
        }

        let score = score_line(&lower);
        if score >= best_score {
            best_score = score;
            best = Some(ActivityCandidate {
                item_id: id.to_string(),
                score,
                source: CandidateSource::Transition,
                source_line: line.clone(),
            });
        }
    }

    best.or_else(|| first_mention(lines, span))
}

fn first_mention(lines: &[String], span: LookbackSpan) -> Option<ActivityCandidate> {
    span.newest_first().find_map(|i| {
        let line = lines.get(i)?;
        item_id(line).map(|id| ActivityCandidate {
            item_id: id.to_string(),
            score: 0,
            source: CandidateSource::Mention,
            source_line: line.clone(),
        })
    })
}
