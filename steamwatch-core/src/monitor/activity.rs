use crate::monitor::rate::latest_rate;
use crate::monitor::scorer::select_active;
use crate::monitor::status::resolve_status;
use crate::monitor::types::{Activity, InferenceSettings, LogWindow, LookbackSpan};
use crate::monitor::window::read_window;
use std::path::Path;

/// Runs the inference pipeline over an already-read window.
pub fn infer_activity(window: &LogWindow, settings: &InferenceSettings) -> Activity {
    let lines = window.lines();
    let Some(last) = lines.len().checked_sub(1) else {
        return Activity::unknown();
    };

    let speed = latest_rate(lines);
    let anchor = speed.map_or(last, |s| s.line_index);
    let span = LookbackSpan::ending_at(anchor, settings.lookback_lines);

    let Some(candidate) = select_active(lines, span) else {
        return Activity { speed, ..Activity::unknown() };
    };

    let (status, status_line) = resolve_status(lines, &candidate, span);
    let status_line = Some(status_line.to_string());

    Activity {
        candidate: Some(candidate),
        status,
        speed,
        status_line,
    }
}

/// Reads the content log and infers the current activity.
///
/// Read failures are logged and reported as "nothing known"; the next tick retries.
pub fn current_activity(log_path: &Path, settings: &InferenceSettings) -> Activity {
    let window = match read_window(log_path, settings.tail_bytes) {
        Ok(window) => window,
        Err(e) => {
            tracing::warn!(error = %e, "content log unreadable; treating as empty");
            return Activity::unknown();
        }
    };

    if window.is_empty() {
        tracing::debug!(path = %log_path.display(), "content log missing or empty");
        return Activity::unknown();
    }

    let activity = infer_activity(&window, settings);
    tracing::debug!(
        lines = window.len(),
        item_id = activity.item_id().unwrap_or("-"),
        status = %activity.status,
        bytes_per_sec = activity.speed.map(|s| s.bytes_per_sec),
        "activity inferred"
    );
    activity
}
