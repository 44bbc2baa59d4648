//! Download Activity Monitor
//!
//! This module works out what Steam is downloading right now by reading the tail of its
//! content log, and keeps a small status report up to date in the terminal.
//!
//! The content log was never meant to be queried. It is an append-only stream of loosely
//! structured lines, several apps can show up in the same stretch of it, and cancellations
//! and resumptions are mixed in with real progress. So instead of parsing it properly we
//! look at a bounded window at the end of the file and apply a few heuristics:
//!
//! - **Rate**: the newest "Current download rate" line gives the transfer speed, and its
//!   position becomes the anchor for everything else
//! - **Activity**: state-transition lines for each AppID before the anchor are scored, and
//!   the best one names the current app
//! - **Status**: the newest status-bearing line for that app decides the label shown
//!
//! Every stage has a "nothing found" outcome that the next stage accepts, so a missing,
//! empty or garbled log only ever produces an "Unknown" report.
//!
//! The per-tick data flow is:
//!
//! ```text
//! content_log.txt
//!   → read_window → LogWindow
//!   → latest_rate (anchor) → select_active (candidate) → resolve_status (label)
//!   → Activity
//!   → Report → ReportWriter (in place | plain | json)
//! ```

pub mod activity;
pub mod constants;
mod patterns;
pub mod rate;
pub mod redraw;
pub mod report;
pub mod run;
pub mod scorer;
pub mod speed;
pub mod status;
#[cfg(test)]
mod tests;
pub mod types;
pub mod window;

pub use activity::{current_activity, infer_activity};
pub use report::{OutputMode, Report, ReportWriter, default_output_mode, render_report};
pub use run::{RenderLoop, RunOptions, RunOutcome, run_monitor};
pub use status::StatusLabel;
pub use types::*;
