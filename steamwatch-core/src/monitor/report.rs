use crate::monitor::constants::PLACEHOLDER;
use crate::monitor::redraw::{Redrawer, enable_vt};
use crate::monitor::speed::format_optional_speed;
use crate::monitor::status::StatusLabel;
use crate::monitor::types::RateSample;
use serde::Serialize;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

/// One tick's worth of inferred state, ready to render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub steam_dir: PathBuf,
    pub item_id: Option<String>,
    pub display_name: String,
    pub status: StatusLabel,
    pub speed: Option<RateSample>,
    /// 1-based.
    pub iteration: u64,
    pub uptime_secs: u64,
}

impl Report {
    pub fn speed_text(&self) -> String {
        format_optional_speed(self.speed.map(|s| s.bytes_per_sec))
    }
}

/// Renders the fixed six-line status block (no trailing newline).
pub fn render_report(report: &Report) -> String {
    format!(
        "Directory : {}\n\
         ID        : {}\n\
         Game      : {}\n\
         Status    : {}\n\
         Speed     : {}\n\
         Iteration : {} | Uptime: {}s",
        report.steam_dir.display(),
        report.item_id.as_deref().unwrap_or(PLACEHOLDER),
        report.display_name,
        report.status,
        report.speed_text(),
        report.iteration,
        report.uptime_secs,
    )
}

#[derive(Serialize)]
struct ReportJson<'a> {
    observed_at: String,
    #[serde(flatten)]
    report: &'a Report,
    status_label: &'static str,
    speed_text: String,
}

pub fn render_json(report: &Report) -> serde_json::Result<String> {
    serde_json::to_string(&ReportJson {
        observed_at: chrono::Utc::now().to_rfc3339(),
        report,
        status_label: report.status.as_str(),
        speed_text: report.speed_text(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Overwrite the previous block in place.
    InPlace,
    /// Append each block, separated by a blank line.
    Plain,
    /// One JSON object per tick, and a `stopped` event when interrupted.
    Json,
}

#[derive(Serialize)]
struct NoticeJson<'a> {
    observed_at: String,
    event: &'static str,
    message: &'a str,
}

/// Renders the termination notice as a `"event": "stopped"` JSON line.
pub fn render_notice_json(message: &str) -> serde_json::Result<String> {
    serde_json::to_string(&NoticeJson {
        observed_at: chrono::Utc::now().to_rfc3339(),
        event: "stopped",
        message,
    })
}

/// In-place redraws need a terminal that understands cursor movement.
pub fn default_output_mode() -> OutputMode {
    if io::stdout().is_terminal() && enable_vt() {
        OutputMode::InPlace
    } else {
        OutputMode::Plain
    }
}

/// Writes reports to `W` according to the output mode.
pub struct ReportWriter<W: Write> {
    mode: OutputMode,
    screen: Redrawer<W>,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(out: W, mode: OutputMode) -> Self {
        Self {
            mode,
            screen: Redrawer::new(out),
        }
    }

    pub fn write_report(&mut self, report: &Report) -> io::Result<()> {
        match self.mode {
            OutputMode::InPlace => self.screen.draw(&render_report(report)),
            OutputMode::Plain => self.screen.append(&format!("{}\n", render_report(report))),
            OutputMode::Json => self.screen.append(&render_json(report)?),
        }
    }

    /// Writes a line below the last block, e.g. the termination notice.
    pub fn notice(&mut self, text: &str) -> io::Result<()> {
        match self.mode {
            OutputMode::Json => self.screen.append(&render_notice_json(text)?),
            _ => self.screen.append(&format!("\n{text}")),
        }
    }

    pub fn into_inner(self) -> W {
        self.screen.into_inner()
    }
}
