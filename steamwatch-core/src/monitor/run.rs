use crate::config::MonitorConfig;
use crate::error::MonitorError;
use crate::host::{NameLookup, SteamInstall, locate_steam};
use crate::monitor::activity::current_activity;
use crate::monitor::constants::{PLACEHOLDER, SLEEP_SLICE, STOP_NOTICE};
use crate::monitor::report::{OutputMode, Report, ReportWriter};
use crate::monitor::types::InferenceSettings;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunOptions {
    /// Run until cancelled; `ticks` is ignored.
    pub watch: bool,
    pub ticks: u64,
    pub interval: Duration,
    pub mode: OutputMode,
    pub inference: InferenceSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// All configured ticks were rendered.
    Completed { ticks: u64 },
    /// Stopped by an interrupt after `ticks` reports.
    Cancelled { ticks: u64 },
}

enum LoopState {
    Polling,
    Rendering(Report),
    Sleeping,
    Terminated(RunOutcome),
}

/// Polls the content log on a fixed interval and keeps the report on screen current.
///
/// Cancellation is cooperative: the flag is checked between states and while sleeping,
/// never in the middle of a poll, so a half-built report is never written.
pub struct RenderLoop<L: NameLookup, W: Write> {
    steam_dir: PathBuf,
    log_path: PathBuf,
    lookup: L,
    options: RunOptions,
    writer: ReportWriter<W>,
    cancel: Arc<AtomicBool>,
    started: Instant,
    iteration: u64,
}

impl<L: NameLookup, W: Write> RenderLoop<L, W> {
    pub fn new(
        steam_dir: PathBuf,
        log_path: PathBuf,
        lookup: L,
        options: RunOptions,
        out: W,
        cancel: Arc<AtomicBool>,
    ) -> Self {
        Self {
            steam_dir,
            log_path,
            lookup,
            writer: ReportWriter::new(out, options.mode),
            options,
            cancel,
            started: Instant::now(),
            iteration: 0,
        }
    }

    pub fn run(&mut self) -> Result<RunOutcome, MonitorError> {
        let mut state = LoopState::Polling;

        loop {
            state = match state {
                LoopState::Polling => {
                    if self.is_cancelled() {
                        LoopState::Terminated(self.cancelled())
                    } else if self.is_done() {
                        LoopState::Terminated(self.completed())
                    } else {
                        LoopState::Rendering(self.poll())
                    }
                }
                LoopState::Rendering(report) => {
                    self.writer.write_report(&report)?;
                    self.iteration += 1;

                    if self.is_cancelled() {
                        LoopState::Terminated(self.cancelled())
                    } else if self.is_done() {
                        LoopState::Terminated(self.completed())
                    } else {
                        LoopState::Sleeping
                    }
                }
                LoopState::Sleeping => {
                    if self.sleep_interval() {
                        LoopState::Polling
                    } else {
                        LoopState::Terminated(self.cancelled())
                    }
                }
                LoopState::Terminated(outcome) => {
                    if let RunOutcome::Cancelled { .. } = outcome {
                        self.writer.notice(STOP_NOTICE)?;
                    }
                    tracing::info!(?outcome, "monitor stopped");
                    return Ok(outcome);
                }
            };
        }
    }

    /// Builds the report for the next tick.
    pub fn poll(&self) -> Report {
        let activity = current_activity(&self.log_path, &self.options.inference);

        let display_name = match activity.item_id() {
            Some(id) => self.lookup.display_name(id),
            None => PLACEHOLDER.to_string(),
        };

        Report {
            steam_dir: self.steam_dir.clone(),
            item_id: activity.item_id().map(str::to_string),
            display_name,
            status: activity.status,
            speed: activity.speed,
            iteration: self.iteration + 1,
            uptime_secs: self.started.elapsed().as_secs(),
        }
    }

    pub fn into_writer(self) -> W {
        self.writer.into_inner()
    }

    fn is_done(&self) -> bool {
        !self.options.watch && self.iteration >= self.options.ticks
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::SeqCst)
    }

    fn completed(&self) -> RunOutcome {
        RunOutcome::Completed {
            ticks: self.iteration,
        }
    }

    fn cancelled(&self) -> RunOutcome {
        RunOutcome::Cancelled {
            ticks: self.iteration,
        }
    }

    /// Sleeps for the interval in short slices. Returns `false` if cancelled meanwhile.
    fn sleep_interval(&self) -> bool {
        let deadline = Instant::now() + self.options.interval;
        loop {
            if self.is_cancelled() {
                return false;
            }
            let now = Instant::now();
            if now >= deadline {
                return true;
            }
            thread::sleep(SLEEP_SLICE.min(deadline - now));
        }
    }
}

/// Installs a Ctrl-C handler that raises the returned flag.
pub fn install_interrupt_flag() -> Result<Arc<AtomicBool>, MonitorError> {
    let cancel = Arc::new(AtomicBool::new(false));
    let flag = cancel.clone();
    ctrlc::set_handler(move || {
        flag.store(true, Ordering::SeqCst);
    })?;
    Ok(cancel)
}

/// Locates Steam, then runs the render loop on stdout until done or interrupted.
pub fn run_monitor(cfg: &MonitorConfig, mode: OutputMode) -> Result<RunOutcome, MonitorError> {
    let root = locate_steam(cfg.steam_dir.as_deref())?;
    let install = SteamInstall::open(root);
    let cancel = install_interrupt_flag()?;

    let mut render = RenderLoop::new(
        install.root().to_path_buf(),
        install.content_log(),
        install,
        cfg.run_options(mode),
        io::stdout(),
        cancel,
    );
    render.run()
}
