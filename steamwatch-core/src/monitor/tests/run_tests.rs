use crate::host::NameLookup;
use crate::monitor::report::{OutputMode, Report, render_report};
use crate::monitor::run::{RenderLoop, RunOptions, RunOutcome};
use crate::monitor::status::StatusLabel;
use crate::monitor::types::{InferenceSettings, RateSample};
use pretty_assertions::assert_eq;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};
use tempfile::{TempDir, tempdir};

struct FixedName;

impl NameLookup for FixedName {
    fn display_name(&self, item_id: &str) -> String {
        format!("Game {item_id}")
    }
}

const LOG: &str = "AppID 400 state changed : Downloading\n\
                   Current download rate: 12.50 MB/s\n";

fn steam_with_log(contents: &str) -> (TempDir, PathBuf) {
    let dir = tempdir().unwrap();
    let log = dir.path().join("content_log.txt");
    fs::write(&log, contents).unwrap();
    (dir, log)
}

fn options(mode: OutputMode, ticks: u64) -> RunOptions {
    RunOptions {
        watch: false,
        ticks,
        interval: Duration::ZERO,
        mode,
        inference: InferenceSettings::default(),
    }
}

fn render_loop(
    root: &Path,
    log: PathBuf,
    options: RunOptions,
    cancel: Arc<AtomicBool>,
) -> RenderLoop<FixedName, Vec<u8>> {
    RenderLoop::new(root.to_path_buf(), log, FixedName, options, Vec::new(), cancel)
}

//-----------------------------------------------------------------------------
// Report rendering
//-----------------------------------------------------------------------------

#[test]
fn report_block_has_six_fixed_lines() {
    // Arrange
    let report = Report {
        steam_dir: PathBuf::from("/steam"),
        item_id: Some("400".into()),
        display_name: "Portal".into(),
        status: StatusLabel::Downloading,
        speed: Some(RateSample {
            bytes_per_sec: 12.5 * 1024.0 * 1024.0,
            line_index: 8,
        }),
        iteration: 3,
        uptime_secs: 120,
    };

    // Act
    let block = render_report(&report);

    // Assert
    assert_eq!(
        block,
        "Directory : /steam\n\
         ID        : 400\n\
         Game      : Portal\n\
         Status    : Downloading\n\
         Speed     : 12.50 MB/s\n\
         Iteration : 3 | Uptime: 120s"
    );
}

#[test]
fn absent_values_render_as_placeholders() {
    let report = Report {
        steam_dir: PathBuf::from("/steam"),
        item_id: None,
        display_name: "-".into(),
        status: StatusLabel::Unknown,
        speed: None,
        iteration: 1,
        uptime_secs: 0,
    };

    let block = render_report(&report);

    assert!(block.contains("ID        : -\n"));
    assert!(block.contains("Status    : Unknown\n"));
    assert!(block.contains("Speed     : -\n"));
}

//-----------------------------------------------------------------------------
// Loop behaviour
//-----------------------------------------------------------------------------

#[test]
fn poll_builds_report_from_log_and_lookup() {
    // Arrange
    let (dir, log) = steam_with_log(LOG);
    let render = render_loop(
        dir.path(),
        log,
        options(OutputMode::Plain, 1),
        Arc::new(AtomicBool::new(false)),
    );

    // Act
    let report = render.poll();

    // Assert
    assert_eq!(report.item_id.as_deref(), Some("400"));
    assert_eq!(report.display_name, "Game 400");
    assert_eq!(report.status, StatusLabel::Downloading);
    assert_eq!(report.speed_text(), "12.50 MB/s");
    assert_eq!(report.iteration, 1);
}

#[test]
fn poll_without_log_uses_placeholders() {
    let dir = tempdir().unwrap();
    let render = render_loop(
        dir.path(),
        dir.path().join("missing.txt"),
        options(OutputMode::Plain, 1),
        Arc::new(AtomicBool::new(false)),
    );

    let report = render.poll();

    assert_eq!(report.item_id, None);
    assert_eq!(report.display_name, "-");
    assert_eq!(report.status, StatusLabel::Unknown);
    assert_eq!(report.speed, None);
}

#[test]
fn runs_the_configured_number_of_ticks() {
    // Arrange
    let (dir, log) = steam_with_log(LOG);
    let mut render = render_loop(
        dir.path(),
        log,
        options(OutputMode::Plain, 3),
        Arc::new(AtomicBool::new(false)),
    );

    // Act
    let outcome = render.run().unwrap();
    let out = String::from_utf8(render.into_writer()).unwrap();

    // Assert
    assert_eq!(outcome, RunOutcome::Completed { ticks: 3 });
    assert_eq!(out.matches("Directory : ").count(), 3);
    assert!(out.contains("Iteration : 1 |"));
    assert!(out.contains("Iteration : 3 |"));
    assert!(!out.contains("Stopped by user."));
}

#[test]
fn in_place_mode_redraws_over_previous_block() {
    let (dir, log) = steam_with_log(LOG);
    let mut render = render_loop(
        dir.path(),
        log,
        options(OutputMode::InPlace, 2),
        Arc::new(AtomicBool::new(false)),
    );

    render.run().unwrap();
    let out = String::from_utf8(render.into_writer()).unwrap();

    assert!(out.starts_with("\x1b[0JDirectory : "));
    assert_eq!(out.matches("\x1b[6F\x1b[0J").count(), 1);
}

#[test]
fn zero_ticks_renders_nothing() {
    let (dir, log) = steam_with_log(LOG);
    let mut render = render_loop(
        dir.path(),
        log,
        options(OutputMode::Plain, 0),
        Arc::new(AtomicBool::new(false)),
    );

    let outcome = render.run().unwrap();

    assert_eq!(outcome, RunOutcome::Completed { ticks: 0 });
    assert!(render.into_writer().is_empty());
}

#[test]
fn cancellation_before_first_tick_prints_only_the_notice() {
    // Arrange
    let (dir, log) = steam_with_log(LOG);
    let mut render = render_loop(
        dir.path(),
        log,
        options(OutputMode::Plain, 5),
        Arc::new(AtomicBool::new(true)),
    );

    // Act
    let outcome = render.run().unwrap();
    let out = String::from_utf8(render.into_writer()).unwrap();

    // Assert
    assert_eq!(outcome, RunOutcome::Cancelled { ticks: 0 });
    assert_eq!(out, "\nStopped by user.\n");
}

#[test]
fn watch_mode_runs_until_cancelled() {
    // Arrange
    let (dir, log) = steam_with_log(LOG);
    let cancel = Arc::new(AtomicBool::new(false));
    let mut opts = options(OutputMode::Plain, 1);
    opts.watch = true;
    opts.interval = Duration::from_millis(10);
    let mut render = render_loop(dir.path(), log, opts, cancel.clone());

    let stopper = thread::spawn(move || {
        thread::sleep(Duration::from_millis(200));
        cancel.store(true, Ordering::SeqCst);
    });

    // Act
    let outcome = render.run().unwrap();
    stopper.join().unwrap();
    let out = String::from_utf8(render.into_writer()).unwrap();

    // Assert
    let RunOutcome::Cancelled { ticks } = outcome else {
        panic!("expected cancellation, got {outcome:?}");
    };
    assert!(ticks > 1, "watch mode should ignore the tick limit");
    assert!(out.ends_with("\nStopped by user.\n"));
}

#[test]
fn cancellation_interrupts_a_long_sleep() {
    // Arrange
    let (dir, log) = steam_with_log(LOG);
    let cancel = Arc::new(AtomicBool::new(false));
    let mut opts = options(OutputMode::Plain, 2);
    opts.interval = Duration::from_secs(3600);
    let mut render = render_loop(dir.path(), log, opts, cancel.clone());

    let stopper = thread::spawn(move || {
        thread::sleep(Duration::from_millis(50));
        cancel.store(true, Ordering::SeqCst);
    });

    // Act
    let outcome = render.run().unwrap();
    stopper.join().unwrap();

    // Assert
    assert_eq!(outcome, RunOutcome::Cancelled { ticks: 1 });
}

#[test]
fn bounded_run_does_not_sleep_after_the_last_tick() {
    // Arrange
    let (dir, log) = steam_with_log(LOG);
    let mut opts = options(OutputMode::Plain, 1);
    opts.interval = Duration::from_secs(3600);
    let mut render = render_loop(dir.path(), log, opts, Arc::new(AtomicBool::new(false)));

    // Act
    let started = Instant::now();
    let outcome = render.run().unwrap();
    let elapsed = started.elapsed();

    // Assert
    assert_eq!(outcome, RunOutcome::Completed { ticks: 1 });
    assert!(elapsed < Duration::from_secs(1), "run took {elapsed:?}");
}

#[test]
fn json_mode_reports_cancellation_as_a_json_event() {
    // Arrange
    let (dir, log) = steam_with_log(LOG);
    let mut render = render_loop(
        dir.path(),
        log,
        options(OutputMode::Json, 5),
        Arc::new(AtomicBool::new(true)),
    );

    // Act
    let outcome = render.run().unwrap();
    let out = String::from_utf8(render.into_writer()).unwrap();

    // Assert
    assert_eq!(outcome, RunOutcome::Cancelled { ticks: 0 });
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 1);
    let notice: Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(notice["event"], "stopped");
    assert_eq!(notice["message"], "Stopped by user.");
    assert!(notice["observed_at"].is_string());
}

#[test]
fn json_stream_stays_parseable_after_cancellation() {
    // Arrange
    let (dir, log) = steam_with_log(LOG);
    let cancel = Arc::new(AtomicBool::new(false));
    let mut opts = options(OutputMode::Json, 2);
    opts.interval = Duration::from_secs(3600);
    let mut render = render_loop(dir.path(), log, opts, cancel.clone());

    let stopper = thread::spawn(move || {
        thread::sleep(Duration::from_millis(50));
        cancel.store(true, Ordering::SeqCst);
    });

    // Act
    let outcome = render.run().unwrap();
    stopper.join().unwrap();
    let out = String::from_utf8(render.into_writer()).unwrap();

    // Assert
    assert_eq!(outcome, RunOutcome::Cancelled { ticks: 1 });
    let lines: Vec<Value> = out
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["item_id"], "400");
    assert_eq!(lines[1]["event"], "stopped");
}

#[test]
fn json_mode_emits_one_object_per_tick() {
    // Arrange
    let (dir, log) = steam_with_log(LOG);
    let mut render = render_loop(
        dir.path(),
        log,
        options(OutputMode::Json, 2),
        Arc::new(AtomicBool::new(false)),
    );

    // Act
    render.run().unwrap();
    let out = String::from_utf8(render.into_writer()).unwrap();

    // Assert
    let reports: Vec<Value> = out
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0]["item_id"], "400");
    assert_eq!(reports[0]["display_name"], "Game 400");
    assert_eq!(reports[0]["status"], "downloading");
    assert_eq!(reports[0]["status_label"], "Downloading");
    assert_eq!(reports[0]["speed_text"], "12.50 MB/s");
    assert_eq!(reports[1]["iteration"], 2);
    assert!(reports[1]["observed_at"].is_string());
}
