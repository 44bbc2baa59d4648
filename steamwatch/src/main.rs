use clap::Parser;
use owo_colors::OwoColorize;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use steamwatch_core::config::MonitorConfig;
use steamwatch_core::error::MonitorError;
use steamwatch_core::logging::init_logging;
use steamwatch_core::monitor::{OutputMode, RunOutcome, default_output_mode, run_monitor};

#[derive(Parser, Debug)]
#[command(
    name = "steamwatch",
    version,
    about = "steamwatch: live view of what Steam is downloading"
)]
struct Cli {
    /// Refresh until interrupted (ignores --ticks)
    #[arg(long)]
    watch: bool,

    /// Number of refreshes before exiting [default: 5]
    #[arg(long)]
    ticks: Option<u64>,

    /// Seconds between refreshes [default: 60]
    #[arg(long)]
    interval: Option<u64>,

    /// Steam installation directory (skips auto-discovery)
    #[arg(long, env = "STEAMWATCH_STEAM_DIR")]
    steam_dir: Option<PathBuf>,

    /// Optional TOML config file; flags take precedence
    #[arg(long)]
    config: Option<PathBuf>,

    /// Append reports instead of redrawing in place
    #[arg(long, conflicts_with = "json")]
    plain: bool,

    /// Emit one JSON report per refresh
    #[arg(long)]
    json: bool,

    /// Write JSON logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn monitor_config(&self) -> anyhow::Result<MonitorConfig> {
        let mut cfg = match &self.config {
            Some(path) => MonitorConfig::from_file(path)?,
            None => MonitorConfig::default(),
        };

        if self.watch {
            cfg.watch = true;
        }
        if let Some(ticks) = self.ticks {
            cfg.ticks = ticks;
        }
        if let Some(interval) = self.interval {
            cfg.interval_secs = interval;
        }
        if let Some(dir) = &self.steam_dir {
            cfg.steam_dir = Some(dir.clone());
        }

        cfg.validate()?;
        Ok(cfg)
    }

    fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else if self.plain {
            OutputMode::Plain
        } else {
            default_output_mode()
        }
    }
}

fn main() {
    let code = run(Cli::parse());
    std::process::exit(code);
}

/// Returns the process exit code. Keeps the log guard alive until the run is over.
fn run(cli: Cli) -> i32 {
    let cfg = match cli.monitor_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("config error: {e:#}");
            return 1;
        }
    };

    let _guard = match init_logging(cli.log_file.as_deref()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("logging error: {e:#}");
            return 1;
        }
    };

    match run_monitor(&cfg, cli.output_mode()) {
        Ok(RunOutcome::Completed { ticks } | RunOutcome::Cancelled { ticks }) => {
            tracing::debug!(ticks, "exiting");
            0
        }
        Err(e @ MonitorError::SteamNotFound { .. }) => {
            if io::stderr().is_terminal() {
                eprintln!("{}", e.red());
            } else {
                eprintln!("{e}");
            }
            e.exit_code()
        }
        Err(e) => {
            eprintln!("steamwatch error: {e}");
            e.exit_code()
        }
    }
}
