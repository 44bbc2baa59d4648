use crate::monitor::constants::{
    DEFAULT_INTERVAL, DEFAULT_LOOKBACK_LINES, DEFAULT_TAIL_KIB, DEFAULT_TICKS,
};
use crate::monitor::{InferenceSettings, OutputMode, RunOptions};
use anyhow::{Context, ensure};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MonitorConfig {
    /// Steam root; discovered from platform defaults when unset.
    pub steam_dir: Option<PathBuf>,

    /// Refresh until interrupted; `ticks` is ignored.
    pub watch: bool,

    pub ticks: u64,

    /// Seconds between refreshes.
    pub interval_secs: u64,

    /// Trailing window of the content log to analyse, in KiB.
    pub tail_kib: u64,

    /// Lines before the anchor considered when picking the active app.
    pub lookback_lines: usize,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            steam_dir: None,
            watch: false,
            ticks: DEFAULT_TICKS,
            interval_secs: DEFAULT_INTERVAL.as_secs(),
            tail_kib: DEFAULT_TAIL_KIB,
            lookback_lines: DEFAULT_LOOKBACK_LINES,
        }
    }
}

impl MonitorConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let cfg: Self = contents
            .parse()
            .with_context(|| format!("invalid config file {}", path.display()))?;
        Ok(cfg)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(self.tail_kib > 0, "tail_kib must be greater than zero");
        ensure!(
            self.lookback_lines > 0,
            "lookback_lines must be greater than zero"
        );
        Ok(())
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn inference(&self) -> InferenceSettings {
        InferenceSettings {
            tail_bytes: self.tail_kib.saturating_mul(1024),
            lookback_lines: self.lookback_lines,
        }
    }

    pub fn run_options(&self, mode: OutputMode) -> RunOptions {
        RunOptions {
            watch: self.watch,
            ticks: self.ticks,
            interval: self.interval(),
            mode,
            inference: self.inference(),
        }
    }
}

impl FromStr for MonitorConfig {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let cfg: Self = toml::from_str(s).context("failed to parse steamwatch config")?;
        cfg.validate()?;
        Ok(cfg)
    }
}
