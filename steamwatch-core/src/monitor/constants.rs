use std::time::Duration;

/// Content log location, relative to the Steam root.
pub const CONTENT_LOG: &str = "logs/content_log.txt";

pub const DEFAULT_TAIL_KIB: u64 = 2048;
pub const DEFAULT_LOOKBACK_LINES: usize = 260;
pub const DEFAULT_TICKS: u64 = 5;
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(60);

/// Upper bound on how long a Ctrl-C can go unnoticed while sleeping between ticks.
pub const SLEEP_SLICE: Duration = Duration::from_millis(100);

/// Shown in place of any value that could not be inferred.
pub const PLACEHOLDER: &str = "-";

pub const STOP_NOTICE: &str = "Stopped by user.";
