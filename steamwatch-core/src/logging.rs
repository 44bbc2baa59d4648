use anyhow::{Context, anyhow};
use std::io;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt};

/// Environment variable holding the tracing filter directives.
pub const LOG_ENV: &str = "STEAMWATCH_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Initialize the logging system.
///
/// Events never go to stdout, which is owned by the status report:
/// - without a log file, human-readable events are written to stderr
/// - with a log file, JSON events are appended to it through a non-blocking writer
///
/// The returned guard must be kept alive until exit so buffered events are flushed.
pub fn init_logging(log_file: Option<&Path>) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = env_filter();

    let Some(path) = log_file else {
        fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .try_init()
            .map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))?;
        return Ok(None);
    };

    let file_name = path
        .file_name()
        .with_context(|| format!("log file path {} has no file name", path.display()))?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(
        dir, file_name,
    ));

    fmt()
        .with_env_filter(filter)
        .json()
        .flatten_event(true)
        .with_writer(writer)
        .try_init()
        .map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))?;

    Ok(Some(guard))
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}
