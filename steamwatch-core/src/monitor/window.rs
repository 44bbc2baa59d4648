use crate::error::MonitorError;
use crate::monitor::types::LogWindow;
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

/// Reads at most `budget` trailing bytes of `path` and splits them into lines.
///
/// A missing or empty file is not an error: it yields an empty window. Invalid UTF-8 is
/// replaced rather than rejected, since the writer may be mid-way through a line and the
/// window start may split a multi-byte sequence.
pub fn read_window(path: &Path, budget: u64) -> Result<LogWindow, MonitorError> {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(LogWindow::default()),
        Err(e) => return Err(MonitorError::read_log(path, e)),
    };

    let len = file
        .metadata()
        .map_err(|e| MonitorError::read_log(path, e))?
        .len();
    if len == 0 || budget == 0 {
        return Ok(LogWindow::default());
    }

    let offset = len.saturating_sub(budget);
    file.seek(SeekFrom::Start(offset))
        .map_err(|e| MonitorError::read_log(path, e))?;

    // The file may grow (or shrink) between the metadata call and the read; `take` keeps
    // the read bounded by the budget either way.
    let mut buf = Vec::with_capacity(usize::try_from(len - offset).unwrap_or_default());
    file.take(budget)
        .read_to_end(&mut buf)
        .map_err(|e| MonitorError::read_log(path, e))?;

    Ok(String::from_utf8_lossy(&buf).lines().collect())
}
