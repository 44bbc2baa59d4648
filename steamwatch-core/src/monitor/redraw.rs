use std::io::{self, Write};

/// Cursor to the start of the line `n` lines up.
fn cursor_up(n: usize) -> String {
    format!("\x1b[{n}F")
}

/// Clear from the cursor to the end of the screen.
const CLEAR_DOWN: &str = "\x1b[0J";

/// Turns on VT sequence handling for stdout. Returns whether the console now supports it.
///
/// Legacy Windows consoles print escape sequences verbatim until this is switched on.
#[cfg(windows)]
pub fn enable_vt() -> bool {
    crossterm::ansi_support::supports_ansi()
}

#[cfg(not(windows))]
pub fn enable_vt() -> bool {
    true
}

/// Redraws a text block in place without clearing the whole screen.
///
/// Only the height of the last block is remembered: each draw moves the cursor back over
/// it, clears downward and writes the new block, so the report updates without scrolling
/// or flicker.
pub struct Redrawer<W: Write> {
    out: W,
    prev_lines: usize,
}

impl<W: Write> Redrawer<W> {
    pub fn new(out: W) -> Self {
        Self { out, prev_lines: 0 }
    }

    pub fn draw(&mut self, block: &str) -> io::Result<()> {
        let block = block.trim_end_matches('\n');
        let lines = block.matches('\n').count() + 1;

        if self.prev_lines > 0 {
            self.out.write_all(cursor_up(self.prev_lines).as_bytes())?;
        }
        self.out.write_all(CLEAR_DOWN.as_bytes())?;
        writeln!(self.out, "{block}")?;
        self.out.flush()?;

        self.prev_lines = lines;
        Ok(())
    }

    /// Writes `text` as scrolling output; the next draw starts fresh below it.
    pub fn append(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{text}")?;
        self.out.flush()?;
        self.prev_lines = 0;
        Ok(())
    }

    pub fn prev_lines(&self) -> usize {
        self.prev_lines
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
