use std::collections::VecDeque;
use std::io::Write;
use std::sync::{Mutex, MutexGuard};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::{execute, queue};

use crate::error::{AppError, AppResult};

/// Bounded log FIFO capacity; the oldest rows are silently dropped.
const LOG_CAPACITY: usize = 1000;
pub(crate) const SPINNER_FRAMES: [char; 4] = ['/', '-', '\\', '|'];

const TITLE_BG: Color = Color::DarkGreen;
const WORKER_BG: Color = Color::DarkGrey;
const LOG_BG: Color = Color::Black;
const BOTTOM_BG: Color = Color::DarkBlue;

/// Owns the terminal for the duration of a run: raw mode on, cursor hidden,
/// screen cleared. Drop restores the terminal on every exit path.
pub struct TerminalSession;

impl TerminalSession {
    /// Enter raw mode, hide the cursor, and clear the screen.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal refuses raw mode or the control
    /// sequences cannot be written.
    pub fn begin() -> AppResult<Self> {
        terminal::enable_raw_mode()?;
        execute!(std::io::stdout(), Hide, Clear(ClearType::All))?;
        Ok(Self)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        drop(execute!(std::io::stdout(), ResetColor, Show));
        drop(terminal::disable_raw_mode());
    }
}

/// The one mutable surface shared by all workers. Every mutating call
/// repaints the whole screen inside the internal lock, so concurrent
/// writers can never interleave partial frames.
pub struct LiveDisplay {
    inner: Mutex<DisplayState>,
}

struct DisplayState {
    writer: Box<dyn Write + Send>,
    fixed_size: Option<(u16, u16)>,
    title: String,
    bottom: String,
    worker_rows: Vec<String>,
    log_rows: VecDeque<String>,
    spinner_phase: usize,
}

impl LiveDisplay {
    /// Display writing to stdout, with one row slot per worker.
    #[must_use]
    pub fn new(thread_count: usize) -> Self {
        Self::with_backend(Box::new(std::io::stdout()), None, thread_count)
    }

    /// Display writing to an arbitrary backend with a fixed terminal size.
    /// Used by tests; production callers go through [`LiveDisplay::new`].
    #[must_use]
    pub fn with_backend(
        writer: Box<dyn Write + Send>,
        fixed_size: Option<(u16, u16)>,
        thread_count: usize,
    ) -> Self {
        Self {
            inner: Mutex::new(DisplayState {
                writer,
                fixed_size,
                title: String::new(),
                bottom: String::new(),
                worker_rows: vec![String::new(); thread_count],
                log_rows: VecDeque::new(),
                spinner_phase: 0,
            }),
        }
    }

    /// # Errors
    ///
    /// Returns an error if the repaint fails; terminal I/O failures are
    /// fatal for the run.
    pub fn set_title(&self, text: &str) -> AppResult<()> {
        let mut state = self.lock_state()?;
        state.title = text.to_owned();
        state.redraw()
    }

    /// # Errors
    ///
    /// Returns an error if the repaint fails.
    pub fn set_bottom(&self, text: &str) -> AppResult<()> {
        let mut state = self.lock_state()?;
        state.bottom = text.to_owned();
        state.redraw()
    }

    /// Replace one worker's status row. `index` must be a valid worker
    /// ordinal; an out-of-range index is a defect, not an operational
    /// condition.
    ///
    /// # Errors
    ///
    /// Returns an error if the repaint fails.
    pub fn set_worker_row(&self, index: usize, text: String) -> AppResult<()> {
        let mut state = self.lock_state()?;
        debug_assert!(
            index < state.worker_rows.len(),
            "worker row index out of range"
        );
        if let Some(row) = state.worker_rows.get_mut(index) {
            *row = text;
        }
        state.redraw()
    }

    /// Append a log row, trimming the oldest once the FIFO is full.
    ///
    /// # Errors
    ///
    /// Returns an error if the repaint fails.
    pub fn append_log(&self, text: String) -> AppResult<()> {
        let mut state = self.lock_state()?;
        state.log_rows.push_back(text);
        while state.log_rows.len() > LOG_CAPACITY {
            state.log_rows.pop_front();
        }
        state.redraw()
    }

    fn lock_state(&self) -> AppResult<MutexGuard<'_, DisplayState>> {
        self.inner
            .lock()
            .map_err(|_poisoned| AppError::from(std::io::Error::other("display lock poisoned")))
    }

    #[cfg(test)]
    pub(crate) fn worker_row(&self, index: usize) -> AppResult<Option<String>> {
        let state = self.lock_state()?;
        Ok(state.worker_rows.get(index).cloned())
    }

    #[cfg(test)]
    pub(crate) fn log_rows(&self) -> AppResult<Vec<String>> {
        let state = self.lock_state()?;
        Ok(state.log_rows.iter().cloned().collect())
    }
}

impl DisplayState {
    /// Repaint the whole screen, top to bottom: spinner+title, worker rows,
    /// the newest visible log rows, blank padding, pinned bottom row. Every
    /// row is clipped and padded to `width - 1` so no stale characters
    /// survive from a longer previous frame and no row wraps.
    fn redraw(&mut self) -> AppResult<()> {
        let (width, height) = self.size()?;
        let usable = usize::from(width.saturating_sub(1));
        let last_row = height.saturating_sub(1);

        self.spinner_phase = self
            .spinner_phase
            .saturating_add(1)
            .checked_rem(SPINNER_FRAMES.len())
            .unwrap_or(0);
        let spinner = SPINNER_FRAMES
            .get(self.spinner_phase)
            .copied()
            .unwrap_or('/');

        let mut row: u16 = 0;

        queue!(self.writer, SetBackgroundColor(TITLE_BG))?;
        paint_row(
            &mut self.writer,
            row,
            &format!("{}{}", spinner, self.title),
            usable,
        )?;
        row = row.saturating_add(1);

        queue!(self.writer, SetBackgroundColor(WORKER_BG))?;
        for text in &self.worker_rows {
            paint_row(&mut self.writer, row, text, usable)?;
            row = row.saturating_add(1);
        }

        queue!(self.writer, SetBackgroundColor(LOG_BG))?;
        let visible = usize::from(height)
            .saturating_sub(self.worker_rows.len())
            .saturating_sub(2);
        let skip = self.log_rows.len().saturating_sub(visible);
        for text in self.log_rows.iter().skip(skip) {
            if row >= last_row {
                break;
            }
            paint_row(&mut self.writer, row, text, usable)?;
            row = row.saturating_add(1);
        }

        while row < last_row {
            paint_row(&mut self.writer, row, "", usable)?;
            row = row.saturating_add(1);
        }

        queue!(self.writer, SetBackgroundColor(BOTTOM_BG))?;
        paint_row(&mut self.writer, last_row, &self.bottom, usable)?;

        queue!(self.writer, ResetColor)?;
        self.writer.flush()?;
        Ok(())
    }

    fn size(&self) -> AppResult<(u16, u16)> {
        match self.fixed_size {
            Some(size) => Ok(size),
            None => Ok(terminal::size()?),
        }
    }
}

fn paint_row<W: Write>(writer: &mut W, row: u16, text: &str, usable: usize) -> AppResult<()> {
    let clipped: String = text.chars().take(usable).collect();
    queue!(
        writer,
        MoveTo(0, row),
        Print(format!("{:<width$}", clipped, width = usable))
    )?;
    Ok(())
}
