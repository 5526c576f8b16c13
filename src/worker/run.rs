use std::time::{Duration, Instant};

use crate::args::RunMode;
use crate::error::AppResult;
use crate::request::RequestSpec;
use crate::shutdown::StopSignal;
use crate::stats::WorkerStats;
use crate::transport::Transport;
use crate::ui::LiveDisplay;

/// How a worker finished. Cancellation (user interrupt or duration
/// deadline) is an expected exit path, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerExit {
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CycleEnd {
    Completed,
    Stopped,
}

/// One parallel execution unit: owns its transport and stats exclusively,
/// shares only the read-only request list and the display.
pub struct Worker<'run, T: Transport> {
    index: usize,
    mode: RunMode,
    requests: &'run [RequestSpec],
    transport: T,
    stop: StopSignal,
    stats: WorkerStats,
    display: &'run LiveDisplay,
}

impl<'run, T: Transport> Worker<'run, T> {
    #[must_use]
    pub const fn new(
        index: usize,
        mode: RunMode,
        requests: &'run [RequestSpec],
        transport: T,
        stop: StopSignal,
        slow_threshold: Duration,
        display: &'run LiveDisplay,
    ) -> Self {
        Self {
            index,
            mode,
            requests,
            transport,
            stop,
            stats: WorkerStats::new(slow_threshold),
            display,
        }
    }

    /// Drive request cycles until the termination policy is satisfied or
    /// the stop signal fires between requests.
    ///
    /// # Errors
    ///
    /// Returns an error if a display repaint fails; request-level failures
    /// are folded into the counters and never escape.
    pub fn run(&mut self) -> AppResult<WorkerExit> {
        self.display
            .set_worker_row(self.index, self.stats.summary_line(self.index))?;

        let exit = match self.mode {
            RunMode::Repetitions(count) => self.run_repetitions(count)?,
            RunMode::Duration(duration) => self.run_duration(duration)?,
        };

        if exit == WorkerExit::Cancelled {
            self.display
                .append_log(format!("T#{:<2} has been stopped", self.index))?;
        }
        Ok(exit)
    }

    fn run_repetitions(&mut self, count: u32) -> AppResult<WorkerExit> {
        // Request-level failures are not cycle-level failures; every
        // repetition runs unless the signal fires.
        let stop = self.stop.clone();
        for _ in 0..count {
            if self.run_cycle(&stop)? == CycleEnd::Stopped {
                return Ok(WorkerExit::Cancelled);
            }
        }
        Ok(WorkerExit::Completed)
    }

    fn run_duration(&mut self, duration: Duration) -> AppResult<WorkerExit> {
        // Whichever fires first stops the worker: the shared cancel flag or
        // the local deadline. A cycle may be cut off between requests.
        let combined = self.stop.with_deadline(duration);
        loop {
            if self.run_cycle(&combined)? == CycleEnd::Stopped {
                return Ok(WorkerExit::Cancelled);
            }
        }
    }

    /// One pass over the request list in file order. The signal is checked
    /// before every request; a request already in flight is never aborted.
    fn run_cycle(&mut self, stop: &StopSignal) -> AppResult<CycleEnd> {
        for spec in self.requests {
            if stop.is_raised() {
                return Ok(CycleEnd::Stopped);
            }
            self.process_request(spec)?;
        }
        Ok(CycleEnd::Completed)
    }

    fn process_request(&mut self, spec: &RequestSpec) -> AppResult<()> {
        let started = Instant::now();
        self.stats.record_attempt();

        let outcome = self.transport.send(spec);
        let elapsed = started.elapsed();

        let is_slow = self.stats.record_outcome(outcome.is_success(), elapsed);
        if is_slow {
            self.display.append_log(format!(
                "T#{:<2} {} Len:{:<6} Elapsed:{}",
                self.index,
                outcome.display_status(),
                outcome.body_len(),
                format_elapsed(elapsed),
            ))?;
        }

        self.display
            .set_worker_row(self.index, self.stats.summary_line(self.index))?;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) const fn stats(&self) -> &WorkerStats {
        &self.stats
    }
}

/// Render an elapsed time as `mm:ss.mmm`.
pub(crate) fn format_elapsed(elapsed: Duration) -> String {
    let total_ms = elapsed.as_millis();
    let minutes = total_ms.checked_div(60_000).unwrap_or_default();
    let seconds = total_ms
        .checked_div(1000)
        .and_then(|secs| secs.checked_rem(60))
        .unwrap_or_default();
    let millis = total_ms.checked_rem(1000).unwrap_or_default();
    format!("{:02}:{:02}.{:03}", minutes, seconds, millis)
}
