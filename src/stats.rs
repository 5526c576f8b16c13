use std::time::Duration;

/// Per-worker counters and latency summary. Owned exclusively by one worker
/// and never read or written from another thread.
#[derive(Debug)]
pub struct WorkerStats {
    slow_threshold: Duration,
    sent: u64,
    succeeded: u64,
    failed: u64,
    slow: u64,
    latency_count: u64,
    latency_sum_ms: u64,
    min_ms: u64,
    max_ms: u64,
}

impl WorkerStats {
    #[must_use]
    pub const fn new(slow_threshold: Duration) -> Self {
        Self {
            slow_threshold,
            sent: 0,
            succeeded: 0,
            failed: 0,
            slow: 0,
            latency_count: 0,
            latency_sum_ms: 0,
            // Sentinel so the first sample always sets the minimum.
            min_ms: u64::MAX,
            max_ms: 0,
        }
    }

    pub fn record_attempt(&mut self) {
        self.sent = self.sent.saturating_add(1);
    }

    /// Fold a completed request into the counters and the latency summary.
    /// Returns true when the elapsed time met or exceeded the slow-request
    /// threshold, telling the caller to emit a log row.
    pub fn record_outcome(&mut self, success: bool, elapsed: Duration) -> bool {
        if success {
            self.succeeded = self.succeeded.saturating_add(1);
        } else {
            self.failed = self.failed.saturating_add(1);
        }

        let elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        self.latency_count = self.latency_count.saturating_add(1);
        self.latency_sum_ms = self.latency_sum_ms.saturating_add(elapsed_ms);
        self.min_ms = self.min_ms.min(elapsed_ms);
        self.max_ms = self.max_ms.max(elapsed_ms);

        let is_slow = elapsed >= self.slow_threshold;
        if is_slow {
            self.slow = self.slow.saturating_add(1);
        }
        is_slow
    }

    #[must_use]
    pub const fn sent(&self) -> u64 {
        self.sent
    }

    #[must_use]
    pub const fn succeeded(&self) -> u64 {
        self.succeeded
    }

    #[must_use]
    pub const fn failed(&self) -> u64 {
        self.failed
    }

    #[must_use]
    pub const fn slow(&self) -> u64 {
        self.slow
    }

    #[must_use]
    pub const fn latency_count(&self) -> u64 {
        self.latency_count
    }

    /// Derived mean latency; `None` until the first completed outcome.
    #[must_use]
    pub const fn mean_ms(&self) -> Option<u64> {
        self.latency_sum_ms.checked_div(self.latency_count)
    }

    /// Fixed-width one-line summary written to the worker's display row.
    #[must_use]
    pub fn summary_line(&self, worker_index: usize) -> String {
        let (min, max, avg) = if self.latency_count == 0 {
            ("N/A".to_owned(), "N/A".to_owned(), "N/A".to_owned())
        } else {
            (
                format!("{} ms", self.min_ms),
                format!("{} ms", self.max_ms),
                format!("{} ms", self.mean_ms().unwrap_or_default()),
            )
        };

        format!(
            "T#{:<2} S:{:<5} R:{:<5} F:{:<5} L:{:<5} Min:{:>10} Max:{:>10} Avg:{:>10}",
            worker_index, self.sent, self.succeeded, self.failed, self.slow, min, max, avg
        )
    }
}
