use std::path::PathBuf;
use std::time::Duration;

use crate::error::{AppResult, ValidationError};

use super::cli::CliArgs;

/// Upper bound on worker threads; beyond this the tool is the bottleneck.
const MAX_THREAD_COUNT: usize = 20;
const MAX_REPETITIONS: u32 = 10_000;
const MAX_DURATION_SECS: u64 = 60 * 60 * 24;
/// Repetitions per worker when neither --count nor --duration is given.
const DEFAULT_REPETITIONS: u32 = 5;

/// Termination policy for a run; exactly one is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Each worker replays the request list this many times.
    Repetitions(u32),
    /// Each worker replays cycles back-to-back until the deadline fires.
    Duration(Duration),
}

impl RunMode {
    #[must_use]
    pub fn describe(&self) -> String {
        match *self {
            RunMode::Repetitions(count) => format!("Repetitions={}", count),
            RunMode::Duration(duration) => format!("Duration={}s", duration.as_secs()),
        }
    }
}

/// Validated configuration handed to the run controller.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub thread_count: usize,
    pub slow_threshold: Duration,
    pub mode: RunMode,
    pub authorization_file: Option<PathBuf>,
    pub request_files: Vec<PathBuf>,
}

impl RunConfig {
    /// Validate raw CLI arguments into a run configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when a value is out of range or a
    /// referenced file does not exist. The count/duration conflict is
    /// already rejected at clap level.
    pub fn from_args(args: CliArgs) -> AppResult<Self> {
        if args.threads < 1 || args.threads > MAX_THREAD_COUNT {
            return Err(ValidationError::ThreadCountOutOfRange {
                value: args.threads,
                max: MAX_THREAD_COUNT,
            }
            .into());
        }

        if args.threshold_ms < 1 {
            return Err(ValidationError::ThresholdTooSmall.into());
        }

        let mode = match (args.count, args.duration) {
            (Some(count), None) => {
                if count < 1 || count > MAX_REPETITIONS {
                    return Err(ValidationError::RepetitionCountOutOfRange {
                        value: count,
                        max: MAX_REPETITIONS,
                    }
                    .into());
                }
                RunMode::Repetitions(count)
            }
            (None, Some(secs)) => {
                if secs < 1 || secs > MAX_DURATION_SECS {
                    return Err(ValidationError::DurationOutOfRange {
                        value: secs,
                        max: MAX_DURATION_SECS,
                    }
                    .into());
                }
                RunMode::Duration(Duration::from_secs(secs))
            }
            (None, None) => RunMode::Repetitions(DEFAULT_REPETITIONS),
            // clap's conflicts_with rejects this combination; programmatic
            // callers still get a precise error.
            (Some(_), Some(_)) => {
                return Err(ValidationError::ConflictingModeOptions.into());
            }
        };

        if let Some(path) = &args.auth_file
            && !path.exists()
        {
            return Err(ValidationError::AuthorizationFileMissing { path: path.clone() }.into());
        }

        for path in &args.request_files {
            if !path.exists() {
                return Err(ValidationError::RequestFileMissing { path: path.clone() }.into());
            }
        }

        Ok(Self {
            thread_count: args.threads,
            slow_threshold: Duration::from_millis(args.threshold_ms),
            mode,
            authorization_file: args.auth_file,
            request_files: args.request_files,
        })
    }
}
