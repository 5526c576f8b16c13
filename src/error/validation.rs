use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Thread count {value} is out of range 1..={max}.")]
    ThreadCountOutOfRange { value: usize, max: usize },
    #[error("Long request threshold must be at least 1ms.")]
    ThresholdTooSmall,
    #[error("Repetition count {value} is out of range 1..={max}.")]
    RepetitionCountOutOfRange { value: u32, max: u32 },
    #[error("Duration {value}s is out of range 1..={max}s.")]
    DurationOutOfRange { value: u64, max: u64 },
    #[error("Repetition count and duration cannot both be specified.")]
    ConflictingModeOptions,
    #[error("Request file '{path}' does not exist.")]
    RequestFileMissing { path: PathBuf },
    #[error("Authorization file '{path}' does not exist.")]
    AuthorizationFileMissing { path: PathBuf },
    #[error("Authorization file '{path}' is empty.")]
    AuthorizationFileEmpty { path: PathBuf },
    #[error("Authorization data must be 'scheme token' (space-separated).")]
    InvalidAuthorizationFormat,
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
