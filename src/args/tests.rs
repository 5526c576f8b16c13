use super::*;
use crate::error::{AppError, AppResult, ValidationError};
use clap::Parser;
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

fn request_file() -> AppResult<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    writeln!(file, "GET http://localhost/")?;
    Ok(file)
}

#[test]
fn parse_args_defaults() -> AppResult<()> {
    let args = CliArgs::try_parse_from(["reqvolley", "req.http"])
        .map_err(|err| AppError::validation(format!("Expected parse success: {}", err)))?;

    if args.threads != 1 {
        return Err(AppError::validation("Expected default thread count 1"));
    }
    if args.threshold_ms != 1000 {
        return Err(AppError::validation("Expected default threshold 1000ms"));
    }
    if args.count.is_some() || args.duration.is_some() {
        return Err(AppError::validation(
            "Expected count and duration to be absent by default",
        ));
    }
    Ok(())
}

#[test]
fn parse_args_rejects_count_with_duration() -> AppResult<()> {
    if CliArgs::try_parse_from(["reqvolley", "-n", "3", "-d", "10", "req.http"]).is_ok() {
        return Err(AppError::validation(
            "Expected --count and --duration to conflict",
        ));
    }
    Ok(())
}

#[test]
fn config_defaults_to_five_repetitions() -> AppResult<()> {
    let file = request_file()?;
    let path = file.path().to_string_lossy().into_owned();
    let args = CliArgs::try_parse_from(["reqvolley", &path])
        .map_err(|err| AppError::validation(format!("Expected parse success: {}", err)))?;

    let config = RunConfig::from_args(args)?;
    if config.mode != RunMode::Repetitions(5) {
        return Err(AppError::validation("Expected default Repetitions(5)"));
    }
    Ok(())
}

#[test]
fn config_duration_mode() -> AppResult<()> {
    let file = request_file()?;
    let path = file.path().to_string_lossy().into_owned();
    let args = CliArgs::try_parse_from(["reqvolley", "-d", "30", &path])
        .map_err(|err| AppError::validation(format!("Expected parse success: {}", err)))?;

    let config = RunConfig::from_args(args)?;
    if config.mode != RunMode::Duration(Duration::from_secs(30)) {
        return Err(AppError::validation("Expected Duration(30s)"));
    }
    Ok(())
}

#[test]
fn config_rejects_thread_count_out_of_range() -> AppResult<()> {
    let file = request_file()?;
    let path = file.path().to_string_lossy().into_owned();
    let args = CliArgs::try_parse_from(["reqvolley", "-t", "21", &path])
        .map_err(|err| AppError::validation(format!("Expected parse success: {}", err)))?;

    match RunConfig::from_args(args) {
        Err(AppError::Validation(ValidationError::ThreadCountOutOfRange { value: 21, .. })) => {
            Ok(())
        }
        Ok(_) | Err(_) => Err(AppError::validation("Expected ThreadCountOutOfRange")),
    }
}

#[test]
fn config_rejects_zero_repetitions() -> AppResult<()> {
    let file = request_file()?;
    let path = file.path().to_string_lossy().into_owned();
    let args = CliArgs::try_parse_from(["reqvolley", "-n", "0", &path])
        .map_err(|err| AppError::validation(format!("Expected parse success: {}", err)))?;

    match RunConfig::from_args(args) {
        Err(AppError::Validation(ValidationError::RepetitionCountOutOfRange {
            value: 0, ..
        })) => Ok(()),
        Ok(_) | Err(_) => Err(AppError::validation("Expected RepetitionCountOutOfRange")),
    }
}

#[test]
fn config_rejects_duration_out_of_range() -> AppResult<()> {
    let file = request_file()?;
    let path = file.path().to_string_lossy().into_owned();
    let args = CliArgs::try_parse_from(["reqvolley", "-d", "86401", &path])
        .map_err(|err| AppError::validation(format!("Expected parse success: {}", err)))?;

    match RunConfig::from_args(args) {
        Err(AppError::Validation(ValidationError::DurationOutOfRange { value: 86401, .. })) => {
            Ok(())
        }
        Ok(_) | Err(_) => Err(AppError::validation("Expected DurationOutOfRange")),
    }
}

#[test]
fn config_rejects_count_and_duration_together() -> AppResult<()> {
    // clap rejects this pair on the command line; programmatic callers of
    // from_args must get the same refusal with a precise error.
    let file = request_file()?;
    let args = CliArgs {
        threads: 1,
        threshold_ms: 1000,
        count: Some(3),
        duration: Some(10),
        auth_file: None,
        verbose: false,
        request_files: vec![file.path().to_path_buf()],
    };

    match RunConfig::from_args(args) {
        Err(AppError::Validation(ValidationError::ConflictingModeOptions)) => Ok(()),
        Ok(_) | Err(_) => Err(AppError::validation("Expected ConflictingModeOptions")),
    }
}

#[test]
fn config_rejects_missing_request_file() -> AppResult<()> {
    let args = CliArgs::try_parse_from(["reqvolley", "/nonexistent/req.http"])
        .map_err(|err| AppError::validation(format!("Expected parse success: {}", err)))?;

    match RunConfig::from_args(args) {
        Err(AppError::Validation(ValidationError::RequestFileMissing { .. })) => Ok(()),
        Ok(_) | Err(_) => Err(AppError::validation("Expected RequestFileMissing")),
    }
}

#[test]
fn config_rejects_missing_auth_file() -> AppResult<()> {
    let file = request_file()?;
    let path = file.path().to_string_lossy().into_owned();
    let args = CliArgs::try_parse_from(["reqvolley", "-a", "/nonexistent/auth.txt", &path])
        .map_err(|err| AppError::validation(format!("Expected parse success: {}", err)))?;

    match RunConfig::from_args(args) {
        Err(AppError::Validation(ValidationError::AuthorizationFileMissing { .. })) => Ok(()),
        Ok(_) | Err(_) => Err(AppError::validation("Expected AuthorizationFileMissing")),
    }
}

#[test]
fn run_mode_describe() -> AppResult<()> {
    if RunMode::Repetitions(3).describe() != "Repetitions=3" {
        return Err(AppError::validation("Repetitions describe mismatch"));
    }
    if RunMode::Duration(Duration::from_secs(10)).describe() != "Duration=10s" {
        return Err(AppError::validation("Duration describe mismatch"));
    }
    Ok(())
}
