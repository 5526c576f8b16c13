use clap::Parser;

use crate::args::{CliArgs, RunConfig};
use crate::error::{AppResult, ValidationError};
use crate::request::parse_request_file;

/// Parse the command line, validate it, load the request and authorization
/// files, and execute the run.
///
/// # Errors
///
/// Returns an error on configuration or request-file problems (before any
/// worker starts) and on fatal run errors. Cancellation is not an error.
pub fn run() -> AppResult<()> {
    let args = CliArgs::parse();
    crate::logger::init_logging(args.verbose);

    let config = RunConfig::from_args(args)?;

    let mut requests = Vec::with_capacity(config.request_files.len());
    for path in &config.request_files {
        requests.push(parse_request_file(path)?);
    }
    tracing::debug!(
        "Loaded {} request file(s); starting {} worker(s)",
        requests.len(),
        config.thread_count
    );

    let (authorization, authorization_display) = load_authorization(&config)?;

    crate::app::execute_run(&config, &requests, &authorization, &authorization_display)
}

/// Read the shared authorization string. Returns the raw `scheme token`
/// text plus the value shown in the title row (`None` when no file was
/// given).
fn load_authorization(config: &RunConfig) -> AppResult<(String, String)> {
    let Some(path) = &config.authorization_file else {
        return Ok((String::new(), "None".to_owned()));
    };

    let raw = std::fs::read_to_string(path)?;
    let authorization = raw.trim().to_owned();
    if authorization.is_empty() {
        return Err(ValidationError::AuthorizationFileEmpty { path: path.clone() }.into());
    }
    if !authorization.contains(' ') {
        return Err(ValidationError::InvalidAuthorizationFormat.into());
    }

    Ok((authorization, path.display().to_string()))
}
