use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RequestFileError {
    #[error("Request file '{path}' contains an invalid request line: {line}")]
    InvalidRequestLine { path: PathBuf, line: String },
    #[error("Request file '{path}' contains an invalid URL '{value}': {source}")]
    InvalidUrl {
        path: PathBuf,
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Request file '{path}' contains an invalid method '{value}'.")]
    InvalidMethod { path: PathBuf, value: String },
    #[error("Request file '{path}' contains an invalid header line: {line}")]
    InvalidHeaderLine { path: PathBuf, line: String },
    #[error("Request file '{path}' does not contain a request line.")]
    MissingRequestLine { path: PathBuf },
}
