use std::path::Path;

use reqwest::Method;
use url::Url;

use crate::error::{AppResult, RequestFileError};

use super::model::RequestSpec;

enum Section {
    RequestLine,
    Headers,
    Body,
}

/// Parse a request file into a [`RequestSpec`].
///
/// The format is line-oriented: a `METHOD ABSOLUTE-URL` request line, then
/// `Key: value` headers until the first blank line, then body lines
/// (concatenated without separators). Blank lines and `#`/`//` comments are
/// skipped before the request line; comments are also skipped among headers.
///
/// # Errors
///
/// Returns an error if the file cannot be read, the request line is missing
/// or malformed, the URL is not absolute, or a header line has no colon.
pub fn parse_request_file(path: &Path) -> AppResult<RequestSpec> {
    let content = std::fs::read_to_string(path)?;
    parse_request_text(path, &content)
}

fn parse_request_text(path: &Path, content: &str) -> AppResult<RequestSpec> {
    let mut section = Section::RequestLine;
    let mut request_line: Option<(Method, Url)> = None;
    let mut headers: Vec<(String, String)> = Vec::new();
    let mut body = String::new();

    for line in content.lines() {
        match section {
            Section::RequestLine => {
                if line.trim().is_empty() || is_comment(line) {
                    continue;
                }
                request_line = Some(parse_request_line(path, line)?);
                section = Section::Headers;
            }
            Section::Headers => {
                if line.trim().is_empty() {
                    section = Section::Body;
                    continue;
                }
                if is_comment(line) {
                    continue;
                }
                let (key, value) = line
                    .split_once(':')
                    .filter(|(key, _)| !key.trim().is_empty())
                    .ok_or_else(|| RequestFileError::InvalidHeaderLine {
                        path: path.to_path_buf(),
                        line: line.to_owned(),
                    })?;
                push_header(&mut headers, key.trim(), value.trim());
            }
            Section::Body => body.push_str(line),
        }
    }

    let (method, url) = request_line.ok_or_else(|| RequestFileError::MissingRequestLine {
        path: path.to_path_buf(),
    })?;

    Ok(RequestSpec {
        method,
        url,
        headers,
        body: if body.is_empty() { None } else { Some(body) },
    })
}

fn parse_request_line(path: &Path, line: &str) -> AppResult<(Method, Url)> {
    let mut parts = line.split_whitespace();
    let (Some(method_text), Some(url_text), None) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(RequestFileError::InvalidRequestLine {
            path: path.to_path_buf(),
            line: line.to_owned(),
        }
        .into());
    };

    let method = Method::from_bytes(method_text.to_ascii_uppercase().as_bytes()).map_err(
        |_source| RequestFileError::InvalidMethod {
            path: path.to_path_buf(),
            value: method_text.to_owned(),
        },
    )?;

    let url = Url::parse(url_text).map_err(|source| RequestFileError::InvalidUrl {
        path: path.to_path_buf(),
        value: url_text.to_owned(),
        source,
    })?;

    Ok((method, url))
}

/// Merge a repeated header key into a single comma-joined value, preserving
/// the first-seen key casing.
fn push_header(headers: &mut Vec<(String, String)>, key: &str, value: &str) {
    if let Some((_, existing)) = headers
        .iter_mut()
        .find(|(stored, _)| stored.eq_ignore_ascii_case(key))
    {
        *existing = format!("{}, {}", existing, value);
    } else {
        headers.push((key.to_owned(), value.to_owned()));
    }
}

fn is_comment(line: &str) -> bool {
    let text = line.trim_start();
    text.starts_with('#') || text.starts_with("//")
}
