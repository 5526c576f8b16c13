use reqwest::blocking::Client;

use crate::error::AppResult;
use crate::request::{RequestSpec, build_request};

/// Status rendered in log rows when the request never produced a response.
const TRANSPORT_FAILURE_STATUS: i32 = -1;

/// What one dispatched request produced, as far as the engine cares.
/// Transport-level failures are part of the outcome, never an `Err`; the
/// run continues regardless.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// A response arrived. `body_len` stays 0 unless the status was in the
    /// success range; non-success bodies are not read.
    Response { status: u16, body_len: u64 },
    /// Connection error, DNS failure, timeout, or a body read that died
    /// mid-stream.
    TransportFailure,
}

impl SendOutcome {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        match *self {
            SendOutcome::Response { status, .. } => status >= 200 && status < 300,
            SendOutcome::TransportFailure => false,
        }
    }

    /// Status code for log rows; -1 for transport failures.
    #[must_use]
    pub const fn display_status(&self) -> i32 {
        match *self {
            SendOutcome::Response { status, .. } => status as i32,
            SendOutcome::TransportFailure => TRANSPORT_FAILURE_STATUS,
        }
    }

    #[must_use]
    pub const fn body_len(&self) -> u64 {
        match *self {
            SendOutcome::Response { body_len, .. } => body_len,
            SendOutcome::TransportFailure => 0,
        }
    }
}

/// Sends one request at a time. Implemented over a blocking HTTP client in
/// production; tests substitute scripted outcomes.
pub trait Transport {
    fn send(&self, spec: &RequestSpec) -> SendOutcome;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, spec: &RequestSpec) -> SendOutcome {
        (**self).send(spec)
    }
}

/// One blocking client per worker, exclusively owned for the worker's
/// lifetime, plus the shared authorization string.
pub struct HttpTransport {
    client: Client,
    authorization: String,
}

impl HttpTransport {
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(authorization: &str) -> AppResult<Self> {
        Ok(Self {
            client: Client::builder().build()?,
            authorization: authorization.to_owned(),
        })
    }
}

impl Transport for HttpTransport {
    fn send(&self, spec: &RequestSpec) -> SendOutcome {
        match build_request(&self.client, spec, &self.authorization).send() {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    // Only successful payloads are worth measuring.
                    match response.text() {
                        Ok(body) => SendOutcome::Response {
                            status: status.as_u16(),
                            body_len: u64::try_from(body.len()).unwrap_or(u64::MAX),
                        },
                        Err(err) => {
                            tracing::debug!("Failed to read response body: {}", err);
                            SendOutcome::TransportFailure
                        }
                    }
                } else {
                    SendOutcome::Response {
                        status: status.as_u16(),
                        body_len: 0,
                    }
                }
            }
            Err(err) => {
                tracing::debug!("Request failed: {}", err);
                SendOutcome::TransportFailure
            }
        }
    }
}
