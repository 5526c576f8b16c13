use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};

use super::model::RequestSpec;

/// Default content type for bodies whose request file carries no
/// Content-Type header.
const DEFAULT_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Build a ready-to-send request from a descriptor plus the shared
/// authorization string (empty string means no Authorization header).
#[must_use]
pub fn build_request(client: &Client, spec: &RequestSpec, authorization: &str) -> RequestBuilder {
    let mut builder = client.request(spec.method.clone(), spec.url.clone());

    for (key, value) in &spec.headers {
        builder = builder.header(key, value);
    }

    if !authorization.is_empty() {
        builder = builder.header(AUTHORIZATION, authorization);
    }

    if let Some(body) = &spec.body {
        if !has_content_type(spec) {
            builder = builder.header(CONTENT_TYPE, DEFAULT_CONTENT_TYPE);
        }
        builder = builder.body(body.clone());
    }

    builder
}

fn has_content_type(spec: &RequestSpec) -> bool {
    spec.headers
        .iter()
        .any(|(key, _)| key.eq_ignore_ascii_case("content-type"))
}
