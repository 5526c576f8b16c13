use reqwest::Method;
use url::Url;

/// One pre-authored request, built before any worker starts and shared
/// read-only across all workers for the whole run.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    pub method: Method,
    pub url: Url,
    /// Header keys are case-insensitive; values of a repeated key are joined
    /// with `", "` at parse time.
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}
