// HTTP client utilities
use crate::domain::error::ProviderError;
use reqwest::{Client, Response};
use std::time::Duration;

/// Create the shared HTTP client used by every provider adapter.
///
/// The timeout applies to each request as a whole; adapters never retry.
pub fn create_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(30))
        .timeout(timeout)
        .user_agent(concat!("lingo-relay/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Turn a non-2xx response into `ProviderError::Status`.
pub async fn ensure_success(response: Response) -> Result<Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(ProviderError::Status {
        status: status.as_u16(),
        body: truncate(&body, 200),
    })
}

fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}…", &s[..idx]),
        None => s.to_string(),
    }
}

/// Strip trailing slashes so `{base}/translate` never doubles up.
pub fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}
