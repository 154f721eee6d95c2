//! HTTP access for the upstream services
//!
//! Every service client talks to the network through [`HttpGet`] so the
//! suggestion flow can run against canned responses.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::HttpConfig;
use crate::{LunchError, Result};

/// Status and body of a finished GET request
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs a GET request and hands back the raw response
#[async_trait]
pub trait HttpGet: Send + Sync {
    async fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpResponse>;
}

/// [`HttpGet`] backed by a shared reqwest client
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: Client,
}

impl ReqwestClient {
    /// Create a client whose every request is bounded by the configured timeout
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("lunchbot/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| LunchError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpGet for ReqwestClient {
    async fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpResponse> {
        let start_time = Instant::now();
        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        let elapsed = start_time.elapsed();
        debug!(status, elapsed_ms = elapsed.as_millis(), "GET finished");
        if elapsed.as_secs() > 5 {
            warn!("Slow upstream response: {:.3}s", elapsed.as_secs_f64());
        }

        Ok(HttpResponse { status, body })
    }
}

/// GET `url` and decode a successful JSON body into `T`
pub async fn get_json<T: DeserializeOwned>(
    http: &dyn HttpGet,
    url: &str,
    headers: &[(&str, &str)],
) -> Result<T> {
    let response = http.get(url, headers).await?;

    if !response.is_success() {
        return Err(LunchError::upstream_status(response.status, response.body));
    }

    serde_json::from_str(&response.body).map_err(|e| LunchError::parse(format!("Failed to parse response: {e}")))
}


#[cfg(test)]
mod tests {
    use super::fake::FakeHttp;
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Probe {
        ok: bool,
    }

    #[tokio::test]
    async fn test_get_json_success() {
        let http = FakeHttp::new().route("https://svc", 200, r#"{"ok": true}"#);
        let probe: Probe = get_json(&http, "https://svc/probe", &[]).await.unwrap();
        assert!(probe.ok);
    }

    #[tokio::test]
    async fn test_get_json_non_success_status() {
        let http = FakeHttp::new().route("https://svc", 403, "forbidden");
        let err = get_json::<Probe>(&http, "https://svc/probe", &[]).await.unwrap_err();
        assert!(matches!(err, LunchError::UpstreamStatus { status: 403, .. }));
    }

    #[tokio::test]
    async fn test_get_json_malformed_body() {
        let http = FakeHttp::new().route("https://svc", 200, "<html>oops</html>");
        let err = get_json::<Probe>(&http, "https://svc/probe", &[]).await.unwrap_err();
        assert!(matches!(err, LunchError::Parse { .. }));
    }

    #[tokio::test]
    async fn test_get_json_transport_failure() {
        let http = FakeHttp::new().fail("https://svc");
        let err = get_json::<Probe>(&http, "https://svc/probe", &[]).await.unwrap_err();
        assert!(matches!(err, LunchError::Transport { .. }));
    }
}
