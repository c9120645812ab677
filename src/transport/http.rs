use anyhow::{anyhow, Context};
use serde_json::Value;
use tokio::time::Duration;

use crate::config::DEFAULT_TIMEOUT;
use crate::transport::HttpClient;

/// [`HttpClient`] backed by `reqwest`.
pub struct HttpTransport {
    client: reqwest::Client,
    timeout_duration: Duration,
}

impl HttpTransport {
    pub fn new() -> anyhow::Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout_duration: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout_duration)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            timeout_duration,
        })
    }

    async fn read_body(&self, response: reqwest::Response) -> anyhow::Result<Value> {
        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(anyhow!("Server returned {}: {}", status, error_text));
        }

        let text = response
            .text()
            .await
            .context("Failed to read response body")?;
        log::trace!("response body: {}", text);
        serde_json::from_str(&text)
            .with_context(|| format!("Response is not JSON. Raw response: {}", text))
    }

    fn map_send_error(&self, err: reqwest::Error) -> anyhow::Error {
        if err.is_timeout() {
            anyhow!("Request timeout after {:?}", self.timeout_duration)
        } else if err.is_connect() {
            anyhow!("Connection failed: {}", err)
        } else {
            anyhow!("Request error: {}", err)
        }
    }
}

#[async_trait::async_trait]
impl HttpClient for HttpTransport {
    async fn get(&self, url: &str, query: &[(&str, String)]) -> anyhow::Result<Value> {
        log::debug!("GET {} {:?}", url, query);
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;
        self.read_body(response).await
    }

    async fn post(&self, url: &str, body: Value) -> anyhow::Result<Value> {
        log::debug!("POST {} {}", url, body);
        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;
        self.read_body(response).await
    }
}
