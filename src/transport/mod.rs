use serde_json::Value;

/// HTTP capability the view-model is given.
///
/// Implementations return the decoded JSON body of a successful response.
/// Anything else (connection failure, timeout, non-success status, a body
/// that is not JSON) is an error.
#[async_trait::async_trait]
pub trait HttpClient: Send + Sync {
    async fn get(&self, url: &str, query: &[(&str, String)]) -> anyhow::Result<Value>;
    async fn post(&self, url: &str, body: Value) -> anyhow::Result<Value>;
}

#[async_trait::async_trait]
impl<T: HttpClient + ?Sized> HttpClient for std::sync::Arc<T> {
    async fn get(&self, url: &str, query: &[(&str, String)]) -> anyhow::Result<Value> {
        (**self).get(url, query).await
    }

    async fn post(&self, url: &str, body: Value) -> anyhow::Result<Value> {
        (**self).post(url, body).await
    }
}

#[cfg(feature = "http")]
pub mod http;
pub mod in_memory;
