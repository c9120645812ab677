use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use serde_json::Value;
use tokio::sync::Notify;

use crate::transport::HttpClient;

/// A request as seen by [`InMemoryHttp`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedRequest {
    Get {
        url: String,
        query: Vec<(String, String)>,
    },
    Post {
        url: String,
        body: Value,
    },
}

enum Reply {
    Ready(anyhow::Result<Value>),
    /// Held until [`InMemoryHttp::release`] is called with the same tag.
    Gated(String, anyhow::Result<Value>),
}

#[derive(Default)]
struct Shared {
    replies: VecDeque<Reply>,
    requests: Vec<RecordedRequest>,
    released: Vec<String>,
}

/// Scripted [`HttpClient`]: replies are handed out in the order they were
/// queued, and every request is recorded.
#[derive(Clone, Default)]
pub struct InMemoryHttp {
    shared: Arc<Mutex<Shared>>,
    released: Arc<Notify>,
}

impl InMemoryHttp {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful reply.
    pub fn reply(&self, body: Value) -> &Self {
        self.push(Reply::Ready(Ok(body)))
    }

    /// Queue a transport failure.
    pub fn fail(&self, message: &str) -> &Self {
        self.push(Reply::Ready(Err(anyhow::anyhow!(message.to_string()))))
    }

    /// Queue a reply that is withheld until `release(tag)`.
    pub fn reply_gated(&self, tag: &str, body: Value) -> &Self {
        self.push(Reply::Gated(tag.to_string(), Ok(body)))
    }

    pub fn release(&self, tag: &str) {
        self.lock().released.push(tag.to_string());
        self.released.notify_waiters();
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    pub fn pending_replies(&self) -> usize {
        self.lock().replies.len()
    }

    fn push(&self, reply: Reply) -> &Self {
        self.lock().replies.push_back(reply);
        self
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Shared> {
        // A panic while holding the lock cannot leave the queues half-updated.
        self.shared.lock().unwrap_or_else(|e| e.into_inner())
    }

    async fn exchange(&self, request: RecordedRequest) -> anyhow::Result<Value> {
        let reply = {
            let mut shared = self.lock();
            shared.requests.push(request);
            shared.replies.pop_front()
        };
        match reply {
            Some(Reply::Ready(result)) => result,
            Some(Reply::Gated(tag, result)) => {
                loop {
                    let notified = self.released.notified();
                    if self.lock().released.contains(&tag) {
                        break;
                    }
                    notified.await;
                }
                result
            }
            None => Err(anyhow::anyhow!("No scripted reply left")),
        }
    }
}

#[async_trait::async_trait]
impl HttpClient for InMemoryHttp {
    async fn get(&self, url: &str, query: &[(&str, String)]) -> anyhow::Result<Value> {
        let query = query
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        self.exchange(RecordedRequest::Get {
            url: url.to_string(),
            query,
        })
        .await
    }

    async fn post(&self, url: &str, body: Value) -> anyhow::Result<Value> {
        self.exchange(RecordedRequest::Post {
            url: url.to_string(),
            body,
        })
        .await
    }
}
