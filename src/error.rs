//! Errors surfaced by the view-model adapter.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a usable response: connection failure,
    /// timeout, non-success status or an undecodable body.
    #[error("request failed: {0}")]
    RequestFailed(String),

    /// The operation was invoked without its precondition holding.
    #[error("invalid state: {0}")]
    InvalidState(&'static str),

    /// The body was JSON but not shaped like a game payload.
    #[error("malformed game payload: {0}")]
    MalformedResponse(#[source] serde_json::Error),

    /// The server answered with errors and no game.
    #[error("server rejected request: {}", .0.join("; "))]
    Rejected(Vec<String>),
}

impl ClientError {
    pub(crate) fn request_failed(err: anyhow::Error) -> Self {
        ClientError::RequestFailed(format!("{err:#}"))
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
