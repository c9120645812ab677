//! View-model adapter between the UI and the remote game API.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::Mutex;

use crate::{
    config::ClientConfig,
    error::{ClientError, Result},
    protocol::{GameResponse, MoveRequest, NewGameRequest},
    transport::HttpClient,
    view_state::ViewState,
};

/// What happened to the response of a successful request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Update {
    /// The response was copied into the view state.
    Applied,
    /// A later request was issued before this response arrived, so it was
    /// dropped without touching the view state.
    Superseded { seq: u64, latest: u64 },
}

impl Update {
    pub fn is_applied(&self) -> bool {
        matches!(self, Update::Applied)
    }
}

/// Binds a [`ViewState`] to the game API.
///
/// Every operation performs exactly one exchange and then replaces view
/// fields wholesale from the response. Each request draws a sequence
/// number; a response is only applied while its number is still the
/// latest issued, so overlapping calls cannot leave an older board on
/// screen.
pub struct GameViewModel<H: HttpClient> {
    http: H,
    endpoint: String,
    state: Mutex<ViewState>,
    issued: AtomicU64,
}

impl<H: HttpClient> GameViewModel<H> {
    pub fn new(http: H, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            state: Mutex::new(ViewState::new()),
            issued: AtomicU64::new(0),
        }
    }

    pub fn from_config(http: H, config: &ClientConfig) -> Self {
        Self::new(http, config.endpoint())
    }

    /// Snapshot of the view state for rendering.
    pub async fn state(&self) -> ViewState {
        self.state.lock().await.clone()
    }

    /// Sequence number of the most recently issued request (0 before any).
    pub fn latest_request(&self) -> u64 {
        self.issued.load(Ordering::SeqCst)
    }

    /// Fetch an existing game and show it. Leaves `error_message` alone.
    pub async fn load_game(&self, game_id: &str) -> Result<Update> {
        let game_id = game_id.trim();
        if game_id.is_empty() {
            return Err(ClientError::InvalidState("game id must not be empty"));
        }

        let seq = self.next_seq();
        log::debug!("[{}] loading game {}", seq, game_id);
        let body = self
            .http
            .get(&self.endpoint, &[("game_id", game_id.to_string())])
            .await
            .map_err(ClientError::request_failed)?;
        let (raw, game) = decode_game(body)?;

        self.apply(seq, |state| state.apply_game(raw, game)).await
    }

    /// Ask the server for a fresh game and show it.
    pub async fn start_new_game(&self) -> Result<Update> {
        let seq = self.next_seq();
        log::debug!("[{}] starting new game", seq);
        let body = self
            .http
            .post(&self.endpoint, encode(&NewGameRequest::default())?)
            .await
            .map_err(ClientError::request_failed)?;
        let (raw, game) = decode_game(body)?;
        if let Some(id) = &game.game_id {
            log::info!("started game {}", id);
        }

        self.apply(seq, |state| state.apply_game(raw, game)).await
    }

    /// Play `position` in the loaded game.
    ///
    /// Overwrites `error_message` with the first server-reported error, or
    /// clears it when the move was accepted.
    pub async fn submit_move(&self, position: u32) -> Result<Update> {
        let game_id = self
            .state
            .lock()
            .await
            .game_id
            .clone()
            .ok_or(ClientError::InvalidState("no game loaded"))?;

        let seq = self.next_seq();
        log::debug!("[{}] game {}: playing square {}", seq, game_id, position);
        let request = MoveRequest { game_id, position };
        let body = self
            .http
            .post(&self.endpoint, encode(&request)?)
            .await
            .map_err(ClientError::request_failed)?;
        let (raw, game) = decode_game(body)?;
        let error_message = game.first_error().map(str::to_string);
        if let Some(err) = &error_message {
            log::info!("move {} refused: {}", position, err);
        }

        self.apply(seq, |state| {
            state.apply_game(raw, game);
            state.error_message = error_message;
        })
        .await
    }

    fn next_seq(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    async fn apply(&self, seq: u64, update: impl FnOnce(&mut ViewState)) -> Result<Update> {
        let mut state = self.state.lock().await;
        let latest = self.latest_request();
        if seq != latest {
            log::warn!(
                "dropping response to request {}: request {} was issued after it",
                seq,
                latest
            );
            return Ok(Update::Superseded { seq, latest });
        }
        update(&mut state);
        Ok(Update::Applied)
    }
}

fn encode<T: Serialize>(body: &T) -> Result<Value> {
    serde_json::to_value(body)
        .map_err(|e| ClientError::RequestFailed(format!("could not encode request: {}", e)))
}

/// Decode a game payload, keeping the raw body alongside it.
fn decode_game(body: Value) -> Result<(Value, GameResponse)> {
    let game = GameResponse::deserialize(&body).map_err(ClientError::MalformedResponse)?;
    if !game.has_game() {
        let errors = if game.error_list.is_empty() {
            vec!["response carried no game".to_string()]
        } else {
            game.error_list
        };
        return Err(ClientError::Rejected(errors));
    }
    Ok((body, game))
}
