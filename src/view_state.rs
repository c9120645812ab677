//! State the rendering layer reads.

use serde_json::Value;

use crate::protocol::{Cell, GameId, GameResponse};

/// Fields bound to the view.
///
/// Only the view-model writes this record, and only by copying from a
/// server response. Nothing here is ever edited locally between requests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub game_id: Option<GameId>,
    pub board: Vec<Cell>,
    pub error_message: Option<String>,
    /// Last game payload exactly as the server sent it, unknown fields
    /// included.
    pub last_fetched_game: Option<Value>,
    /// The same payload decoded into the fields this crate understands.
    pub game: Option<GameResponse>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_over(&self) -> bool {
        self.game
            .as_ref()
            .map(GameResponse::is_over)
            .unwrap_or(false)
    }

    /// Replace every game-derived field from a response.
    ///
    /// The identifier is kept when the payload omits it.
    pub(crate) fn apply_game(&mut self, raw: Value, game: GameResponse) {
        if let Some(id) = &game.game_id {
            self.game_id = Some(id.clone());
        }
        self.board = game.full_board.clone().unwrap_or_default();
        self.last_fetched_game = Some(raw);
        self.game = Some(game);
    }
}
