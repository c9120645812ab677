//! JSON payloads exchanged with the game API.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Marker the server uses for a square nobody has played.
pub const OPEN_MARK: &str = "-";

/// Opaque game identifier handed out by the server.
///
/// The server emits integers today, but the client never interprets the
/// value, so both JSON numbers and strings are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameId(String);

impl GameId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for GameId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for GameId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Int(i64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Int(n) => GameId(n.to_string()),
            RawId::Text(s) => GameId(s),
        })
    }
}

/// One square of the board as reported by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub square: u32,
    pub user: String,
}

impl Cell {
    pub fn new(square: u32, user: impl Into<String>) -> Self {
        Self {
            square,
            user: user.into(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.user == OPEN_MARK
    }
}

/// Body of the "create a game" command.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct NewGameRequest {
    pub new: bool,
}

impl Default for NewGameRequest {
    fn default() -> Self {
        Self { new: true }
    }
}

/// Body of a move submission.
#[derive(Debug, Clone, Serialize)]
pub struct MoveRequest {
    pub game_id: GameId,
    #[serde(rename = "move")]
    pub position: u32,
}

/// Payload returned by every endpoint.
///
/// A game payload always carries `full_board`. When the server cannot
/// resolve a game it answers with `error_list` alone, which decodes with
/// `full_board == None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameResponse {
    pub game_id: Option<GameId>,
    pub full_board: Option<Vec<Cell>>,
    pub error_list: Vec<String>,
    pub computer_board: Vec<u32>,
    pub player_board: Vec<u32>,
    pub open_moves: Vec<u32>,
    pub computer_token: Option<String>,
    pub player_token: Option<String>,
    pub current_user: Option<String>,
    pub is_over: Option<bool>,
    pub won_by: Option<String>,
}

impl GameResponse {
    /// Whether the payload describes a game rather than a bare error report.
    pub fn has_game(&self) -> bool {
        self.full_board.is_some()
    }

    pub fn is_over(&self) -> bool {
        self.is_over.unwrap_or(false)
    }

    pub fn first_error(&self) -> Option<&str> {
        self.error_list.first().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_full_game_payload() {
        let body = json!({
            "computer_board": [5],
            "computer_token": "O",
            "current_user": "player",
            "error_list": [],
            "full_board": [
                {"square": 1, "user": "-"},
                {"square": 5, "user": "O"}
            ],
            "game_id": 123,
            "is_over": null,
            "open_moves": [1],
            "player_board": [],
            "player_token": "X",
            "won_by": null
        });
        let game: GameResponse = serde_json::from_value(body).unwrap();
        assert_eq!(game.game_id, Some(GameId::new("123")));
        assert_eq!(game.full_board.as_ref().map(Vec::len), Some(2));
        assert!(game.has_game());
        assert!(!game.is_over());
        assert_eq!(game.player_token.as_deref(), Some("X"));
    }

    #[test]
    fn error_only_payload_has_no_game() {
        let game: GameResponse =
            serde_json::from_value(json!({"error_list": ["Game not found"]})).unwrap();
        assert!(!game.has_game());
        assert_eq!(game.first_error(), Some("Game not found"));
    }

    #[test]
    fn move_request_uses_wire_names() {
        let req = MoveRequest {
            game_id: GameId::new("7"),
            position: 3,
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"game_id": "7", "move": 3})
        );
        assert_eq!(
            serde_json::to_value(NewGameRequest::default()).unwrap(),
            json!({"new": true})
        );
    }
}
