//! Plain-text rendering of the view state.

use crate::{protocol::Cell, view_state::ViewState};

pub const ROW_LEN: usize = 3;

/// Printable board, three squares per row.
///
/// Open squares show their number, played squares show the mark. Every
/// square is followed by a space, e.g. a fresh board renders as
/// `"1 2 3 \n4 5 6 \n7 8 9 "`.
pub fn draw_board(board: &[Cell]) -> String {
    board
        .chunks(ROW_LEN)
        .map(|row| {
            row.iter()
                .map(|cell| {
                    if cell.is_open() {
                        format!("{} ", cell.square)
                    } else {
                        format!("{} ", cell.user)
                    }
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Human-readable summary of the loaded game.
pub fn describe_game(state: &ViewState) -> String {
    let mut lines = Vec::new();
    let Some(game) = &state.game else {
        return "No game loaded".to_string();
    };

    if let Some(id) = &state.game_id {
        lines.push(format!("Game {}", id));
    }
    if let (Some(player), Some(computer)) = (&game.player_token, &game.computer_token) {
        lines.push(format!("You are {}, computer is {}", player, computer));
    }
    if game.is_over() {
        lines.push(match game.won_by.as_deref() {
            Some("player") => "Game over: you win!".to_string(),
            Some("computer") => "Game over: computer wins.".to_string(),
            Some(other) => format!("Game over: won by {}", other),
            None => "Game over: draw.".to_string(),
        });
    } else if game.current_user.as_deref() == Some("player") {
        lines.push("Your move".to_string());
    }
    if let Some(err) = &state.error_message {
        lines.push(format!("Error: {}", err));
    }
    lines.join("\n")
}
