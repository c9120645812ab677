//! Terminal front end: prints the view state and reads moves from a line
//! based input.

use std::io::{BufRead, Write};

use crate::{
    error::ClientError,
    render::{describe_game, draw_board},
    transport::HttpClient,
    view_model::GameViewModel,
};

/// Parse a square typed by the player.
pub fn parse_square(input: &str) -> Result<u32, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("Empty input".to_string());
    }
    let square: u32 = input
        .parse()
        .map_err(|_| format!("Invalid square '{}' - must be a number", input))?;
    if square == 0 {
        return Err("Square cannot be 0".to_string());
    }
    Ok(square)
}

/// Print the board and game summary.
pub async fn print_view<H: HttpClient, W: Write>(
    vm: &GameViewModel<H>,
    out: &mut W,
) -> std::io::Result<()> {
    let state = vm.state().await;
    writeln!(out, "{}", draw_board(&state.board))?;
    writeln!(out, "{}", describe_game(&state))?;
    Ok(())
}

/// Interactive loop: start (or resume) a game and keep submitting moves
/// until the server reports the game over or the player quits with `q`.
pub async fn play<H, R, W>(
    vm: &GameViewModel<H>,
    game_id: Option<&str>,
    mut input: R,
    out: &mut W,
) -> anyhow::Result<()>
where
    H: HttpClient,
    R: BufRead,
    W: Write,
{
    match game_id {
        Some(id) => vm.load_game(id).await?,
        None => vm.start_new_game().await?,
    };
    print_view(vm, out).await?;

    while !vm.state().await.is_over() {
        write!(out, "Square (or 'q' to quit): ")?;
        out.flush()?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.eq_ignore_ascii_case("q") {
            break;
        }
        let square = match parse_square(line) {
            Ok(sq) => sq,
            Err(e) => {
                writeln!(out, "✗ Error: {}", e)?;
                continue;
            }
        };

        match vm.submit_move(square).await {
            Ok(_) => print_view(vm, out).await?,
            Err(ClientError::RequestFailed(e)) => {
                writeln!(out, "✗ Request failed: {}", e)?;
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}
