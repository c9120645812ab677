use std::io;

use clap::{Parser, Subcommand};
use tictactoe_client::{
    cli::{play, print_view},
    init_logging, ClientConfig, GameViewModel, HttpTransport,
};

#[derive(Parser)]
#[command(author, version, about = "Play tic-tac-toe against a remote game server", long_about = None)]
struct Cli {
    #[arg(long, help = "Server base URL (overrides TTT_API_URL)")]
    api_url: Option<String>,
    #[arg(long, help = "Endpoint path (overrides TTT_API_PATH)")]
    api_path: Option<String>,
    #[arg(long, help = "Request timeout in seconds (overrides TTT_TIMEOUT_SECS)")]
    timeout_secs: Option<u64>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a new game and print it.
    New,
    /// Print an existing game.
    Show {
        #[arg(long)]
        game_id: String,
    },
    /// Play one square in an existing game.
    Move {
        #[arg(long)]
        game_id: String,
        #[arg(long)]
        square: u32,
    },
    /// Play interactively until the game is over.
    Play {
        #[arg(long, help = "Resume this game instead of starting a new one")]
        game_id: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    let config =
        ClientConfig::from_env().with_overrides(cli.api_url, cli.api_path, cli.timeout_secs);
    init_logging(config.log_level);
    log::debug!("using endpoint {}", config.endpoint());

    let transport = HttpTransport::with_timeout(config.timeout)?;
    let vm = GameViewModel::from_config(transport, &config);
    let mut stdout = io::stdout();

    match cli.command {
        Commands::New => {
            vm.start_new_game().await?;
            print_view(&vm, &mut stdout).await?;
        }
        Commands::Show { game_id } => {
            vm.load_game(&game_id).await?;
            print_view(&vm, &mut stdout).await?;
        }
        Commands::Move { game_id, square } => {
            vm.load_game(&game_id).await?;
            vm.submit_move(square).await?;
            print_view(&vm, &mut stdout).await?;
        }
        Commands::Play { game_id } => {
            let stdin = io::stdin();
            play(&vm, game_id.as_deref(), stdin.lock(), &mut stdout).await?;
        }
    }
    Ok(())
}
