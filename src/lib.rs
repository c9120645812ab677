pub mod cli;
pub mod config;
pub mod error;
mod logging;
pub mod protocol;
pub mod render;
pub mod transport;
pub mod view_model;
pub mod view_state;

pub use config::*;
pub use error::ClientError;
pub use logging::init_logging;
pub use protocol::{Cell, GameId, GameResponse, MoveRequest, NewGameRequest};
pub use render::{describe_game, draw_board};
#[cfg(feature = "http")]
pub use transport::http::HttpTransport;
pub use transport::{in_memory::InMemoryHttp, HttpClient};
pub use view_model::{GameViewModel, Update};
pub use view_state::ViewState;
