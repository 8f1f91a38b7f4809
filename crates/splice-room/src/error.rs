//! Error types for the room layer.

use splice_game::GameError;
use splice_protocol::{GameCode, ProtocolError};

/// Errors that can occur while routing calls to a game.
#[derive(Debug, thiserror::Error)]
pub enum RoomError {
    /// No running game has this code.
    #[error("game {0} not found")]
    NotFound(GameCode),

    /// A game with this code is already running.
    #[error("game code {0} is already in use")]
    CodeTaken(GameCode),

    /// The game's command channel is full or closed.
    #[error("game {0} is unavailable")]
    Unavailable(GameCode),

    /// A game code was malformed.
    #[error("invalid game code: {0}")]
    InvalidCode(#[from] ProtocolError),

    /// The game itself rejected the call.
    #[error(transparent)]
    Game(#[from] GameError),
}
