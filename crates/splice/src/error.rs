//! Unified error type for Splice.

use splice_game::GameError;
use splice_protocol::ProtocolError;
use splice_room::RoomError;

/// Top-level error that wraps all crate-specific errors.
///
/// The `#[from]` attribute on each variant generates the `From` impls, so
/// `?` converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum SpliceError {
    /// A protocol-level error (encode, decode, malformed game code).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A rule violation inside a game (unknown player, too few players...).
    #[error(transparent)]
    Game(#[from] GameError),

    /// A routing error (game not found, code taken, actor gone).
    #[error(transparent)]
    Room(#[from] RoomError),
}

impl SpliceError {
    /// The game-rule error underneath, whether it surfaced directly or
    /// through a game actor.
    pub fn as_game_error(&self) -> Option<&GameError> {
        match self {
            Self::Game(err) | Self::Room(RoomError::Game(err)) => Some(err),
            _ => None,
        }
    }
}
