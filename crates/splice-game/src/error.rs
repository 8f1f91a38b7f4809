//! Error types for the game layer.

use splice_protocol::ConnectionId;

/// Errors surfaced by [`GameSession`](crate::GameSession) operations.
///
/// None of these are retried internally. The caller (normally the
/// transport layer) decides whether to drop the action, log it, or tell
/// the player.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// A guess (or lookup) arrived from a connection that never joined.
    #[error("no player registered for {0}")]
    UnknownPlayer(ConnectionId),

    /// More drawers were requested than there are players, or zero.
    #[error("cannot assign {requested} drawer(s) among {available} player(s)")]
    InvalidRoleAssignment { requested: usize, available: usize },

    /// The prompt source had nothing to offer for the next round.
    #[error("prompt source returned no usable prompt")]
    EmptyPrompt,

    /// The connection is already bound to a player in this game.
    #[error("{0} is already registered")]
    DuplicateConnection(ConnectionId),

    /// No round has been started yet.
    #[error("no round in progress")]
    NoActiveRound,

    /// The round was already completed (every tile solved or time ran out).
    #[error("round {0} is over")]
    RoundOver(u64),

    /// The game configuration is unusable.
    #[error("invalid game config: {0}")]
    InvalidConfig(String),
}
