//! Player records.
//!
//! A [`Player`] is owned by its [`GameSession`](crate::GameSession) and only
//! mutated by it: role assignment at round start, points on correct
//! guesses. Everything outside the crate gets read-only access.

use serde::{Deserialize, Serialize};
use splice_protocol::{ConnectionId, PlayerId};

/// What a player does during a round.
///
/// The panel slot lives inside the `Drawer` variant, so a guesser can
/// never carry one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Role {
    /// Submits text guesses.
    Guesser,
    /// Draws the prompt on panel `panel` (0-based).
    Drawer { panel: usize },
}

/// What the transport layer knows about a joining participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerOptions {
    /// The transport's identifier for this player's connection.
    pub connection_id: ConnectionId,
    /// Name shown to the other players.
    pub display_name: String,
}

impl PlayerOptions {
    pub fn new(connection_id: impl Into<ConnectionId>, display_name: impl Into<String>) -> Self {
        Self {
            connection_id: connection_id.into(),
            display_name: display_name.into(),
        }
    }
}

/// One participant of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    connection_id: ConnectionId,
    display_name: String,
    /// `None` until the first round this player takes part in.
    role: Option<Role>,
    score: u32,
}

impl Player {
    pub(crate) fn new(id: PlayerId, options: PlayerOptions) -> Self {
        Self {
            id,
            connection_id: options.connection_id,
            display_name: options.display_name,
            role: None,
            score: 0,
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn connection_id(&self) -> &ConnectionId {
        &self.connection_id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }

    /// The drawer panel this player owns this round, if drawing.
    pub fn panel_slot(&self) -> Option<usize> {
        match self.role {
            Some(Role::Drawer { panel }) => Some(panel),
            _ => None,
        }
    }

    pub fn is_drawer(&self) -> bool {
        matches!(self.role, Some(Role::Drawer { .. }))
    }

    pub fn is_guesser(&self) -> bool {
        matches!(self.role, Some(Role::Guesser))
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub(crate) fn set_role(&mut self, role: Role) {
        self.role = Some(role);
    }

    /// Scores only ever go up within a game.
    pub(crate) fn award(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }
}
