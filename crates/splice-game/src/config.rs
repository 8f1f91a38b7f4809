//! Game configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::GameError;
use crate::scorer::DEFAULT_TOLERANCE;

/// Name used when the host doesn't pick one.
pub const DEFAULT_GAME_NAME: &str = "AWESOME SPLICED GAME";

/// Default number of drawer panels per round.
pub const DEFAULT_NUM_TILES: usize = 4;

/// Settings supplied when a game is created.
///
/// Missing fields fall back to [`GameConfig::default`], so a host can send
/// `{"num_tiles": 2}` and nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Display name of the game.
    pub name: String,

    /// Drawers (and panels) per round. A round needs at least this many
    /// players to start.
    pub num_tiles: usize,

    /// Wall-clock limit per round. `None` means rounds only end when every
    /// panel has been guessed.
    pub time_limit: Option<Duration>,

    /// Largest guess distance still counted as correct.
    pub tolerance: usize,

    /// Seed for role assignment. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_GAME_NAME.to_string(),
            num_tiles: DEFAULT_NUM_TILES,
            time_limit: None,
            tolerance: DEFAULT_TOLERANCE,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Rejects settings no round could ever start with.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.num_tiles == 0 {
            return Err(GameError::InvalidConfig(
                "num_tiles must be at least 1".into(),
            ));
        }
        if self.time_limit.is_some_and(|limit| limit.is_zero()) {
            return Err(GameError::InvalidConfig(
                "time_limit must be positive when set".into(),
            ));
        }
        Ok(())
    }
}
