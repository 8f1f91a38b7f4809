//! Events a game actor pushes to connected players.

use serde::{Deserialize, Serialize};
use splice_game::{GuessResult, Player, Prompt};

/// Why a round stopped accepting guesses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundOverReason {
    /// Every panel was guessed.
    Solved,
    /// The round's time limit ran out first.
    TimeExpired,
}

/// An outbound event for one or more players.
///
/// Internally tagged, so a transport can forward the JSON as-is:
/// `{"type": "round_over", "round_id": 3, "reason": "solved"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// Someone joined. Sent to everyone, the newcomer included.
    PlayerJoined { player: Player },

    /// A round began. `drawers` are ordered by panel.
    RoundStarted { round_id: u64, drawers: Vec<Player> },

    /// The secret, sent only to the drawer of `panel`.
    PromptRevealed {
        round_id: u64,
        prompt: Prompt,
        panel: usize,
    },

    /// A guess was scored. Misses are broadcast too.
    GuessScored(GuessResult),

    RoundOver {
        round_id: u64,
        reason: RoundOverReason,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_over_json_shape() {
        let event = GameEvent::RoundOver {
            round_id: 3,
            reason: RoundOverReason::TimeExpired,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "type": "round_over", "round_id": 3, "reason": "time_expired" })
        );
    }

    #[test]
    fn test_prompt_revealed_round_trips() {
        let event = GameEvent::PromptRevealed {
            round_id: 1,
            prompt: Prompt::any_of(["hot dog", "hotdog"]),
            panel: 2,
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
