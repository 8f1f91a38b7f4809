//! Identity and routing types shared by every Splice layer.
//!
//! These are the values that cross layer boundaries and, serialized, the
//! values a transport puts on the wire when it broadcasts game events.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ProtocolError;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A player's identity inside one game.
///
/// Assigned sequentially by the game session at join time (0, 1, 2, ...)
/// and never reused, so it doubles as the player's index in the roster.
///
/// `#[serde(transparent)]` keeps the wire form a plain number: a
/// `PlayerId(3)` serializes as `3`, not `{"0":3}`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

impl PlayerId {
    /// Returns the roster index this id corresponds to.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P-{}", self.0)
    }
}

/// The short code players type to join a game (e.g. `"KXQT"`).
///
/// Codes are compared case-insensitively: [`GameCode::parse`] trims and
/// upper-cases its input, so `" kxqt "` and `"KXQT"` name the same game.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameCode(String);

impl GameCode {
    /// Normalizes and validates a game code.
    ///
    /// # Errors
    /// Returns [`ProtocolError::InvalidMessage`] if the code is empty after
    /// trimming or contains anything other than ASCII letters and digits.
    pub fn parse(raw: &str) -> Result<Self, ProtocolError> {
        let code = raw.trim().to_ascii_uppercase();
        if code.is_empty() {
            return Err(ProtocolError::InvalidMessage(
                "game code must not be empty".into(),
            ));
        }
        if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ProtocolError::InvalidMessage(format!(
                "game code {code:?} must be alphanumeric"
            )));
        }
        Ok(Self(code))
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for GameCode {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for GameCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque identifier the transport layer gives a player's connection
/// (a socket id, a session token, ...).
///
/// The game never interprets it. It is only a lookup key from "who sent
/// this guess" to the player record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionId(String);

impl ConnectionId {
    /// Wraps a transport-provided identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ConnectionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ConnectionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Recipient
// ---------------------------------------------------------------------------

/// Who should receive an outbound game event.
///
/// Most events go to everyone, but the prompt itself must only reach the
/// drawers, so the game layer pairs each event with a `Recipient`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recipient {
    /// Every player in the game.
    All,

    /// One specific player.
    Player(PlayerId),
}

impl Recipient {
    /// Returns `true` if `player` is covered by this recipient.
    pub fn includes(&self, player: PlayerId) -> bool {
        match self {
            Self::All => true,
            Self::Player(target) => *target == player,
        }
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_serializes_as_plain_number() {
        let json = serde_json::to_string(&PlayerId(42)).unwrap();
        assert_eq!(json, "42");
    }

    #[test]
    fn test_player_id_display() {
        assert_eq!(PlayerId(7).to_string(), "P-7");
    }

    #[test]
    fn test_player_id_index_matches_inner_value() {
        assert_eq!(PlayerId(5).index(), 5);
    }

    #[test]
    fn test_game_code_parse_normalizes_case_and_whitespace() {
        let code = GameCode::parse("  kxqt ").unwrap();
        assert_eq!(code.as_str(), "KXQT");
        assert_eq!(code, "KXQT".parse::<GameCode>().unwrap());
    }

    #[test]
    fn test_game_code_parse_rejects_empty() {
        assert!(matches!(
            GameCode::parse("   "),
            Err(ProtocolError::InvalidMessage(_))
        ));
    }

    #[test]
    fn test_game_code_parse_rejects_punctuation() {
        assert!(GameCode::parse("AB-CD").is_err());
    }

    #[test]
    fn test_game_code_serializes_as_plain_string() {
        let code = GameCode::parse("abcd").unwrap();
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"ABCD\"");
    }

    #[test]
    fn test_connection_id_display() {
        assert_eq!(ConnectionId::from("x1").to_string(), "conn-x1");
    }

    #[test]
    fn test_connection_id_works_as_map_key() {
        use std::collections::HashMap;
        let mut map = HashMap::new();
        map.insert(ConnectionId::from("a"), PlayerId(0));
        map.insert(ConnectionId::from(String::from("b")), PlayerId(1));
        assert_eq!(map[&ConnectionId::new("b")], PlayerId(1));
    }

    #[test]
    fn test_recipient_includes() {
        assert!(Recipient::All.includes(PlayerId(3)));
        assert!(Recipient::Player(PlayerId(3)).includes(PlayerId(3)));
        assert!(!Recipient::Player(PlayerId(3)).includes(PlayerId(4)));
    }
}
