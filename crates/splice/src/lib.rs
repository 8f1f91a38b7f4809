//! # Splice
//!
//! A drawing-and-guessing party game engine. Each round a few players
//! draw the same secret prompt on separate panels while the rest type
//! guesses; guesses are scored with a fuzzy, typo-tolerant distance and
//! the earliest correct guessers earn the most.
//!
//! This crate re-exports the layers and adds a unified error type and
//! logging setup:
//!
//! - `splice-protocol`: ids, routing, codecs
//! - `splice-game`: rules, scoring, the [`GameSession`](prelude::GameSession)
//! - `splice-room`: one actor per game plus the [`GameManager`](prelude::GameManager)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use splice::prelude::*;
//!
//! # async fn run() -> Result<(), SpliceError> {
//! let mut games = GameManager::new();
//! let code = games.create_game(GameConfig::default(), PromptDeck::from_words(["kite"], None))?;
//! let game = games.handle(&code)?;
//!
//! let (tx, _events) = tokio::sync::mpsc::unbounded_channel();
//! game.add_player(PlayerOptions::new("sock-1", "Ada"), tx).await?;
//! # Ok(())
//! # }
//! ```

mod error;
pub mod logging;

pub use error::SpliceError;
pub use splice_game::scorer;

pub mod prelude {
    pub use crate::SpliceError;
    pub use splice_game::{
        GameConfig, GameError, GameSession, GameSummary, GuessResult, Player, PlayerOptions,
        Prompt, PromptDeck, PromptSource, Role, Round, RoundPhase,
    };
    pub use splice_protocol::{
        Codec, ConnectionId, GameCode, JsonCodec, PlayerId, ProtocolError, Recipient,
    };
    pub use splice_room::{
        GameEvent, GameHandle, GameManager, PlayerSender, RoomError, RoundOverReason,
    };
}
