//! Game rules for Splice.
//!
//! Players join a game, a round picks `num_tiles` of them to draw the same
//! secret prompt (each on their own panel) and everyone else types
//! guesses. Guesses are scored with a fuzzy, word-aware edit distance, so
//! small typos and a missing "the" still count.
//!
//! This crate is synchronous and transport-agnostic. It knows nothing
//! about sockets or tasks; `splice-room` wraps a [`GameSession`] in an
//! actor and handles delivery.
//!
//! # Key types
//!
//! - [`GameSession`]: roster, round counters, and guess handling
//! - [`GameConfig`]: tile count, tolerance, time limit, seed
//! - [`Player`] / [`Role`]: participants and what they do this round
//! - [`Prompt`] / [`PromptSource`]: the secret and where it comes from
//! - [`scorer`]: the fuzzy distance itself

mod config;
mod error;
mod player;
mod prompt;
pub mod roles;
pub mod scorer;
mod session;

pub use config::{DEFAULT_GAME_NAME, DEFAULT_NUM_TILES, GameConfig};
pub use error::GameError;
pub use player::{Player, PlayerOptions, Role};
pub use prompt::{Prompt, PromptDeck, PromptSource};
pub use session::{GameSession, GameSummary, GuessResult, Round, RoundPhase};
