//! Game manager: creates, tracks, and routes calls to running games.

use std::collections::HashMap;

use rand::rngs::StdRng;
use splice_game::roles::rng_from_seed;
use splice_game::{GameConfig, GameSession, GuessResult, PromptSource};
use splice_protocol::{ConnectionId, GameCode};

use crate::actor::spawn_game;
use crate::code::generate_code;
use crate::{GameHandle, RoomError};

/// Default command channel size for game actors.
const DEFAULT_CHANNEL_SIZE: usize = 64;

/// How many random codes to try before giving up on a free one.
const MAX_CODE_ATTEMPTS: usize = 32;

/// Registry of running games, keyed by game code.
///
/// This is the entry point for a transport layer: create a game, hand
/// its code to the players, then route their calls by code.
pub struct GameManager {
    games: HashMap<GameCode, GameHandle>,
    rng: StdRng,
    channel_size: usize,
}

impl GameManager {
    pub fn new() -> Self {
        Self::with_channel_size(DEFAULT_CHANNEL_SIZE)
    }

    /// Creates a manager whose actors queue at most `channel_size`
    /// commands each.
    pub fn with_channel_size(channel_size: usize) -> Self {
        Self {
            games: HashMap::new(),
            rng: rng_from_seed(None),
            channel_size: channel_size.max(1),
        }
    }

    /// Starts a game under a freshly generated code and returns the code.
    pub fn create_game<P: PromptSource>(
        &mut self,
        config: GameConfig,
        prompts: P,
    ) -> Result<GameCode, RoomError> {
        let mut code = generate_code(&mut self.rng)?;
        for _ in 1..MAX_CODE_ATTEMPTS {
            if !self.games.contains_key(&code) {
                break;
            }
            code = generate_code(&mut self.rng)?;
        }

        let handle = self.create_game_with_code(code, config, prompts)?;
        Ok(handle.code().clone())
    }

    /// Starts a game under a caller-chosen code.
    ///
    /// # Errors
    /// - [`RoomError::CodeTaken`] if a game with this code is running.
    /// - [`RoomError::Game`] if `config` is invalid.
    pub fn create_game_with_code<P: PromptSource>(
        &mut self,
        code: GameCode,
        config: GameConfig,
        prompts: P,
    ) -> Result<&GameHandle, RoomError> {
        if self.games.contains_key(&code) {
            return Err(RoomError::CodeTaken(code));
        }

        let session = GameSession::new(code.clone(), config, prompts)?;
        tracing::info!(
            %code,
            name = session.name(),
            num_tiles = session.config().num_tiles,
            "game created"
        );
        let handle = spawn_game(session, self.channel_size);
        Ok(self.games.entry(code).or_insert(handle))
    }

    /// Returns a handle to a running game.
    pub fn handle(&self, code: &GameCode) -> Result<GameHandle, RoomError> {
        self.games
            .get(code)
            .cloned()
            .ok_or_else(|| RoomError::NotFound(code.clone()))
    }

    /// Routes a guess to the game with `code`.
    pub async fn submit_guess(
        &self,
        code: &GameCode,
        connection: ConnectionId,
        guess: impl Into<String>,
    ) -> Result<GuessResult, RoomError> {
        self.handle(code)?.submit_guess(connection, guess).await
    }

    /// Shuts a game down and forgets it.
    pub async fn destroy_game(&mut self, code: &GameCode) -> Result<(), RoomError> {
        let handle = self
            .games
            .remove(code)
            .ok_or_else(|| RoomError::NotFound(code.clone()))?;

        let _ = handle.shutdown().await;
        tracing::info!(%code, "game destroyed");
        Ok(())
    }

    pub fn game_codes(&self) -> Vec<GameCode> {
        self.games.keys().cloned().collect()
    }

    pub fn game_count(&self) -> usize {
        self.games.len()
    }
}

impl Default for GameManager {
    fn default() -> Self {
        Self::new()
    }
}
