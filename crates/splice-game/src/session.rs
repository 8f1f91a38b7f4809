//! The game session: roster, round state, and guess handling.
//!
//! A [`GameSession`] is a plain single-owner value. Every mutating method
//! takes `&mut self`, so guesses are applied strictly one at a time in
//! the order the caller hands them in. That order decides who gets the
//! bigger award, so callers fielding guesses from many connections must
//! funnel them through one owner (see the `splice-room` actor).

use std::collections::HashMap;
use std::fmt;

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use splice_protocol::{ConnectionId, GameCode, PlayerId};

use crate::roles::{self, rng_from_seed};
use crate::{GameConfig, GameError, Player, PlayerOptions, Prompt, PromptSource, scorer};

// ---------------------------------------------------------------------------
// RoundPhase
// ---------------------------------------------------------------------------

/// Where the session is in its round cycle.
///
/// ```text
/// NotStarted → InRound ⇄ RoundOver
///                 ↺ (start_round again mid-round)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    NotStarted,
    InRound,
    RoundOver,
}

impl RoundPhase {
    pub fn is_accepting_guesses(self) -> bool {
        matches!(self, Self::InRound)
    }
}

impl fmt::Display for RoundPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotStarted => write!(f, "NotStarted"),
            Self::InRound => write!(f, "InRound"),
            Self::RoundOver => write!(f, "RoundOver"),
        }
    }
}

// ---------------------------------------------------------------------------
// Round / GuessResult / GameSummary
// ---------------------------------------------------------------------------

/// Counters for the current round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    /// Increments on every `start_round`; 0 before the first one.
    pub id: u64,
    /// Correct guesses so far this round, in `0..=num_tiles`.
    pub correct_guesses: usize,
}

/// Outcome of one submitted guess, ready to broadcast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessResult {
    /// The guesser, as of after the guess was applied.
    pub player: Player,
    pub guess: String,
    /// Fuzzy distance to the closest acceptable answer.
    pub lev_score: usize,
    /// The guess was close enough to count.
    pub bingo: bool,
    /// This guess solved the last open panel of the round.
    pub game_over: bool,
    /// Points the guesser received (0 on a miss).
    pub points_awarded: u32,
}

/// Read-only view of a session, for rendering lobbies and leaderboards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub code: GameCode,
    pub name: String,
    pub num_tiles: usize,
    pub phase: RoundPhase,
    pub round: Round,
    pub players: Vec<Player>,
}

// ---------------------------------------------------------------------------
// GameSession
// ---------------------------------------------------------------------------

/// One game: its players, its current prompt, and its round counters.
pub struct GameSession<P: PromptSource> {
    code: GameCode,
    config: GameConfig,
    prompts: P,
    prompt: Option<Prompt>,
    round: Round,
    phase: RoundPhase,
    /// Canonical roster, indexed by `PlayerId`.
    players: Vec<Player>,
    /// Lookup index into `players`; never holds a player of its own.
    by_connection: HashMap<ConnectionId, PlayerId>,
    rng: StdRng,
}

impl<P: PromptSource> GameSession<P> {
    /// Creates an empty session.
    ///
    /// # Errors
    /// [`GameError::InvalidConfig`] if `config` fails validation.
    pub fn new(code: GameCode, config: GameConfig, prompts: P) -> Result<Self, GameError> {
        config.validate()?;
        let rng = rng_from_seed(config.seed);
        Ok(Self {
            code,
            config,
            prompts,
            prompt: None,
            round: Round::default(),
            phase: RoundPhase::NotStarted,
            players: Vec::new(),
            by_connection: HashMap::new(),
            rng,
        })
    }

    /// Registers a new player under the next sequential id.
    ///
    /// Allowed at any time. A player joining mid-round has no role until
    /// the next round starts.
    ///
    /// # Errors
    /// [`GameError::DuplicateConnection`] if the connection already belongs
    /// to a player of this game.
    pub fn add_player(&mut self, options: PlayerOptions) -> Result<&Player, GameError> {
        if self.by_connection.contains_key(&options.connection_id) {
            tracing::warn!(
                code = %self.code,
                connection = %options.connection_id,
                "duplicate connection rejected"
            );
            return Err(GameError::DuplicateConnection(options.connection_id));
        }

        let id = PlayerId(self.players.len() as u64);
        self.by_connection.insert(options.connection_id.clone(), id);
        self.players.push(Player::new(id, options));

        let player = &self.players[id.index()];
        tracing::info!(
            code = %self.code,
            player_id = %id,
            name = player.display_name(),
            players = self.players.len(),
            "player joined"
        );
        Ok(player)
    }

    /// Begins a new round: fresh prompt, counters reset, roles reassigned.
    ///
    /// May be called in any phase, including mid-round, which abandons the
    /// current round. On error the session is left exactly as it was.
    ///
    /// # Errors
    /// - [`GameError::InvalidRoleAssignment`] if there are fewer players
    ///   than tiles.
    /// - [`GameError::EmptyPrompt`] if the prompt source has nothing usable.
    pub fn start_round(&mut self) -> Result<&mut Self, GameError> {
        let num_tiles = self.config.num_tiles;
        roles::check_tile_count(num_tiles, self.players.len())?;

        let prompt = self
            .prompts
            .next_prompt()
            .filter(Prompt::is_usable)
            .ok_or(GameError::EmptyPrompt)?;

        roles::assign_roles(&mut self.players, num_tiles, &mut self.rng)?;
        self.prompt = Some(prompt);
        self.round = Round {
            id: self.round.id + 1,
            correct_guesses: 0,
        };
        self.phase = RoundPhase::InRound;

        tracing::info!(
            code = %self.code,
            round_id = self.round.id,
            players = self.players.len(),
            num_tiles,
            "round started"
        );
        Ok(self)
    }

    /// Starts the first round. Identical to [`start_round`](Self::start_round);
    /// later rounds reuse the same call.
    pub fn start_game(&mut self) -> Result<&mut Self, GameError> {
        self.start_round()
    }

    /// Scores a guess against the current prompt without changing anything.
    ///
    /// # Errors
    /// [`GameError::NoActiveRound`] before the first round.
    pub fn evaluate(&self, guess: &str) -> Result<usize, GameError> {
        let prompt = self.prompt.as_ref().ok_or(GameError::NoActiveRound)?;
        Ok(scorer::score(guess, prompt.answers()))
    }

    /// Scores a guess from `connection` and applies the outcome.
    ///
    /// On a correct guess the guesser earns `num_tiles - correct_guesses`
    /// points and every drawer earns 1. A miss changes nothing.
    ///
    /// # Errors
    /// - [`GameError::UnknownPlayer`] if `connection` never joined.
    /// - [`GameError::NoActiveRound`] / [`GameError::RoundOver`] outside a
    ///   running round.
    ///
    /// No state is touched on error.
    pub fn submit_guess(
        &mut self,
        connection: &ConnectionId,
        guess: &str,
    ) -> Result<GuessResult, GameError> {
        let Some(&player_id) = self.by_connection.get(connection) else {
            tracing::warn!(code = %self.code, %connection, "guess from unknown connection");
            return Err(GameError::UnknownPlayer(connection.clone()));
        };

        match self.phase {
            RoundPhase::NotStarted => return Err(GameError::NoActiveRound),
            RoundPhase::RoundOver => return Err(GameError::RoundOver(self.round.id)),
            RoundPhase::InRound => {}
        }

        let lev_score = self.evaluate(guess)?;
        Ok(self.apply_guess(player_id, guess, lev_score))
    }

    /// Closes the running round early (e.g. its time limit ran out).
    ///
    /// Returns `false` if no round was running.
    pub fn end_round(&mut self) -> bool {
        if !self.phase.is_accepting_guesses() {
            return false;
        }
        self.phase = RoundPhase::RoundOver;
        tracing::info!(
            code = %self.code,
            round_id = self.round.id,
            correct_guesses = self.round.correct_guesses,
            "round ended early"
        );
        true
    }

    /// Applies a scored guess to the session. `player_id` must be a
    /// registered player and the round must be accepting guesses.
    fn apply_guess(&mut self, player_id: PlayerId, guess: &str, lev_score: usize) -> GuessResult {
        let num_tiles = self.config.num_tiles;
        let bingo = scorer::accepts(lev_score, self.config.tolerance);
        let mut points_awarded = 0;
        let mut game_over = false;

        if bingo {
            points_awarded = points_for(num_tiles, self.round.correct_guesses);
            self.players[player_id.index()].award(points_awarded);
            for drawer in self.players.iter_mut().filter(|p| p.is_drawer()) {
                drawer.award(1);
            }

            self.round.correct_guesses += 1;
            if self.round.correct_guesses == num_tiles {
                game_over = true;
                self.phase = RoundPhase::RoundOver;
            }
        }

        tracing::debug!(
            code = %self.code,
            round_id = self.round.id,
            %player_id,
            lev_score,
            bingo,
            game_over,
            "guess scored"
        );

        GuessResult {
            player: self.players[player_id.index()].clone(),
            guess: guess.to_string(),
            lev_score,
            bingo,
            game_over,
            points_awarded,
        }
    }

    // -- Read access --------------------------------------------------------

    pub fn code(&self) -> &GameCode {
        &self.code
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// The current prompt; `None` before the first round.
    pub fn prompt(&self) -> Option<&Prompt> {
        self.prompt.as_ref()
    }

    pub fn round(&self) -> Round {
        self.round
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id.index())
    }

    pub fn player_by_connection(&self, connection: &ConnectionId) -> Option<&Player> {
        self.by_connection
            .get(connection)
            .and_then(|id| self.player(*id))
    }

    /// Current drawers, ordered by panel.
    pub fn drawers(&self) -> Vec<&Player> {
        let mut drawers: Vec<&Player> = self.players.iter().filter(|p| p.is_drawer()).collect();
        drawers.sort_by_key(|p| p.panel_slot());
        drawers
    }

    pub fn guessers(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.is_guesser())
    }

    /// Players by score, highest first; ties keep join order.
    pub fn leaderboard(&self) -> Vec<&Player> {
        let mut board: Vec<&Player> = self.players.iter().collect();
        board.sort_by(|a, b| b.score().cmp(&a.score()).then(a.id().cmp(&b.id())));
        board
    }

    pub fn summary(&self) -> GameSummary {
        GameSummary {
            code: self.code.clone(),
            name: self.config.name.clone(),
            num_tiles: self.config.num_tiles,
            phase: self.phase,
            round: self.round,
            players: self.players.clone(),
        }
    }
}

/// Points for the next correct guesser: one per tile not yet claimed.
/// Clamps instead of truncating on absurd tile counts.
fn points_for(num_tiles: usize, correct_guesses: usize) -> u32 {
    u32::try_from(num_tiles.saturating_sub(correct_guesses)).unwrap_or(u32::MAX)
}

impl<P: PromptSource> fmt::Debug for GameSession<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameSession")
            .field("code", &self.code)
            .field("phase", &self.phase)
            .field("round", &self.round)
            .field("players", &self.players.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(num_tiles: usize) -> GameSession<impl PromptSource> {
        let config = GameConfig {
            num_tiles,
            seed: Some(1),
            ..GameConfig::default()
        };
        GameSession::new(
            GameCode::parse("TEST").unwrap(),
            config,
            || Some(Prompt::one("a large red dog")),
        )
        .unwrap()
    }

    fn conn(i: usize) -> ConnectionId {
        ConnectionId::new(format!("sock-{i}"))
    }

    fn join(session: &mut GameSession<impl PromptSource>, n: usize) {
        for i in 0..n {
            session
                .add_player(PlayerOptions::new(conn(i), format!("player {i}")))
                .unwrap();
        }
    }

    #[test]
    fn test_points_for_counts_down_and_clamps() {
        assert_eq!(points_for(4, 0), 4);
        assert_eq!(points_for(4, 3), 1);
        assert_eq!(points_for(4, 4), 0);
        assert_eq!(points_for(u32::MAX as usize, 0), u32::MAX);
        #[cfg(target_pointer_width = "64")]
        assert_eq!(points_for(u32::MAX as usize + 5, 0), u32::MAX);
    }

    #[test]
    fn test_add_player_assigns_sequential_ids() {
        let mut s = session(1);
        join(&mut s, 3);
        let ids: Vec<u64> = s.players().iter().map(|p| p.id().0).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert_eq!(s.player_by_connection(&conn(2)).unwrap().id(), PlayerId(2));
    }

    #[test]
    fn test_add_player_duplicate_connection_rejected() {
        let mut s = session(1);
        join(&mut s, 1);
        let err = s
            .add_player(PlayerOptions::new(conn(0), "impostor"))
            .unwrap_err();
        assert_eq!(err, GameError::DuplicateConnection(conn(0)));
        assert_eq!(s.players().len(), 1);
        assert_eq!(s.player(PlayerId(0)).unwrap().display_name(), "player 0");
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = GameConfig {
            num_tiles: 0,
            ..GameConfig::default()
        };
        let result = GameSession::new(GameCode::parse("X").unwrap(), config, || None::<Prompt>);
        assert!(matches!(result, Err(GameError::InvalidConfig(_))));
    }

    #[test]
    fn test_start_round_chains_and_increments_round() {
        let mut s = session(2);
        join(&mut s, 4);
        let round = s.start_round().unwrap().start_round().unwrap().round();
        assert_eq!(round.id, 2);
        assert_eq!(round.correct_guesses, 0);
        assert_eq!(s.phase(), RoundPhase::InRound);
        assert_eq!(s.prompt(), Some(&Prompt::one("a large red dog")));
    }

    #[test]
    fn test_start_round_assigns_roles() {
        let mut s = session(3);
        join(&mut s, 7);
        s.start_game().unwrap();

        let panels: Vec<Option<usize>> = s.drawers().iter().map(|p| p.panel_slot()).collect();
        assert_eq!(panels, vec![Some(0), Some(1), Some(2)]);
        assert_eq!(s.guessers().count(), 4);
        assert!(s.guessers().all(|p| p.panel_slot().is_none()));
    }

    #[test]
    fn test_start_round_too_few_players_leaves_state_untouched() {
        let mut s = session(4);
        join(&mut s, 3);
        let err = s.start_round().unwrap_err();
        assert_eq!(
            err,
            GameError::InvalidRoleAssignment {
                requested: 4,
                available: 3
            }
        );
        assert_eq!(s.phase(), RoundPhase::NotStarted);
        assert_eq!(s.round().id, 0);
        assert!(s.prompt().is_none());
    }

    #[test]
    fn test_start_round_empty_prompt_leaves_state_untouched() {
        let mut s = GameSession::new(
            GameCode::parse("EMPTY").unwrap(),
            GameConfig {
                num_tiles: 1,
                ..GameConfig::default()
            },
            || Some(Prompt::one("   ")),
        )
        .unwrap();
        join(&mut s, 2);
        assert_eq!(s.start_round().unwrap_err(), GameError::EmptyPrompt);
        assert_eq!(s.round().id, 0);
        assert!(s.players().iter().all(|p| p.role().is_none()));
    }

    #[test]
    fn test_mid_round_joiner_has_no_role_until_next_round() {
        let mut s = session(1);
        join(&mut s, 2);
        s.start_round().unwrap();
        s.add_player(PlayerOptions::new("late", "Latecomer")).unwrap();

        let late = s.player_by_connection(&ConnectionId::from("late")).unwrap();
        assert_eq!(late.role(), None);

        s.start_round().unwrap();
        let late = s.player_by_connection(&ConnectionId::from("late")).unwrap();
        assert!(late.role().is_some());
    }

    #[test]
    fn test_evaluate_before_first_round_fails() {
        let s = session(1);
        assert_eq!(s.evaluate("dog"), Err(GameError::NoActiveRound));
    }

    #[test]
    fn test_submit_guess_unknown_player_mutates_nothing() {
        let mut s = session(1);
        join(&mut s, 2);
        s.start_round().unwrap();
        let before = s.summary();

        let err = s
            .submit_guess(&ConnectionId::from("stranger"), "large red dog")
            .unwrap_err();
        assert_eq!(err, GameError::UnknownPlayer(ConnectionId::from("stranger")));
        assert_eq!(s.summary(), before);
    }

    #[test]
    fn test_submit_guess_before_round_is_rejected() {
        let mut s = session(1);
        join(&mut s, 2);
        assert_eq!(
            s.submit_guess(&conn(0), "dog").unwrap_err(),
            GameError::NoActiveRound
        );
    }

    #[test]
    fn test_submit_guess_miss_changes_nothing() {
        let mut s = session(1);
        join(&mut s, 3);
        s.start_round().unwrap();
        let before = s.summary();

        let guesser = s.guessers().next().unwrap().connection_id().clone();
        let result = s.submit_guess(&guesser, "purple elephant").unwrap();
        assert!(!result.bingo);
        assert!(!result.game_over);
        assert_eq!(result.points_awarded, 0);
        assert!(result.lev_score > 4);
        assert_eq!(s.summary(), before);
    }

    #[test]
    fn test_end_round_only_from_in_round() {
        let mut s = session(1);
        join(&mut s, 2);
        assert!(!s.end_round());
        s.start_round().unwrap();
        assert!(s.end_round());
        assert!(!s.end_round());
        assert_eq!(
            s.submit_guess(&conn(0), "large red dog").unwrap_err(),
            GameError::RoundOver(1)
        );
    }

    #[test]
    fn test_leaderboard_orders_by_score_then_id() {
        let mut s = session(1);
        join(&mut s, 3);
        s.players[2].award(5);
        s.players[0].award(1);
        s.players[1].award(1);
        let ids: Vec<PlayerId> = s.leaderboard().iter().map(|p| p.id()).collect();
        assert_eq!(ids, vec![PlayerId(2), PlayerId(0), PlayerId(1)]);
    }
}
