//! Game actor: an isolated Tokio task that owns one [`GameSession`].
//!
//! Every call from the outside arrives as a [`GameCommand`] on a bounded
//! mpsc channel and is handled to completion before the next one is
//! read. Guesses from many connections are therefore scored in arrival
//! order, which is what decides who gets the bigger award.

use std::collections::HashMap;

use splice_game::{
    GameSession, GameSummary, GuessResult, Player, PlayerOptions, PromptSource, Round,
};
use splice_protocol::{ConnectionId, GameCode, PlayerId, Recipient};
use tokio::sync::{mpsc, oneshot};
use tokio::time::{self, Instant};

use crate::{GameEvent, RoomError, RoundOverReason};

/// Channel sender for delivering events to one player's connection.
///
/// Unbounded: the actor must never await a slow reader while
/// it holds the session, or one stalled socket would freeze the game for
/// everyone. Backpressure lives on the command side instead.
pub type PlayerSender = mpsc::UnboundedSender<GameEvent>;

/// Commands sent to a game actor through its channel.
///
/// Every variant carries a `oneshot` reply channel except `Shutdown`. The
/// caller sends the command, then awaits the reply; the actor answers
/// once the command has been applied, so a returned `GuessResult`
/// already reflects every guess queued before it.
pub(crate) enum GameCommand {
    AddPlayer {
        options: PlayerOptions,
        sender: PlayerSender,
        reply: oneshot::Sender<Result<Player, RoomError>>,
    },
    StartRound {
        reply: oneshot::Sender<Result<Round, RoomError>>,
    },
    SubmitGuess {
        connection: ConnectionId,
        guess: String,
        reply: oneshot::Sender<Result<GuessResult, RoomError>>,
    },
    Snapshot {
        reply: oneshot::Sender<GameSummary>,
    },
    Shutdown,
}

/// Handle to a running game actor.
///
/// Cheap to clone; the [`GameManager`](crate::GameManager) keeps one per
/// game and hands out copies.
#[derive(Debug, Clone)]
pub struct GameHandle {
    code: GameCode,
    sender: mpsc::Sender<GameCommand>,
}

impl GameHandle {
    pub fn code(&self) -> &GameCode {
        &self.code
    }

    /// Registers a player and subscribes `sender` to the game's events.
    ///
    /// Everyone (the new player included) receives
    /// [`GameEvent::PlayerJoined`].
    pub async fn add_player(
        &self,
        options: PlayerOptions,
        sender: PlayerSender,
    ) -> Result<Player, RoomError> {
        self.request(|reply| GameCommand::AddPlayer {
            options,
            sender,
            reply,
        })
        .await?
    }

    /// Starts the next round and returns its counters.
    pub async fn start_round(&self) -> Result<Round, RoomError> {
        self.request(|reply| GameCommand::StartRound { reply }).await?
    }

    /// Scores a guess. The result is also broadcast as
    /// [`GameEvent::GuessScored`].
    pub async fn submit_guess(
        &self,
        connection: ConnectionId,
        guess: impl Into<String>,
    ) -> Result<GuessResult, RoomError> {
        let guess = guess.into();
        self.request(|reply| GameCommand::SubmitGuess {
            connection,
            guess,
            reply,
        })
        .await?
    }

    pub async fn snapshot(&self) -> Result<GameSummary, RoomError> {
        self.request(|reply| GameCommand::Snapshot { reply }).await
    }

    /// Tells the actor to stop. Pending commands queued before this one
    /// are still handled.
    pub async fn shutdown(&self) -> Result<(), RoomError> {
        self.sender
            .send(GameCommand::Shutdown)
            .await
            .map_err(|_| self.unavailable())
    }

    /// Sends a command built around a fresh reply channel and waits for
    /// the answer.
    async fn request<T>(
        &self,
        command: impl FnOnce(oneshot::Sender<T>) -> GameCommand,
    ) -> Result<T, RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(command(reply_tx))
            .await
            .map_err(|_| self.unavailable())?;
        reply_rx.await.map_err(|_| self.unavailable())
    }

    fn unavailable(&self) -> RoomError {
        RoomError::Unavailable(self.code.clone())
    }
}

/// The actor's state. Runs inside a Tokio task.
struct GameActor<P: PromptSource> {
    session: GameSession<P>,
    /// Per-player event channels.
    senders: HashMap<PlayerId, PlayerSender>,
    /// When the running round times out, if it has a limit.
    deadline: Option<Instant>,
    receiver: mpsc::Receiver<GameCommand>,
}

impl<P: PromptSource> GameActor<P> {
    /// Runs the actor loop until shutdown or until every handle is gone.
    async fn run(mut self) {
        let code = self.session.code().clone();
        tracing::info!(%code, "game actor started");

        // Two things can wake the actor: a command, or the round clock.
        // `sleep_until` is rebuilt on every pass from `self.deadline`, so
        // starting, solving or expiring a round just updates the field and
        // the next iteration races the new deadline (or none at all).
        loop {
            tokio::select! {
                cmd = self.receiver.recv() => {
                    match cmd {
                        Some(GameCommand::Shutdown) => {
                            tracing::info!(%code, "game shutting down");
                            break;
                        }
                        Some(cmd) => self.handle(cmd),
                        None => break,
                    }
                }
                () = sleep_until(self.deadline) => self.expire_round(),
            }
        }

        tracing::info!(%code, "game actor stopped");
    }

    fn handle(&mut self, cmd: GameCommand) {
        match cmd {
            GameCommand::AddPlayer {
                options,
                sender,
                reply,
            } => {
                let _ = reply.send(self.handle_add_player(options, sender));
            }
            GameCommand::StartRound { reply } => {
                let _ = reply.send(self.handle_start_round());
            }
            GameCommand::SubmitGuess {
                connection,
                guess,
                reply,
            } => {
                let _ = reply.send(self.handle_guess(&connection, &guess));
            }
            GameCommand::Snapshot { reply } => {
                let _ = reply.send(self.session.summary());
            }
            GameCommand::Shutdown => {}
        }
    }

    fn handle_add_player(
        &mut self,
        options: PlayerOptions,
        sender: PlayerSender,
    ) -> Result<Player, RoomError> {
        let player = self.session.add_player(options)?.clone();
        self.senders.insert(player.id(), sender);
        self.dispatch(
            Recipient::All,
            GameEvent::PlayerJoined {
                player: player.clone(),
            },
        );
        Ok(player)
    }

    fn handle_start_round(&mut self) -> Result<Round, RoomError> {
        self.session.start_round()?;
        let round = self.session.round();
        let drawers: Vec<Player> = self.session.drawers().into_iter().cloned().collect();

        self.deadline = self
            .session
            .config()
            .time_limit
            .map(|limit| Instant::now() + limit);

        self.dispatch(
            Recipient::All,
            GameEvent::RoundStarted {
                round_id: round.id,
                drawers: drawers.clone(),
            },
        );

        if let Some(prompt) = self.session.prompt().cloned() {
            for drawer in &drawers {
                let Some(panel) = drawer.panel_slot() else {
                    continue;
                };
                self.dispatch(
                    Recipient::Player(drawer.id()),
                    GameEvent::PromptRevealed {
                        round_id: round.id,
                        prompt: prompt.clone(),
                        panel,
                    },
                );
            }
        }

        Ok(round)
    }

    fn handle_guess(
        &mut self,
        connection: &ConnectionId,
        guess: &str,
    ) -> Result<GuessResult, RoomError> {
        let result = self.session.submit_guess(connection, guess)?;
        self.dispatch(Recipient::All, GameEvent::GuessScored(result.clone()));

        // Solved before the clock ran out: disarm it so the stale deadline
        // can't end the next round early.
        if result.game_over {
            self.deadline = None;
            self.finish_round(RoundOverReason::Solved);
        }
        Ok(result)
    }

    fn expire_round(&mut self) {
        self.deadline = None;
        if self.session.end_round() {
            self.finish_round(RoundOverReason::TimeExpired);
        }
    }

    fn finish_round(&self, reason: RoundOverReason) {
        let round_id = self.session.round().id;
        tracing::info!(
            code = %self.session.code(),
            round_id,
            ?reason,
            "round over"
        );
        self.dispatch(Recipient::All, GameEvent::RoundOver { round_id, reason });
    }

    /// Delivers an event to every subscribed player the recipient covers.
    /// Players whose receiver is gone are skipped silently.
    fn dispatch(&self, recipient: Recipient, event: GameEvent) {
        for (player_id, sender) in &self.senders {
            if recipient.includes(*player_id) {
                let _ = sender.send(event.clone());
            }
        }
    }
}

/// Resolves at `deadline`, or never if there is none, so the `select!`
/// loop only wakes up for commands.
///
/// `std::future::pending` is the idle branch rather than a very long
/// sleep: it registers no timer at all, and with a paused test clock
/// there is nothing for auto-advance to jump to.
async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

/// Spawns a game actor for `session` and returns a handle to it.
///
/// `channel_size` bounds the command queue; callers wait when it is full.
pub(crate) fn spawn_game<P: PromptSource>(
    session: GameSession<P>,
    channel_size: usize,
) -> GameHandle {
    let (tx, rx) = mpsc::channel(channel_size);
    let code = session.code().clone();

    let actor = GameActor {
        session,
        senders: HashMap::new(),
        deadline: None,
        receiver: rx,
    };

    tokio::spawn(actor.run());

    GameHandle { code, sender: tx }
}
