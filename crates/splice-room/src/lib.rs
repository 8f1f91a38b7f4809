//! Running games for Splice.
//!
//! Each game runs as an isolated Tokio task (actor model) that owns its
//! [`GameSession`](splice_game::GameSession), serializes every call,
//! pushes [`GameEvent`]s to the players, and enforces the round time
//! limit.
//!
//! # Key types
//!
//! - [`GameManager`]: creates/destroys games, routes calls by code
//! - [`GameHandle`]: send commands to a running game actor
//! - [`GameEvent`]: what players receive

mod actor;
pub mod code;
mod error;
mod event;
mod manager;

pub use actor::{GameHandle, PlayerSender};
pub use error::RoomError;
pub use event::{GameEvent, RoundOverReason};
pub use manager::GameManager;
