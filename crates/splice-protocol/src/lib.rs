//! Shared vocabulary for Splice.
//!
//! This crate defines the small set of types every other layer speaks:
//!
//! - **Identities** ([`PlayerId`], [`GameCode`], [`ConnectionId`]): who
//!   is playing, in which game, over which transport connection.
//! - **Routing** ([`Recipient`]): who an outbound event is for.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]): how events become bytes
//!   for whatever transport relays them.
//! - **Errors** ([`ProtocolError`]).
//!
//! ```text
//! Transport (bytes) → Protocol (ids, codec) → Game / Room layers
//! ```

mod codec;
mod error;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use types::{ConnectionId, GameCode, PlayerId, Recipient};
