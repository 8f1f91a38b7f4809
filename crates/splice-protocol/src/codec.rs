//! Codec trait and implementations for turning events into bytes.
//!
//! The game core produces plain Rust values (guess results, round events).
//! A transport that relays them needs bytes; a [`Codec`] is the seam
//! between the two. [`JsonCodec`] is the only implementation for now.

use serde::{Serialize, de::DeserializeOwned};

use crate::ProtocolError;

/// Encodes values to bytes and decodes bytes back.
///
/// `Send + Sync + 'static` so a single codec can be shared by every
/// connection task of a server.
///
/// The methods are generic rather than the trait, so one codec value
/// handles every event type. That makes the trait not object-safe; code
/// that needs to pick a format at runtime should be generic over
/// `C: Codec` instead of holding a `Box<dyn Codec>`.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns `ProtocolError::Encode` if the value can't be represented
    /// in this format.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    ///
    /// `DeserializeOwned` rather than `Deserialize<'de>`: the result must
    /// not borrow from `data`, since transport buffers are reused as soon
    /// as a frame has been decoded.
    ///
    /// # Errors
    /// Returns `ProtocolError::Decode` if the bytes are malformed or don't
    /// match the expected type.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] backed by `serde_json`. Behind the `json` feature (default).
///
/// ```rust
/// use splice_protocol::{Codec, JsonCodec, PlayerId};
///
/// let codec = JsonCodec;
/// let bytes = codec.encode(&PlayerId(4)).unwrap();
/// assert_eq!(bytes, b"4");
/// let back: PlayerId = codec.decode(&bytes).unwrap();
/// assert_eq!(back, PlayerId(4));
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError> {
        // Keep the serde_json error as the source so `?` callers still
        // see which field failed.
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}
