//! Game code generation.
//!
//! Codes are short enough to read out loud across a room, so the alphabet
//! leaves out `I` and `O`, which are easy to mistake for digits.

use rand::Rng;
use splice_protocol::{GameCode, ProtocolError};

const ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ";

/// Length of generated game codes.
pub const CODE_LENGTH: usize = 4;

/// Draws a random game code.
pub fn generate_code<R: Rng + ?Sized>(rng: &mut R) -> Result<GameCode, ProtocolError> {
    let raw: String = (0..CODE_LENGTH)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect();
    GameCode::parse(&raw)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn test_generate_code_length_and_alphabet() {
        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..100 {
            let code = generate_code(&mut rng).unwrap();
            assert_eq!(code.as_str().len(), CODE_LENGTH);
            assert!(code.as_str().bytes().all(|b| ALPHABET.contains(&b)));
            assert!(!code.as_str().contains(['I', 'O']));
        }
    }

    #[test]
    fn test_generate_code_varies() {
        let mut rng = StdRng::seed_from_u64(1);
        let first = generate_code(&mut rng).unwrap();
        let differs = (0..20).any(|_| generate_code(&mut rng).unwrap() != first);
        assert!(differs);
    }
}
