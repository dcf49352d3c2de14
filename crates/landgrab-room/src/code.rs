//! Join-code generation.

use landgrab_protocol::RoomCode;
use rand::Rng;

/// Characters a join code may use. 0/O/1/I are left out because codes
/// get read aloud and retyped.
const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Length of a generated join code.
const CODE_LEN: usize = 4;

/// Draws a fresh random join code. Uniqueness is the registry's job.
pub(crate) fn random_code() -> RoomCode {
    let mut rng = rand::rng();
    let code: String = (0..CODE_LEN)
        .map(|_| CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())] as char)
        .collect();
    RoomCode::new(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_use_the_restricted_alphabet() {
        for _ in 0..64 {
            let code = random_code();
            assert_eq!(code.as_str().len(), CODE_LEN);
            for byte in code.as_str().bytes() {
                assert!(
                    CODE_ALPHABET.contains(&byte),
                    "unexpected character {:?} in {}",
                    byte as char,
                    code
                );
            }
        }
    }
}
