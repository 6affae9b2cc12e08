use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};

/// Raw entropy per opaque token. 32 bytes keeps the hex form at 64
/// characters, which is what the `remember_token` column stores.
pub const TOKEN_BYTES: usize = 32;

/// Generates an opaque credential token from the OS RNG, hex encoded.
pub fn generate() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// SHA-256 hex digest of a token. Only digests are persisted; the raw
/// token lives in the client cookie.
pub fn digest(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Equality over fixed-width digests. Timing of the comparison does not
/// track where the first differing byte sits in the inputs.
pub fn fixed_time_eq(a: &str, b: &str) -> bool {
    Sha256::digest(a.as_bytes()) == Sha256::digest(b.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_produces_64_hex_chars() {
        let token = generate();
        assert_eq!(token.len(), TOKEN_BYTES * 2);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn generate_does_not_repeat() {
        assert_ne!(generate(), generate());
    }

    #[test]
    fn digest_is_stable_and_distinguishes_tokens() {
        let token = "opaque-token";
        assert_eq!(digest(token), digest(token));
        assert_ne!(digest(token), digest("other-token"));
        assert_eq!(digest(token).len(), 64);
    }

    #[test]
    fn fixed_time_eq_matches_plain_equality() {
        assert!(fixed_time_eq("abc", "abc"));
        assert!(!fixed_time_eq("abc", "abd"));
        assert!(!fixed_time_eq("abc", "abcd"));
        assert!(!fixed_time_eq("", "abc"));
        assert!(fixed_time_eq("", ""));
    }
}
