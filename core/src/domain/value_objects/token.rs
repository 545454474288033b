//! Confirmation token value object.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};

/// Upper bound on the encoded length accepted from a confirmation link
pub const MAX_ENCODED_TOKEN_LEN: usize = 128;

/// A freshly minted confirmation token
///
/// The raw value is the only credential for the change and is never
/// persisted; storage keys on [`hash_token`] of it.
#[derive(Clone, PartialEq, Eq)]
pub struct VerificationToken {
    raw: String,
}

impl VerificationToken {
    /// Generate a token from `byte_len` bytes of OS randomness, URL-safe base64 encoded
    pub fn generate(byte_len: usize) -> Self {
        let mut bytes = vec![0u8; byte_len];
        OsRng.fill_bytes(&mut bytes);
        Self {
            raw: URL_SAFE_NO_PAD.encode(&bytes),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn hash(&self) -> String {
        hash_token(&self.raw)
    }
}

impl std::fmt::Debug for VerificationToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("VerificationToken(****)")
    }
}

/// Hex-encoded SHA-256 of a raw token
pub fn hash_token(raw: &str) -> String {
    hex::encode(Sha256::digest(raw.as_bytes()))
}

/// Cheap shape check before a lookup; anything else cannot be one of ours
pub fn is_well_formed(raw: &str) -> bool {
    !raw.is_empty()
        && raw.len() <= MAX_ENCODED_TOKEN_LEN
        && raw
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}
