use rand::RngCore;
use subtle::ConstantTimeEq;

const TOKEN_BYTES: usize = 16; // 128 bits

/// Mints and verifies per-file access tokens. Tokens are never rotated or
/// expired; possession is the sole proof of download authorization.
#[derive(Debug, Clone, Default)]
pub struct TokenService;

impl TokenService {
    pub fn new() -> Self {
        Self
    }

    /// A fresh token: 128 bits from the thread-local CSPRNG, hex-encoded.
    pub fn mint(&self) -> String {
        let mut buf = [0u8; TOKEN_BYTES];
        rand::rng().fill_bytes(&mut buf);
        hex::encode(buf)
    }

    /// Constant-time comparison in the token contents; only the candidate's
    /// length is observable.
    pub fn verify(&self, candidate: &str, expected: &str) -> bool {
        candidate.as_bytes().ct_eq(expected.as_bytes()).into()
    }
}
