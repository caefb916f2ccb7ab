//! Email verification codes.

use rand::Rng;
use sha2::{Digest, Sha256};

/// Random six-digit code, zero padded.
pub(crate) fn generate_code() -> String {
    format!("{:06}", rand::thread_rng().gen_range(0..1_000_000))
}

/// Hex SHA-256 digest stored in place of the code.
pub(crate) fn hash_code(code: &str) -> String {
    format!("{:x}", Sha256::digest(code.trim().as_bytes()))
}
