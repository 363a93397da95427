//! SHA-256, used only to derive the BIP-39 checksum byte.

use sha2::{Digest, Sha256};

/// Computes the SHA-256 digest of `bytes`.
#[must_use]
pub fn sha256(bytes: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hasher.finalize().into()
}
