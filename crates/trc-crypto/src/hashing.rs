//! # SHA-256 Digests
//!
//! Fingerprints for TRC documents are SHA-256 over their unsigned signing input.

use sha2::{Digest, Sha256};

/// SHA-256 output (256-bit).
pub type Digest256 = [u8; 32];

/// Hash data with SHA-256 (one-shot).
pub fn sha256(data: &[u8]) -> Digest256 {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}
