//! # Ed25519 Signature Scheme
//!
//! [`SignatureScheme`] backed by `trc-crypto` Ed25519 keys. Core-AS online
//! keys are raw 32-byte public keys; signatures are 64 raw bytes.

use crate::domain::errors::{TrcError, TrcResult};
use crate::ports::outbound::SignatureScheme;
use trc_crypto::{CryptoError, Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature};

/// Algorithm name recorded in `OnlineKeyAlg` / `OfflineKeyAlg`.
pub const ED25519_ALG: &str = "ed25519";

/// Ed25519 sign/verify capability.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519Scheme;

impl SignatureScheme for Ed25519Scheme {
    type SigningKey = Ed25519KeyPair;

    fn sign(&self, payload: &[u8], key: &Ed25519KeyPair) -> TrcResult<Vec<u8>> {
        Ok(key.sign(payload).to_vec())
    }

    /// `Ok(false)` for a well-formed signature that does not verify; malformed
    /// keys and signatures are primitive faults.
    fn verify(&self, payload: &[u8], signature: &[u8], public_key: &[u8]) -> TrcResult<bool> {
        let public_key = Ed25519PublicKey::from_slice(public_key).map_err(primitive)?;
        let signature = Ed25519Signature::from_slice(signature).map_err(primitive)?;

        match public_key.verify(payload, &signature) {
            Ok(()) => Ok(true),
            Err(CryptoError::SignatureVerificationFailed) => Ok(false),
            Err(e) => Err(primitive(e)),
        }
    }
}

fn primitive(e: CryptoError) -> TrcError {
    TrcError::SignaturePrimitive(e.to_string())
}
