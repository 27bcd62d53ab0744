//! # Outbound Ports (Driven Ports / SPI)
//!
//! Collaborators the TRC core treats as opaque capabilities. None of them is
//! implemented by the domain layer; see `adapters/` for concrete versions.

use crate::domain::errors::TrcResult;

/// Signature primitive used to sign and verify TRC signing input.
///
/// Implementations must be thread-safe: quorum verification checks
/// eligible signers in parallel.
pub trait SignatureScheme: Send + Sync {
    /// Private key material accepted by [`SignatureScheme::sign`].
    type SigningKey: ?Sized;

    /// Sign `payload`, returning raw signature bytes.
    ///
    /// # Errors
    /// * `TrcError::SignaturePrimitive` - the key or primitive faulted
    fn sign(&self, payload: &[u8], key: &Self::SigningKey) -> TrcResult<Vec<u8>>;

    /// Check `signature` over `payload` against a raw public key.
    ///
    /// Returns `Ok(false)` for a well-formed signature that does not verify.
    ///
    /// # Errors
    /// * `TrcError::SignaturePrimitive` - key or signature bytes are unusable
    fn verify(&self, payload: &[u8], signature: &[u8], public_key: &[u8]) -> TrcResult<bool>;
}

/// Optional compression envelope around packed TRC text.
pub trait PayloadCodec: Send + Sync {
    /// Wrap packed bytes.
    fn compress(&self, data: &[u8]) -> TrcResult<Vec<u8>>;

    /// Unwrap an envelope produced by [`PayloadCodec::compress`].
    fn decompress(&self, data: &[u8]) -> TrcResult<Vec<u8>>;
}

/// Parses the string keys of `CoreCAs` into a typed AS identifier.
pub trait AsIdentifierParser {
    /// Typed identifier produced by the parser.
    type Id;

    /// Parse one identifier string.
    ///
    /// # Errors
    /// * `TrcError::InvalidAsIdentifier` - the key is not a valid identifier
    fn parse_as_identifier(&self, key: &str) -> TrcResult<Self::Id>;
}
