//! # Trust Root Service
//!
//! Application service implementing [`TrustRootApi`].
//!
//! ## Architecture
//!
//! - Implements the inbound port (`TrustRootApi`)
//! - Uses the outbound ports (`SignatureScheme`, `PayloadCodec`)
//! - Delegates document, quorum and rotation logic to the domain layer

use crate::adapters::compression::CompressionConfig;
use crate::domain::document::TrcDocument;
use crate::domain::errors::{TrcError, TrcResult};
use crate::domain::quorum::{QuorumTally, QuorumVerifier};
use crate::domain::rotation::RotationValidator;
use crate::ports::inbound::TrustRootApi;
use crate::ports::outbound::{PayloadCodec, SignatureScheme};
use tracing::warn;
use trc_crypto::Digest256;

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Service configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrcConfig {
    /// Compression envelope settings
    pub compression: CompressionConfig,
    /// Largest raw input accepted by `parse`, before decompression
    pub max_payload_bytes: usize,
}

impl Default for TrcConfig {
    fn default() -> Self {
        Self {
            compression: CompressionConfig::default(),
            max_payload_bytes: 1024 * 1024,
        }
    }
}

// =============================================================================
// SERVICE
// =============================================================================

/// Trust Root Configuration service.
pub struct TrcService<S: SignatureScheme, C: PayloadCodec> {
    scheme: S,
    codec: C,
    config: TrcConfig,
}

impl<S: SignatureScheme, C: PayloadCodec> TrcService<S, C> {
    /// Create a new service.
    ///
    /// # Arguments
    /// * `scheme` - Signature primitive for signing and verification
    /// * `codec` - Compression envelope codec
    /// * `config` - Size bounds
    pub fn new(scheme: S, codec: C, config: TrcConfig) -> Self {
        Self {
            scheme,
            codec,
            config,
        }
    }

    pub fn config(&self) -> &TrcConfig {
        &self.config
    }

    pub fn scheme(&self) -> &S {
        &self.scheme
    }
}

#[cfg(feature = "compression")]
impl TrcService<crate::adapters::ed25519::Ed25519Scheme, crate::adapters::compression::ZstdCodec> {
    /// Ed25519 signatures with a zstd envelope.
    pub fn ed25519(config: TrcConfig) -> Self {
        let codec = crate::adapters::compression::ZstdCodec::new(config.compression.clone());
        Self::new(crate::adapters::ed25519::Ed25519Scheme, codec, config)
    }
}

impl<S: SignatureScheme, C: PayloadCodec> TrustRootApi for TrcService<S, C> {
    type SigningKey = S::SigningKey;

    fn parse(&self, raw: &[u8], compressed: bool) -> TrcResult<TrcDocument> {
        let limit = self.config.max_payload_bytes;
        if raw.len() > limit {
            warn!(
                size = raw.len(),
                limit,
                "[trc] rejecting oversized TRC payload"
            );
            return Err(TrcError::PayloadTooLarge {
                size: raw.len(),
                limit,
            });
        }
        TrcDocument::from_raw(raw, compressed, &self.codec)
    }

    fn pack(&self, document: &TrcDocument, compress: bool) -> TrcResult<Vec<u8>> {
        document.pack(compress, &self.codec)
    }

    fn fingerprint(&self, document: &TrcDocument) -> TrcResult<Digest256> {
        document.fingerprint()
    }

    fn sign(
        &self,
        document: &mut TrcDocument,
        signer: &str,
        key: &S::SigningKey,
    ) -> TrcResult<()> {
        document.sign(signer, key, &self.scheme)
    }

    fn verify_quorum(
        &self,
        candidate: &TrcDocument,
        reference: &TrcDocument,
    ) -> TrcResult<QuorumTally> {
        QuorumVerifier::new(&self.scheme).verify(candidate, reference)
    }

    fn verify_rotation(
        &self,
        previous: &TrcDocument,
        candidate: &TrcDocument,
    ) -> TrcResult<QuorumTally> {
        RotationValidator::new(&self.scheme).verify_rotation(previous, candidate)
    }
}
