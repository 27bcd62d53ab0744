//! # Inbound Ports (Driving Ports / API)
//!
//! The public API of the TRC subsystem.

use crate::domain::document::TrcDocument;
use crate::domain::errors::TrcResult;
use crate::domain::quorum::QuorumTally;
use trc_crypto::Digest256;

/// Primary Trust Root Configuration API.
///
/// Implementations must be thread-safe (`Send + Sync`). Verification calls
/// are read-only and may run concurrently on independent documents.
pub trait TrustRootApi: Send + Sync {
    /// Private key type accepted by [`TrustRootApi::sign`].
    type SigningKey: ?Sized;

    // =========================================================================
    // Wire format
    // =========================================================================

    /// Parse raw TRC bytes, opening the compression envelope if `compressed`.
    ///
    /// # Errors
    /// * `TrcError::PayloadTooLarge` - input exceeds the configured bound
    /// * `TrcError::Compression` - the envelope could not be opened
    /// * `TrcError::MalformedDocument` - a field is missing, mistyped or invalid
    fn parse(&self, raw: &[u8], compressed: bool) -> TrcResult<TrcDocument>;

    /// Serialize with signatures, optionally compressed.
    fn pack(&self, document: &TrcDocument, compress: bool) -> TrcResult<Vec<u8>>;

    /// SHA-256 of the unsigned signing input.
    fn fingerprint(&self, document: &TrcDocument) -> TrcResult<Digest256>;

    // =========================================================================
    // Signing and verification
    // =========================================================================

    /// Add or replace the signature of `signer` on `document`.
    fn sign(
        &self,
        document: &mut TrcDocument,
        signer: &str,
        key: &Self::SigningKey,
    ) -> TrcResult<()>;

    /// Check `candidate` signatures against the core ASes of `reference`.
    ///
    /// # Errors
    /// * `TrcError::QuorumNotMet` - too few valid core-AS signatures
    fn verify_quorum(
        &self,
        candidate: &TrcDocument,
        reference: &TrcDocument,
    ) -> TrcResult<QuorumTally>;

    /// Accept `candidate` as the successor of `previous`.
    ///
    /// # Errors
    /// Exactly one of `IsdMismatch`, `VersionMismatch`, `TimestampRegression`,
    /// `QuarantineViolation` or `QuorumNotMet`, in that order of precedence.
    fn verify_rotation(
        &self,
        previous: &TrcDocument,
        candidate: &TrcDocument,
    ) -> TrcResult<QuorumTally>;
}
