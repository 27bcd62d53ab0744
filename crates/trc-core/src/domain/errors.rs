//! # TRC Errors
//!
//! Error types for document parsing, signing-input construction, quorum
//! verification and rotation validation.

use thiserror::Error;

/// Errors that can occur while handling a Trust Root Configuration.
///
/// Rotation checks produce exactly one of `IsdMismatch`, `VersionMismatch`,
/// `TimestampRegression`, `QuarantineViolation` or `QuorumNotMet`; they are
/// never combined.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TrcError {
    /// A field is missing, mistyped, unknown or violates a document invariant
    #[error("Malformed TRC field {field}: {reason}")]
    MalformedDocument { field: String, reason: String },

    /// A projected field cannot be interpreted as its declared schema type
    #[error("Cannot encode field {field} for signing: {reason}")]
    CanonicalEncoding { field: String, reason: String },

    /// The external sign/verify capability faulted
    #[error("Signature primitive failed: {0}")]
    SignaturePrimitive(String),

    /// Fewer valid core-AS signatures than the reference TRC requires
    #[error("Quorum not met: {achieved} valid signatures, {required} required")]
    QuorumNotMet { required: u32, achieved: usize },

    /// Candidate governs a different isolation domain
    #[error("ISD mismatch: previous TRC is for ISD {previous}, candidate for ISD {candidate}")]
    IsdMismatch { previous: u16, candidate: u16 },

    /// Candidate version is not exactly one above its predecessor
    #[error("Version mismatch: expected {expected}, got {actual}")]
    VersionMismatch { expected: u64, actual: u64 },

    /// Candidate was created before its predecessor
    #[error("Timestamp regression: candidate created at {candidate}, predecessor at {previous}")]
    TimestampRegression { previous: u64, candidate: u64 },

    /// Either side of the rotation is an early announcement
    #[error("Quarantined TRC in rotation (previous: {previous}, candidate: {candidate})")]
    QuarantineViolation { previous: bool, candidate: bool },

    /// An AS identifier string could not be parsed
    #[error("Invalid AS identifier {value:?}: {reason}")]
    InvalidAsIdentifier { value: String, reason: String },

    /// The compression envelope could not be produced or opened
    #[error("Compression failed: {0}")]
    Compression(String),

    /// Raw input exceeds the configured size bound
    #[error("Payload too large: {size} bytes exceeds limit of {limit}")]
    PayloadTooLarge { size: usize, limit: usize },
}

impl TrcError {
    pub(crate) fn malformed(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedDocument {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn canonical(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::CanonicalEncoding {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error came out of rotation or quorum checking.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::QuorumNotMet { .. }
                | Self::IsdMismatch { .. }
                | Self::VersionMismatch { .. }
                | Self::TimestampRegression { .. }
                | Self::QuarantineViolation { .. }
        )
    }
}

/// Result type for TRC operations
pub type TrcResult<T> = Result<T, TrcError>;
