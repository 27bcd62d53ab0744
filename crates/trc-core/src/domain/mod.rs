//! # Domain Layer
//!
//! TRC document model, canonical signing input, and the quorum and rotation
//! decisions. No I/O; signing and compression are reached through ports.

pub mod canonical;
pub mod document;
pub mod entities;
pub mod errors;
pub mod isd_as;
pub mod quorum;
pub mod rotation;
pub mod schema;

#[cfg(test)]
pub mod test_helpers;

pub use canonical::{canonical_bytes, encode_fields, CanonicalEncoder};
pub use document::TrcDocument;
pub use entities::{CoreAsEntry, FieldMap, SignatureBag, TrcValues};
pub use errors::{TrcError, TrcResult};
pub use isd_as::IsdAs;
pub use quorum::{QuorumTally, QuorumVerifier};
pub use rotation::RotationValidator;
pub use schema::{Field, FieldKind, FieldSpec, FieldValue, SCHEMA};
