//! # Trust Root Configuration Core
//!
//! Parses, signs and verifies Trust Root Configurations (TRCs): the signed
//! trust-anchor bundle of one isolation domain.
//!
//! ## Architecture
//!
//! This crate follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): document model, canonical signing input,
//!   quorum and rotation decisions; no I/O
//! - **Ports Layer** (`ports/`): the `TrustRootApi` inbound port and the
//!   signature, compression and identifier outbound ports
//! - **Adapters** (`adapters/`): Ed25519, zstd and ISD-AS implementations
//! - **Service Layer** (`service.rs`): wires domain logic to ports
//!
//! ## Data Flow
//!
//! ```text
//! raw bytes ──parse──→ TrcDocument ──canonical_bytes──→ sign / verify
//!                                                           │
//!                               QuorumVerifier ←────────────┘
//!                                     │
//!                            RotationValidator
//! ```
//!
//! ## Security Notes
//!
//! - Only textual entries of map fields are covered by signatures; see
//!   [`domain::canonical`]
//! - Signatures from non-core ASes are tolerated and never counted

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use domain::canonical::{canonical_bytes, encode_fields, CanonicalEncoder};
pub use domain::document::TrcDocument;
pub use domain::entities::{CoreAsEntry, FieldMap, SignatureBag, TrcValues};
pub use domain::errors::{TrcError, TrcResult};
pub use domain::isd_as::IsdAs;
pub use domain::quorum::{QuorumTally, QuorumVerifier};
pub use domain::rotation::RotationValidator;
pub use ports::inbound::TrustRootApi;
pub use ports::outbound::{AsIdentifierParser, PayloadCodec, SignatureScheme};
pub use service::{TrcConfig, TrcService};
