//! # Ports Layer
//!
//! Trait definitions for the hexagonal architecture.
//! - **Inbound (Driving)**: API that relying parties and signers call
//! - **Outbound (Driven)**: Collaborators this crate needs (signature
//!   primitive, compression envelope, AS identifier parsing)

pub mod inbound;
pub mod outbound;
