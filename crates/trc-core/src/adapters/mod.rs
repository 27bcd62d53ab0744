//! # Adapters Module
//!
//! Concrete implementations of the outbound ports.

pub mod compression;
pub mod ed25519;
pub mod isd_as;
