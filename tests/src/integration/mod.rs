//! # Integration Tests
//!
//! Flows through `TrcService` with real keys:
//!
//! - `rotation`: successor acceptance, rotation chains and concurrent checks
//! - `wire`: packed and compressed round trips, tampering, size bounds

pub mod rotation;
pub mod wire;
