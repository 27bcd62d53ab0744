//! # TRC Test Suite
//!
//! Unified test crate exercising `trc-core` end to end with real Ed25519
//! keys and zstd envelopes.
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── src/
//! │   ├── fixtures.rs      # Core-AS key sets and document builders
//! │   └── integration/     # Rotation chains, wire format, concurrency
//! └── benches/             # Criterion benchmarks
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p trc-tests
//! cargo test -p trc-tests integration::rotation
//! cargo bench -p trc-tests
//! ```

pub mod fixtures;
pub mod integration;
