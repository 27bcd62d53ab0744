//! Fuzz target for TRC parsing and canonical encoding.
//!
//! Feeds arbitrary bytes through the document parser and, for anything that
//! parses, through the signing-input encoder and a pack/parse round trip.
//!
//! ## Running
//!
//! ```bash
//! cd crates/trc-core
//! cargo +nightly fuzz run fuzz_trc_parse
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use trc_core::adapters::compression::PassthroughCodec;
use trc_core::{canonical_bytes, TrcDocument};

fuzz_target!(|data: &[u8]| {
    // Parsing must never panic, regardless of input
    let Ok(document) = TrcDocument::from_raw(data, false, &PassthroughCodec) else {
        return;
    };

    // 1. Signing input is deterministic
    let first = canonical_bytes(&document, false).expect("parsed document must encode");
    let second = canonical_bytes(&document, false).expect("parsed document must encode");
    assert_eq!(first, second);

    // 2. Pack -> parse keeps the signing input and signatures
    let packed = document.pack(false, &PassthroughCodec).expect("pack");
    let reparsed = TrcDocument::from_raw(&packed, false, &PassthroughCodec).expect("reparse");
    let again = canonical_bytes(&reparsed, false).expect("reparsed document must encode");
    assert_eq!(first, again);
    assert_eq!(document.signatures(), reparsed.signatures());
});
