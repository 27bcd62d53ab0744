//! Shared fixtures for unit tests.

use super::document::TrcDocument;
use super::entities::{CoreAsEntry, FieldMap, TrcValues};
use crate::adapters::ed25519::{Ed25519Scheme, ED25519_ALG};
use serde_json::json;
use trc_crypto::Ed25519KeyPair;

/// Identifier of the `index`-th core AS in fixtures.
pub fn core_id(index: usize) -> String {
    format!("1-ff00:0:{:x}", 0x110 + index)
}

/// Deterministic key pairs, one per core AS.
pub fn core_keys(count: usize) -> Vec<Ed25519KeyPair> {
    (0..count)
        .map(|i| Ed25519KeyPair::from_seed([i as u8 + 1; 32]))
        .collect()
}

fn object(value: serde_json::Value) -> FieldMap {
    value.as_object().cloned().unwrap_or_default()
}

/// Values for ISD 1 whose core ASes are `core_id(i)` holding `keys[i]`.
pub fn values_for(keys: &[Ed25519KeyPair], version: u64, quorum_own_trc: u32) -> TrcValues {
    let core_ases = keys
        .iter()
        .enumerate()
        .map(|(i, key)| {
            let public = key.public_key().as_bytes().to_vec();
            (core_id(i), CoreAsEntry::new(ED25519_ALG, public.clone(), ED25519_ALG, public))
        })
        .collect();

    TrcValues {
        isd: 1,
        description: format!("ISD 1 trust root v{version}"),
        version,
        core_ases,
        root_cas: object(json!({"CA1-1": "-----BEGIN CERTIFICATE-----", "CA1-2": {"Serial": 7}})),
        pki_logs: object(json!({"Log1": "127.0.0.1:8080"})),
        quorum_eepki: 1,
        root_rains_key: vec![7u8; 32],
        quorum_own_trc,
        quorum_cas: 1,
        grace_period: 3_600,
        quarantine: false,
        signatures: Default::default(),
    }
}

/// Document built from `values` and signed by `keys[i]` for each listed `i`.
pub fn signed_document(
    values: &TrcValues,
    creation_time: u64,
    keys: &[Ed25519KeyPair],
    signers: &[usize],
) -> TrcDocument {
    let mut document = TrcDocument::from_values_at(values.clone(), creation_time).unwrap();
    for &i in signers {
        document.sign(core_id(i), &keys[i], &Ed25519Scheme).unwrap();
    }
    document
}

/// Three core ASes, quorum of two, unsigned.
pub fn sample_values() -> TrcValues {
    values_for(&core_keys(3), 1, 2)
}

/// `sample_values` with a fixed creation time and one signature.
pub fn sample_document() -> TrcDocument {
    let keys = core_keys(3);
    signed_document(&sample_values(), 1_700_000_000, &keys, &[0])
}
