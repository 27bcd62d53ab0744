//! # Test Fixtures
//!
//! Core-AS key sets backed by freshly generated Ed25519 keys.

use std::collections::BTreeMap;
use trc_core::adapters::compression::{CompressionConfig, ZstdCodec};
use trc_core::adapters::ed25519::{Ed25519Scheme, ED25519_ALG};
use trc_core::{CoreAsEntry, FieldMap, TrcConfig, TrcDocument, TrcError, TrcService, TrcValues};
use trc_crypto::Ed25519KeyPair;

/// Service used across the suite.
pub type TestService = TrcService<Ed25519Scheme, ZstdCodec>;

pub fn service() -> TestService {
    TrcService::ed25519(TrcConfig {
        compression: CompressionConfig {
            level: 1,
            ..CompressionConfig::default()
        },
        ..TrcConfig::default()
    })
}

/// The quorum failure reported for `achieved` of `required` signatures.
pub fn not_met(required: u32, achieved: usize) -> TrcError {
    TrcError::QuorumNotMet { required, achieved }
}

/// A set of core ASes and their online keys.
pub struct CoreSet {
    pub isd: u16,
    pub ids: Vec<String>,
    pub keys: Vec<Ed25519KeyPair>,
}

impl CoreSet {
    /// `count` core ASes of ISD `isd`, numbered from `first_as`.
    pub fn generate(isd: u16, first_as: u64, count: usize) -> Self {
        let ids = (0..count as u64)
            .map(|i| format!("{isd}-ff00:0:{:x}", first_as + i))
            .collect();
        let keys = (0..count).map(|_| Ed25519KeyPair::generate()).collect();
        Self { isd, ids, keys }
    }

    pub fn id(&self, index: usize) -> &str {
        &self.ids[index]
    }

    pub fn core_ases(&self) -> BTreeMap<String, CoreAsEntry> {
        self.ids
            .iter()
            .zip(&self.keys)
            .map(|(id, key)| {
                let public = key.public_key().as_bytes().to_vec();
                (id.clone(), CoreAsEntry::new(ED25519_ALG, public.clone(), ED25519_ALG, public))
            })
            .collect()
    }

    pub fn values(&self, version: u64, quorum_own_trc: u32) -> TrcValues {
        let mut root_cas = FieldMap::new();
        let name = format!("{}-ca", self.isd);
        root_cas.insert(name, "-----BEGIN CERTIFICATE-----".into());

        TrcValues {
            isd: self.isd,
            description: format!("ISD {} TRC version {version}", self.isd),
            version,
            core_ases: self.core_ases(),
            root_cas,
            pki_logs: FieldMap::new(),
            quorum_eepki: 1,
            root_rains_key: vec![0x42; 32],
            quorum_own_trc,
            quorum_cas: 1,
            grace_period: 86_400,
            quarantine: false,
            signatures: BTreeMap::new(),
        }
    }

    /// Sign `document` with the keys at `signers`.
    pub fn sign(&self, document: &mut TrcDocument, signers: &[usize]) {
        for &i in signers {
            document
                .sign(self.id(i), &self.keys[i], &Ed25519Scheme)
                .expect("ed25519 signing is infallible");
        }
    }

    /// Document built from `values`, signed by `signers`.
    pub fn document(
        &self,
        values: TrcValues,
        creation_time: u64,
        signers: &[usize],
    ) -> TrcDocument {
        let mut document = TrcDocument::from_values_at(values, creation_time)
            .expect("fixture values are valid");
        self.sign(&mut document, signers);
        document
    }
}
