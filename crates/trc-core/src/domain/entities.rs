//! # Domain Entities
//!
//! Value types carried inside a TRC document: core-AS key records, the
//! copy-on-write signature bag, and the explicit field list used to build a
//! fresh document.

use super::errors::{TrcError, TrcResult};
use super::schema::{encode_base64, CORE_ASES};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::{base64::Base64, serde_as};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Free-form map field (`RootCAs`, `PKILogs`) as carried on the wire.
pub type FieldMap = serde_json::Map<String, Value>;

pub const ONLINE_KEY_ALG: &str = "OnlineKeyAlg";
pub const ONLINE_KEY: &str = "OnlineKey";
pub const OFFLINE_KEY_ALG: &str = "OfflineKeyAlg";
pub const OFFLINE_KEY: &str = "OfflineKey";

// =============================================================================
// CORE AS RECORDS
// =============================================================================

/// Key material of one core AS.
///
/// Both keys travel as base64 text and are held as raw bytes.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CoreAsEntry {
    #[serde(rename = "OnlineKeyAlg")]
    pub online_key_alg: String,
    #[serde_as(as = "Base64")]
    #[serde(rename = "OnlineKey")]
    pub online_key: Vec<u8>,
    #[serde(rename = "OfflineKeyAlg")]
    pub offline_key_alg: String,
    #[serde_as(as = "Base64")]
    #[serde(rename = "OfflineKey")]
    pub offline_key: Vec<u8>,
}

impl CoreAsEntry {
    /// Create a record from its four components.
    pub fn new(
        online_key_alg: impl Into<String>,
        online_key: Vec<u8>,
        offline_key_alg: impl Into<String>,
        offline_key: Vec<u8>,
    ) -> Self {
        Self {
            online_key_alg: online_key_alg.into(),
            online_key,
            offline_key_alg: offline_key_alg.into(),
            offline_key,
        }
    }

    /// Decode one `CoreCAs` record. Missing or extra record fields fail.
    pub fn from_wire(as_id: &str, raw: &Value) -> TrcResult<Self> {
        Self::deserialize(raw).map_err(|e| TrcError::malformed(CORE_ASES, format!("{as_id}: {e}")))
    }

    /// Wire form with both keys as base64 text.
    pub fn to_wire(&self) -> Value {
        let fields = [
            (ONLINE_KEY_ALG, Value::from(self.online_key_alg.as_str())),
            (ONLINE_KEY, Value::from(encode_base64(&self.online_key))),
            (OFFLINE_KEY_ALG, Value::from(self.offline_key_alg.as_str())),
            (OFFLINE_KEY, Value::from(encode_base64(&self.offline_key))),
        ];
        let record = fields
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect();
        Value::Object(record)
    }
}

// =============================================================================
// SIGNATURE BAG
// =============================================================================

/// Signatures keyed by signer AS identifier.
///
/// Storage is shared between clones until one of them is written to, so a
/// signed variant never aliases the bag of the document it came from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignatureBag(Arc<BTreeMap<String, Vec<u8>>>);

impl SignatureBag {
    /// Create an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Signature stored for `signer`.
    pub fn get(&self, signer: &str) -> Option<&[u8]> {
        self.0.get(signer).map(Vec::as_slice)
    }

    pub fn contains(&self, signer: &str) -> bool {
        self.0.contains_key(signer)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Signer identifiers in lexicographic order.
    pub fn signers(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.0
            .iter()
            .map(|(signer, sig)| (signer.as_str(), sig.as_slice()))
    }

    /// Add or overwrite one signature, copying shared storage first.
    pub(crate) fn insert(&mut self, signer: String, signature: Vec<u8>) -> Option<Vec<u8>> {
        Arc::make_mut(&mut self.0).insert(signer, signature)
    }

    /// Whether two bags currently share storage.
    pub fn shares_storage_with(&self, other: &SignatureBag) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl FromIterator<(String, Vec<u8>)> for SignatureBag {
    fn from_iter<I: IntoIterator<Item = (String, Vec<u8>)>>(iter: I) -> Self {
        Self(Arc::new(iter.into_iter().collect()))
    }
}

// =============================================================================
// EXPLICIT FIELD VALUES
// =============================================================================

/// Every schema field except `CreationTime`, which is stamped at construction.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrcValues {
    pub isd: u16,
    pub description: String,
    pub version: u64,
    pub core_ases: BTreeMap<String, CoreAsEntry>,
    pub root_cas: FieldMap,
    pub pki_logs: FieldMap,
    pub quorum_eepki: u32,
    pub root_rains_key: Vec<u8>,
    pub quorum_own_trc: u32,
    pub quorum_cas: u32,
    pub grace_period: u64,
    pub quarantine: bool,
    pub signatures: BTreeMap<String, Vec<u8>>,
}
