//! # TRC Document
//!
//! The Trust Root Configuration value type. A document is immutable after
//! construction except for its signature bag, which `sign` extends.
//!
//! Construction paths:
//! - [`TrcDocument::from_raw`]: wire bytes, optionally inside a compression
//!   envelope, decoded field by field against [`SCHEMA`]
//! - [`TrcDocument::from_values`]: explicit values, stamped with the current time
//!
//! Both paths enforce the same document invariants.

use super::canonical::{canonical_bytes, sorted};
use super::entities::{CoreAsEntry, FieldMap, SignatureBag, TrcValues};
use super::errors::{TrcError, TrcResult};
use super::schema::{
    encode_base64, Field, FieldValue, ISDID, QUORUM_CAS, QUORUM_OWN_TRC, SCHEMA, SIGNATURES,
    VERSION,
};
use crate::ports::outbound::{AsIdentifierParser, PayloadCodec, SignatureScheme};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;
use trc_crypto::{sha256, Digest256};

/// Placeholder field name for whole-document failures.
const DOCUMENT: &str = "<document>";

#[derive(Clone, Debug, PartialEq)]
struct TrcBody {
    isd: u16,
    description: String,
    version: u64,
    creation_time: u64,
    core_ases: BTreeMap<String, CoreAsEntry>,
    root_cas: FieldMap,
    pki_logs: FieldMap,
    quorum_eepki: u32,
    root_rains_key: Vec<u8>,
    quorum_own_trc: u32,
    quorum_cas: u32,
    quarantine: bool,
    grace_period: u64,
}

/// A Trust Root Configuration.
///
/// Cloning is cheap: the immutable body is shared, and the signature bag is
/// copied only when one of the clones is signed.
#[derive(Clone, Debug, PartialEq)]
pub struct TrcDocument {
    body: Arc<TrcBody>,
    signatures: SignatureBag,
}

impl TrcDocument {
    // =========================================================================
    // Construction
    // =========================================================================

    /// Parse wire bytes, unwrapping the compression envelope if `compressed`.
    ///
    /// # Errors
    /// * `TrcError::Compression` - the envelope could not be opened
    /// * `TrcError::MalformedDocument` - not a JSON object, or a field is
    ///   missing, mistyped, unknown or violates an invariant
    pub fn from_raw(raw: &[u8], compressed: bool, codec: &dyn PayloadCodec) -> TrcResult<Self> {
        let decompressed;
        let text = if compressed {
            decompressed = codec.decompress(raw)?;
            decompressed.as_slice()
        } else {
            raw
        };

        let value: Value = serde_json::from_slice(text)
            .map_err(|e| TrcError::malformed(DOCUMENT, e.to_string()))?;
        let Value::Object(object) = value else {
            return Err(TrcError::malformed(DOCUMENT, "expected a JSON object"));
        };

        let document = Self::from_wire(&object)?;
        debug!(
            isd = document.isd(),
            version = document.version(),
            signatures = document.signatures.len(),
            "[trc] parsed TRC"
        );
        Ok(document)
    }

    /// Build from an already-parsed wire object.
    ///
    /// Every schema field must be present and no other field is tolerated.
    /// Nothing in `object` is aliased by the result.
    pub fn from_wire(object: &FieldMap) -> TrcResult<Self> {
        if let Some(unknown) = object.keys().find(|key| Field::from_name(key).is_none()) {
            return Err(TrcError::malformed(unknown.as_str(), "unknown field"));
        }

        let mut decoded = DecodedFields::default();
        for spec in SCHEMA.iter() {
            let raw = object
                .get(spec.name)
                .ok_or_else(|| TrcError::malformed(spec.name, "missing"))?;
            decoded.0.insert(spec.field, spec.kind.decode(spec.field, raw)?);
        }

        let core_ases = decoded
            .map(Field::CoreAses)?
            .iter()
            .map(|(as_id, raw)| {
                CoreAsEntry::from_wire(as_id, raw).map(|entry| (as_id.clone(), entry))
            })
            .collect::<TrcResult<BTreeMap<_, _>>>()?;

        let signatures = decoded
            .map(Field::Signatures)?
            .into_iter()
            .map(|(signer, raw)| {
                let bytes = match raw {
                    Value::String(text) => super::schema::decode_base64(&text),
                    other => Err(format!("expected base64 text, got {other}")),
                };
                bytes
                    .map(|bytes| (signer.clone(), bytes))
                    .map_err(|reason| {
                        TrcError::malformed(SIGNATURES, format!("{signer}: {reason}"))
                    })
            })
            .collect::<TrcResult<SignatureBag>>()?;

        let body = TrcBody {
            isd: narrow(Field::Isd, decoded.integer(Field::Isd)?)?,
            description: decoded.text(Field::Description)?,
            version: decoded.integer(Field::Version)?,
            creation_time: decoded.integer(Field::CreationTime)?,
            core_ases,
            root_cas: decoded.map(Field::RootCas)?,
            pki_logs: decoded.map(Field::PkiLogs)?,
            quorum_eepki: narrow(Field::QuorumEepki, decoded.integer(Field::QuorumEepki)?)?,
            root_rains_key: decoded.binary(Field::RootRainsKey)?,
            quorum_own_trc: narrow(Field::QuorumOwnTrc, decoded.integer(Field::QuorumOwnTrc)?)?,
            quorum_cas: narrow(Field::QuorumCas, decoded.integer(Field::QuorumCas)?)?,
            quarantine: decoded.boolean(Field::Quarantine)?,
            grace_period: decoded.integer(Field::GracePeriod)?,
        };

        Self::assemble(body, signatures)
    }

    /// Build from explicit values, stamping `CreationTime` with the current time.
    pub fn from_values(values: TrcValues) -> TrcResult<Self> {
        Self::from_values_at(values, unix_now())
    }

    /// Build from explicit values with a caller-supplied creation time.
    pub fn from_values_at(values: TrcValues, creation_time: u64) -> TrcResult<Self> {
        let body = TrcBody {
            isd: values.isd,
            description: values.description,
            version: values.version,
            creation_time,
            core_ases: values.core_ases,
            root_cas: values.root_cas,
            pki_logs: values.pki_logs,
            quorum_eepki: values.quorum_eepki,
            root_rains_key: values.root_rains_key,
            quorum_own_trc: values.quorum_own_trc,
            quorum_cas: values.quorum_cas,
            quarantine: values.quarantine,
            grace_period: values.grace_period,
        };
        Self::assemble(body, values.signatures.into_iter().collect())
    }

    fn assemble(body: TrcBody, signatures: SignatureBag) -> TrcResult<Self> {
        if body.isd == 0 {
            return Err(TrcError::malformed(ISDID, "must be positive"));
        }
        if body.version == 0 {
            return Err(TrcError::malformed(VERSION, "must be positive"));
        }
        if body.quorum_own_trc == 0 {
            return Err(TrcError::malformed(QUORUM_OWN_TRC, "must be positive"));
        }
        if body.quorum_own_trc as usize > body.core_ases.len() {
            return Err(TrcError::malformed(
                QUORUM_OWN_TRC,
                format!(
                    "{} exceeds the {} core ASes",
                    body.quorum_own_trc,
                    body.core_ases.len()
                ),
            ));
        }
        if body.quorum_cas == 0 {
            return Err(TrcError::malformed(QUORUM_CAS, "must be positive"));
        }

        Ok(Self {
            body: Arc::new(body),
            signatures,
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn isd(&self) -> u16 {
        self.body.isd
    }

    pub fn description(&self) -> &str {
        &self.body.description
    }

    pub fn version(&self) -> u64 {
        self.body.version
    }

    /// Seconds since the Unix epoch.
    pub fn creation_time(&self) -> u64 {
        self.body.creation_time
    }

    pub fn core_ases(&self) -> &BTreeMap<String, CoreAsEntry> {
        &self.body.core_ases
    }

    pub fn core_as(&self, as_id: &str) -> Option<&CoreAsEntry> {
        self.body.core_ases.get(as_id)
    }

    pub fn root_cas(&self) -> &FieldMap {
        &self.body.root_cas
    }

    pub fn pki_logs(&self) -> &FieldMap {
        &self.body.pki_logs
    }

    pub fn quorum_eepki(&self) -> u32 {
        self.body.quorum_eepki
    }

    pub fn root_rains_key(&self) -> &[u8] {
        &self.body.root_rains_key
    }

    /// Core-AS signatures required to approve the next TRC.
    pub fn quorum_own_trc(&self) -> u32 {
        self.body.quorum_own_trc
    }

    pub fn quorum_cas(&self) -> u32 {
        self.body.quorum_cas
    }

    /// Whether this document is an early announcement.
    pub fn quarantine(&self) -> bool {
        self.body.quarantine
    }

    /// Seconds this TRC stays valid once a successor is published.
    pub fn grace_period(&self) -> u64 {
        self.body.grace_period
    }

    pub fn signatures(&self) -> &SignatureBag {
        &self.signatures
    }

    pub fn isd_version(&self) -> (u16, u64) {
        (self.body.isd, self.body.version)
    }

    /// Core-AS keys parsed into typed identifiers. Order is unspecified.
    pub fn core_as_identifiers<P: AsIdentifierParser>(&self, parser: &P) -> TrcResult<Vec<P::Id>> {
        self.body
            .core_ases
            .keys()
            .map(|key| parser.parse_as_identifier(key))
            .collect()
    }

    // =========================================================================
    // Projection and serialization
    // =========================================================================

    /// All schema fields in wire form, binary values as base64 text.
    /// `Signatures` is omitted unless `include_signatures`.
    pub fn project_fields(&self, include_signatures: bool) -> FieldMap {
        SCHEMA
            .iter()
            .filter(|spec| include_signatures || spec.field != Field::Signatures)
            .map(|spec| (spec.name.to_string(), self.project(spec.field)))
            .collect()
    }

    fn project(&self, field: Field) -> Value {
        let body = &self.body;
        match field {
            Field::Isd => Value::from(body.isd),
            Field::Description => Value::from(body.description.as_str()),
            Field::Version => Value::from(body.version),
            Field::CreationTime => Value::from(body.creation_time),
            Field::CoreAses => Value::Object(
                body.core_ases
                    .iter()
                    .map(|(as_id, entry)| (as_id.clone(), entry.to_wire()))
                    .collect(),
            ),
            Field::RootCas => Value::Object(body.root_cas.clone()),
            Field::PkiLogs => Value::Object(body.pki_logs.clone()),
            Field::QuorumEepki => Value::from(body.quorum_eepki),
            Field::RootRainsKey => Value::from(encode_base64(&body.root_rains_key)),
            Field::QuorumOwnTrc => Value::from(body.quorum_own_trc),
            Field::QuorumCas => Value::from(body.quorum_cas),
            Field::Quarantine => Value::from(body.quarantine),
            Field::Signatures => Value::Object(
                self.signatures
                    .iter()
                    .map(|(signer, sig)| (signer.to_string(), Value::from(encode_base64(sig))))
                    .collect(),
            ),
            Field::GracePeriod => Value::from(body.grace_period),
        }
    }

    /// Text with keys sorted at every level and 4-space indentation.
    pub fn to_text(&self, include_signatures: bool) -> TrcResult<String> {
        let mut out = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
        sorted(self.project_fields(include_signatures))
            .serialize(&mut serializer)
            .map_err(|e| TrcError::malformed(DOCUMENT, e.to_string()))?;
        String::from_utf8(out).map_err(|e| TrcError::malformed(DOCUMENT, e.to_string()))
    }

    /// Serialize with signatures, wrapping in the compression envelope if `compress`.
    pub fn pack(&self, compress: bool, codec: &dyn PayloadCodec) -> TrcResult<Vec<u8>> {
        let text = self.to_text(true)?.into_bytes();
        if compress {
            codec.compress(&text)
        } else {
            Ok(text)
        }
    }

    /// SHA-256 over the unsigned signing input.
    pub fn fingerprint(&self) -> TrcResult<Digest256> {
        canonical_bytes(self, false).map(|bytes| sha256(&bytes))
    }

    // =========================================================================
    // Signing
    // =========================================================================

    /// Sign the unsigned signing input and store the result under `signer`,
    /// replacing any earlier signature from the same signer.
    ///
    /// Callers must serialize `sign` calls on one document; clones made
    /// before the call are unaffected.
    pub fn sign<S: SignatureScheme>(
        &mut self,
        signer: impl Into<String>,
        key: &S::SigningKey,
        scheme: &S,
    ) -> TrcResult<()> {
        let signer = signer.into();
        let payload = canonical_bytes(self, false)?;
        let signature = scheme.sign(&payload, key)?;
        debug!(
            isd = self.isd(),
            version = self.version(),
            signer = %signer,
            "[trc] added signature"
        );
        self.signatures.insert(signer, signature);
        Ok(())
    }

    /// Signed copy of this document. The receiver is left untouched.
    pub fn signed<S: SignatureScheme>(
        &self,
        signer: impl Into<String>,
        key: &S::SigningKey,
        scheme: &S,
    ) -> TrcResult<Self> {
        let mut next = self.clone();
        next.sign(signer, key, scheme)?;
        Ok(next)
    }
}

impl fmt::Display for TrcDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.to_text(true).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

// =============================================================================
// HELPERS
// =============================================================================

#[derive(Default)]
struct DecodedFields(BTreeMap<Field, FieldValue>);

impl DecodedFields {
    fn take(&mut self, field: Field) -> TrcResult<FieldValue> {
        self.0
            .remove(&field)
            .ok_or_else(|| TrcError::malformed(field.name(), "missing"))
    }

    fn integer(&mut self, field: Field) -> TrcResult<u64> {
        match self.take(field)? {
            FieldValue::Integer(value) => Ok(value),
            _ => Err(kind_mismatch(field)),
        }
    }

    fn text(&mut self, field: Field) -> TrcResult<String> {
        match self.take(field)? {
            FieldValue::Text(value) => Ok(value),
            _ => Err(kind_mismatch(field)),
        }
    }

    fn binary(&mut self, field: Field) -> TrcResult<Vec<u8>> {
        match self.take(field)? {
            FieldValue::Binary(value) => Ok(value),
            _ => Err(kind_mismatch(field)),
        }
    }

    fn boolean(&mut self, field: Field) -> TrcResult<bool> {
        match self.take(field)? {
            FieldValue::Boolean(value) => Ok(value),
            _ => Err(kind_mismatch(field)),
        }
    }

    fn map(&mut self, field: Field) -> TrcResult<FieldMap> {
        match self.take(field)? {
            FieldValue::Map(value) => Ok(value),
            _ => Err(kind_mismatch(field)),
        }
    }
}

fn kind_mismatch(field: Field) -> TrcError {
    TrcError::malformed(field.name(), format!("expected {:?}", field.kind()))
}

fn narrow<T: TryFrom<u64>>(field: Field, value: u64) -> TrcResult<T> {
    T::try_from(value)
        .map_err(|_| TrcError::malformed(field.name(), format!("{value} out of range")))
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default()
}
