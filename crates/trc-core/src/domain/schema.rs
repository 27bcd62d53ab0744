//! # TRC Field Schema
//!
//! The fixed, exhaustive field table of a TRC document. Every wire field has
//! one entry naming its semantic type; parsing, projection and canonical
//! encoding all walk this table instead of branching on runtime types.

use super::errors::{TrcError, TrcResult};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde_json::Value;

// =============================================================================
// WIRE NAMES
// =============================================================================

pub const ISDID: &str = "ISDID";
pub const DESCRIPTION: &str = "Description";
pub const VERSION: &str = "Version";
pub const CREATION_TIME: &str = "CreationTime";
pub const CORE_ASES: &str = "CoreCAs";
pub const ROOT_CAS: &str = "RootCAs";
pub const PKI_LOGS: &str = "PKILogs";
pub const QUORUM_EEPKI: &str = "QuorumEEPKI";
pub const ROOT_RAINS_KEY: &str = "RootRainsKey";
pub const QUORUM_OWN_TRC: &str = "QuorumOwnTRC";
pub const QUORUM_CAS: &str = "QuorumCAs";
pub const QUARANTINE: &str = "Quarantine";
pub const SIGNATURES: &str = "Signatures";
pub const GRACE_PERIOD: &str = "GracePeriod";

/// Semantic type of a schema field. Each kind owns its wire codec.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Unsigned integer; JSON number or strictly numeric string
    Integer,
    /// UTF-8 text
    Text,
    /// Raw bytes carried as standard base64 text
    BinaryBase64,
    /// JSON boolean
    Boolean,
    /// JSON object keyed by string
    Map,
}

/// A TRC schema field. Discriminants index into [`SCHEMA`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Isd,
    Description,
    Version,
    CreationTime,
    CoreAses,
    RootCas,
    PkiLogs,
    QuorumEepki,
    RootRainsKey,
    QuorumOwnTrc,
    QuorumCas,
    Quarantine,
    Signatures,
    GracePeriod,
}

/// One schema table entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    pub field: Field,
    pub name: &'static str,
    pub kind: FieldKind,
}

const fn entry(field: Field, name: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec { field, name, kind }
}

/// The TRC schema, in wire order. Never mutated.
pub static SCHEMA: [FieldSpec; 14] = [
    entry(Field::Isd, ISDID, FieldKind::Integer),
    entry(Field::Description, DESCRIPTION, FieldKind::Text),
    entry(Field::Version, VERSION, FieldKind::Integer),
    entry(Field::CreationTime, CREATION_TIME, FieldKind::Integer),
    entry(Field::CoreAses, CORE_ASES, FieldKind::Map),
    entry(Field::RootCas, ROOT_CAS, FieldKind::Map),
    entry(Field::PkiLogs, PKI_LOGS, FieldKind::Map),
    entry(Field::QuorumEepki, QUORUM_EEPKI, FieldKind::Integer),
    entry(Field::RootRainsKey, ROOT_RAINS_KEY, FieldKind::BinaryBase64),
    entry(Field::QuorumOwnTrc, QUORUM_OWN_TRC, FieldKind::Integer),
    entry(Field::QuorumCas, QUORUM_CAS, FieldKind::Integer),
    entry(Field::Quarantine, QUARANTINE, FieldKind::Boolean),
    entry(Field::Signatures, SIGNATURES, FieldKind::Map),
    entry(Field::GracePeriod, GRACE_PERIOD, FieldKind::Integer),
];

impl Field {
    /// This field's schema table entry.
    pub fn spec(self) -> &'static FieldSpec {
        &SCHEMA[self as usize]
    }

    /// Wire name.
    pub fn name(self) -> &'static str {
        self.spec().name
    }

    /// Declared semantic type.
    pub fn kind(self) -> FieldKind {
        self.spec().kind
    }

    /// Look a field up by wire name.
    pub fn from_name(name: &str) -> Option<Field> {
        SCHEMA
            .iter()
            .find(|spec| spec.name == name)
            .map(|spec| spec.field)
    }
}

// =============================================================================
// FIELD CODECS
// =============================================================================

/// A wire value decoded according to its field kind.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Integer(u64),
    Text(String),
    Binary(Vec<u8>),
    Boolean(bool),
    Map(serde_json::Map<String, Value>),
}

impl FieldKind {
    /// Decode a raw wire value. Map values are deep-copied.
    pub fn decode(self, field: Field, raw: &Value) -> TrcResult<FieldValue> {
        match self {
            FieldKind::Integer => parse_strict_integer(raw)
                .map(FieldValue::Integer)
                .ok_or_else(|| mismatch(field, "integer", raw)),
            FieldKind::Text => match raw {
                Value::String(text) => Ok(FieldValue::Text(text.clone())),
                other => Err(mismatch(field, "text", other)),
            },
            FieldKind::BinaryBase64 => match raw {
                Value::String(text) => decode_base64(text)
                    .map(FieldValue::Binary)
                    .map_err(|reason| TrcError::malformed(field.name(), reason)),
                other => Err(mismatch(field, "base64 text", other)),
            },
            FieldKind::Boolean => match raw {
                Value::Bool(flag) => Ok(FieldValue::Boolean(*flag)),
                other => Err(mismatch(field, "boolean", other)),
            },
            FieldKind::Map => match raw {
                Value::Object(map) => Ok(FieldValue::Map(map.clone())),
                other => Err(mismatch(field, "map", other)),
            },
        }
    }

    /// Whether a projected value has this kind's runtime shape.
    pub fn accepts(self, value: &Value) -> bool {
        match self {
            FieldKind::Integer => value.is_u64(),
            FieldKind::Text | FieldKind::BinaryBase64 => value.is_string(),
            FieldKind::Boolean => value.is_boolean(),
            FieldKind::Map => value.is_object(),
        }
    }
}

fn mismatch(field: Field, expected: &str, raw: &Value) -> TrcError {
    TrcError::malformed(field.name(), format!("expected {expected}, got {raw}"))
}

/// Integers accept JSON unsigned numbers or strings of ASCII digits.
fn parse_strict_integer(raw: &Value) -> Option<u64> {
    match raw {
        Value::Number(number) => number.as_u64(),
        Value::String(text) if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) => {
            text.parse().ok()
        }
        _ => None,
    }
}

pub(crate) fn decode_base64(text: &str) -> Result<Vec<u8>, String> {
    BASE64
        .decode(text.as_bytes())
        .map_err(|e| format!("invalid base64: {e}"))
}

pub(crate) fn encode_base64(bytes: impl AsRef<[u8]>) -> String {
    BASE64.encode(bytes)
}
