//! # Canonical Signing Input
//!
//! The exact bytes a core AS signs and a relying party re-derives to verify.
//! Any divergence here silently invalidates every signature, so the encoding
//! is pure and fully determined by the projected field values:
//!
//! 1. Start from [`TrcDocument::project_fields`].
//! 2. `Text` fields become base64 of their UTF-8 bytes.
//! 3. `Map` fields other than `Signatures` keep only their textual entries,
//!    each base64-encoded; every non-textual entry is dropped.
//! 4. Serialize with lexicographically sorted keys at every level, no
//!    whitespace, and every non-ASCII character written as a `\uXXXX` escape.
//!
//! Key order is imposed here rather than inherited from `serde_json::Map`,
//! whose iteration order depends on the `preserve_order` feature.
//!
//! ## Known weakness
//!
//! Step 3 means non-textual map entries are not covered by signatures. All
//! `CoreCAs` records are objects, so core-AS key material is never part of
//! the signed payload, and neither are numeric or boolean entries of
//! `RootCAs` and `PKILogs`. Deployed TRCs depend on this exact encoding;
//! confirm the exposure is acceptable before trusting it in a new deployment.

use super::document::TrcDocument;
use super::entities::FieldMap;
use super::errors::{TrcError, TrcResult};
use super::schema::{encode_base64, Field, FieldKind};
use serde::Serialize;
use serde_json::ser::Formatter;
use serde_json::Value;
use std::io;

/// Canonical signing-input encoder.
#[derive(Debug, Clone, Copy, Default)]
pub struct CanonicalEncoder;

impl CanonicalEncoder {
    pub fn new() -> Self {
        Self
    }

    /// Signing input for `document`. See [`canonical_bytes`].
    pub fn encode(&self, document: &TrcDocument, include_signatures: bool) -> TrcResult<Vec<u8>> {
        canonical_bytes(document, include_signatures)
    }
}

/// Signing input for `document`; signatures are left out unless requested.
pub fn canonical_bytes(document: &TrcDocument, include_signatures: bool) -> TrcResult<Vec<u8>> {
    encode_fields(document.project_fields(include_signatures))
}

/// Encode a projected field map.
///
/// # Errors
/// * `TrcError::CanonicalEncoding` - a key is not a schema field, or a value
///   does not have its field's declared type
pub fn encode_fields(fields: FieldMap) -> TrcResult<Vec<u8>> {
    let mut encoded = FieldMap::new();

    for (name, value) in fields {
        let field = Field::from_name(&name)
            .ok_or_else(|| TrcError::canonical(name.as_str(), "not a schema field"))?;
        let kind = field.kind();
        if !kind.accepts(&value) {
            return Err(TrcError::canonical(
                name.as_str(),
                format!("expected {kind:?}, got {value}"),
            ));
        }

        let value = match (kind, value) {
            (FieldKind::Text, Value::String(text)) => Value::String(encode_base64(text.as_bytes())),
            (FieldKind::Map, Value::Object(map)) if field != Field::Signatures => {
                Value::Object(encode_textual_entries(map))
            }
            (_, value) => value,
        };
        encoded.insert(name, value);
    }

    let mut out = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, AsciiCompactFormatter);
    sorted(encoded)
        .serialize(&mut serializer)
        .map_err(|e| TrcError::canonical("<document>", e.to_string()))?;
    Ok(out)
}

/// `fields` as an object whose keys are sorted at every nesting level.
pub(crate) fn sorted(fields: FieldMap) -> Value {
    let mut value = Value::Object(fields);
    value.sort_all_objects();
    value
}

/// Compact JSON writer that escapes everything outside ASCII.
struct AsciiCompactFormatter;

impl Formatter for AsciiCompactFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (index, ch) in fragment.char_indices() {
            if ch.is_ascii() {
                continue;
            }
            writer.write_all(fragment[start..index].as_bytes())?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units).iter() {
                write!(writer, "\\u{unit:04x}")?;
            }
            start = index + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}

fn encode_textual_entries(map: FieldMap) -> FieldMap {
    map.into_iter()
        .filter_map(|(key, value)| match value {
            Value::String(text) => Some((key, Value::String(encode_base64(text.as_bytes())))),
            _ => None,
        })
        .collect()
}
