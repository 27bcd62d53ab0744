//! # Wire Format Flows
//!
//! Packed text and zstd envelopes through `TrcService`, hand-edited
//! documents, and what the signatures do and do not cover.

#[cfg(test)]
mod tests {
    use crate::fixtures::{not_met, service, CoreSet};
    use serde_json::{json, Value};
    use trc_core::{canonical_bytes, TrcConfig, TrcError, TrcService, TrustRootApi};

    fn edit(packed: &[u8], change: impl FnOnce(&mut Value)) -> Vec<u8> {
        let mut value: Value = serde_json::from_slice(packed).unwrap();
        change(&mut value);
        serde_json::to_vec(&value).unwrap()
    }

    /// Test: a signed document survives the zstd envelope and still verifies
    #[test]
    fn test_compressed_roundtrip_keeps_quorum() {
        let service = service();
        let cores = CoreSet::generate(1, 0x110, 3);
        let old = cores.document(cores.values(1, 2), 1_000, &[]);
        let new = cores.document(cores.values(2, 2), 2_000, &[0, 1]);

        let packed = service.pack(&new, true).unwrap();
        let parsed = service.parse(&packed, true).unwrap();

        assert_eq!(parsed, new);
        let fingerprint = service.fingerprint(&parsed).unwrap();
        assert_eq!(fingerprint, service.fingerprint(&new).unwrap());
        assert!(service.verify_rotation(&old, &parsed).is_ok());
    }

    /// Test: every field value, creation time included, survives pack/parse
    #[test]
    fn test_plain_roundtrip_reproduces_fields() {
        let service = service();
        let cores = CoreSet::generate(7, 0x10, 2);
        let document = trc_core::TrcDocument::from_values(cores.values(4, 1)).unwrap();

        let packed = service.pack(&document, false).unwrap();
        let parsed = service.parse(&packed, false).unwrap();

        assert_eq!(parsed.isd_version(), (7, 4));
        assert_eq!(parsed.creation_time(), document.creation_time());
        assert_eq!(parsed.core_ases(), document.core_ases());
        assert_eq!(parsed.root_rains_key(), document.root_rains_key());
        assert_eq!(parsed, document);
    }

    /// Test: packed text uses base64 for binary fields
    #[test]
    fn test_packed_binary_fields_are_base64() {
        let cores = CoreSet::generate(1, 0x110, 1);
        let document = cores.document(cores.values(1, 1), 1_000, &[0]);

        let packed = service().pack(&document, false).unwrap();
        let value: Value = serde_json::from_slice(&packed).unwrap();

        let rains_key = json!("QkJCQkJCQkJCQkJCQkJCQkJCQkJCQkJCQkJCQkJCQkI=");
        assert_eq!(value["RootRainsKey"], rains_key);
        let signature = value["Signatures"][cores.id(0)].as_str().unwrap();
        assert_eq!(signature.len(), 88);
    }

    /// Test: editing a signed textual field invalidates every signature
    #[test]
    fn test_tampered_description_fails_quorum() {
        let service = service();
        let cores = CoreSet::generate(1, 0x110, 3);
        let old = cores.document(cores.values(1, 2), 1_000, &[]);
        let new = cores.document(cores.values(2, 2), 2_000, &[0, 1, 2]);

        let tampered = edit(&service.pack(&new, false).unwrap(), |v| {
            v["Description"] = json!("forged");
        });
        let parsed = service.parse(&tampered, false).unwrap();

        let err = service.verify_rotation(&old, &parsed).unwrap_err();
        assert_eq!(err, not_met(2, 0));
    }

    /// Test: non-textual map entries are outside the signing input
    ///
    /// Core-AS records and numeric `RootCAs` entries can change without
    /// invalidating signatures. This pins the current encoding.
    #[test]
    fn test_non_textual_entries_are_unsigned() {
        let service = service();
        let cores = CoreSet::generate(1, 0x110, 3);
        let new = cores.document(cores.values(2, 2), 2_000, &[0, 1]);
        let before = canonical_bytes(&new, false).unwrap();

        let edited = edit(&service.pack(&new, false).unwrap(), |v| {
            v["RootCAs"]["serial"] = json!(99);
            v["CoreCAs"][cores.id(2)]["OfflineKeyAlg"] = json!("other");
        });
        let parsed = service.parse(&edited, false).unwrap();

        assert_ne!(parsed, new);
        assert_eq!(canonical_bytes(&parsed, false).unwrap(), before);
    }

    /// Test: hand-written documents may carry integers as digit strings
    #[test]
    fn test_numeric_strings_accepted() {
        let service = service();
        let cores = CoreSet::generate(1, 0x110, 2);
        let document = cores.document(cores.values(3, 1), 1_000, &[]);

        let edited = edit(&service.pack(&document, false).unwrap(), |v| {
            v["Version"] = json!("3");
            v["GracePeriod"] = json!("86400");
        });

        assert_eq!(service.parse(&edited, false).unwrap(), document);
    }

    /// Test: malformed input names the offending field
    #[test]
    fn test_missing_field_named() {
        let service = service();
        let cores = CoreSet::generate(1, 0x110, 2);
        let document = cores.document(cores.values(1, 1), 1_000, &[]);

        let edited = edit(&service.pack(&document, false).unwrap(), |v| {
            v.as_object_mut().unwrap().remove("QuorumOwnTRC");
        });

        assert!(matches!(
            service.parse(&edited, false),
            Err(TrcError::MalformedDocument { ref field, .. }) if field == "QuorumOwnTRC"
        ));
    }

    /// Test: oversized and undecodable envelopes are rejected before parsing
    #[test]
    fn test_envelope_bounds() {
        let cores = CoreSet::generate(1, 0x110, 2);
        let document = cores.document(cores.values(1, 1), 1_000, &[0]);
        let packed = service().pack(&document, true).unwrap();

        let tight = TrcService::ed25519(TrcConfig {
            max_payload_bytes: packed.len() - 1,
            ..TrcConfig::default()
        });
        assert!(matches!(
            tight.parse(&packed, true),
            Err(TrcError::PayloadTooLarge { .. })
        ));

        assert!(matches!(
            service().parse(b"\x28\xb5\x2f\xfd garbage", true),
            Err(TrcError::Compression(_))
        ));
    }

    /// Test: core-AS identifiers parse into typed ISD-AS values
    #[test]
    fn test_core_identifiers_parse() {
        let cores = CoreSet::generate(3, 0x300, 3);
        let document = cores.document(cores.values(1, 2), 1_000, &[]);

        let mut ids = document
            .core_as_identifiers(&trc_core::adapters::isd_as::IsdAsParser)
            .unwrap();
        ids.sort();

        assert_eq!(ids.len(), 3);
        assert!(ids.iter().all(|ia| ia.isd == 3));
        assert_eq!(ids[0].to_string(), "3-ff00:0:300");
    }

    /// Test: the random-key fixture produces distinct signers
    #[test]
    fn test_fixture_keys_distinct() {
        let cores = CoreSet::generate(1, 0x110, 4);
        let publics: std::collections::BTreeSet<String> = cores
            .keys
            .iter()
            .map(|key| hex::encode(key.public_key().as_bytes()))
            .collect();
        assert_eq!(publics.len(), 4);
    }
}
