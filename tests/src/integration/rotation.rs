//! # Rotation Flows
//!
//! Successor acceptance through `TrcService::verify_rotation`, including the
//! reference scenario of one predecessor and four candidates, multi-step
//! rotation chains with core-key replacement, and read-only verification
//! shared across threads.

#[cfg(test)]
mod tests {
    use crate::fixtures::{not_met, service, CoreSet};
    use std::collections::BTreeSet;
    use trc_core::{QuorumTally, TrcDocument, TrcError, TrcResult, TrustRootApi};

    const A: usize = 0;
    const B: usize = 1;
    const C: usize = 2;

    // =========================================================================
    // REFERENCE SCENARIO
    // =========================================================================

    /// Predecessor: ISD 1, version 1, quorum 2, core ASes A, B, C.
    fn predecessor(cores: &CoreSet) -> TrcDocument {
        cores.document(cores.values(1, 2), 1_000, &[])
    }

    fn rotate(old: &TrcDocument, new: &TrcDocument) -> TrcResult<QuorumTally> {
        service().verify_rotation(old, new)
    }

    /// Test: version 2 signed by A and B is accepted
    #[test]
    fn test_successor_with_quorum_accepted() {
        let cores = CoreSet::generate(1, 0x110, 3);
        let new1 = cores.document(cores.values(2, 2), 2_000, &[A, B]);

        let tally = rotate(&predecessor(&cores), &new1).unwrap();

        let expected = BTreeSet::from([cores.id(A).to_string(), cores.id(B).to_string()]);
        assert_eq!(tally.valid, expected);
    }

    /// Test: version 2 signed only by A fails the quorum
    #[test]
    fn test_successor_below_quorum_rejected() {
        let cores = CoreSet::generate(1, 0x110, 3);
        let new2 = cores.document(cores.values(2, 2), 2_000, &[A]);

        let err = rotate(&predecessor(&cores), &new2).unwrap_err();

        assert_eq!(err, not_met(2, 1));
    }

    /// Test: version 3 skips a version even with every signature
    #[test]
    fn test_skipped_version_rejected() {
        let cores = CoreSet::generate(1, 0x110, 3);
        let new3 = cores.document(cores.values(3, 2), 2_000, &[A, B, C]);

        let err = rotate(&predecessor(&cores), &new3).unwrap_err();

        let expected = TrcError::VersionMismatch {
            expected: 2,
            actual: 3,
        };
        assert_eq!(err, expected);
    }

    /// Test: version 2 created before its predecessor
    #[test]
    fn test_backdated_successor_rejected() {
        let cores = CoreSet::generate(1, 0x110, 3);
        let new4 = cores.document(cores.values(2, 2), 999, &[A, B, C]);

        let err = rotate(&predecessor(&cores), &new4).unwrap_err();

        let expected = TrcError::TimestampRegression {
            previous: 1_000,
            candidate: 999,
        };
        assert_eq!(err, expected);
    }

    /// Test: replay of the predecessor itself is not a successor
    #[test]
    fn test_replay_rejected() {
        let cores = CoreSet::generate(1, 0x110, 3);
        let old = cores.document(cores.values(1, 2), 1_000, &[A, B, C]);

        let err = rotate(&old, &old).unwrap_err();

        assert!(matches!(err, TrcError::VersionMismatch { expected: 2, actual: 1 }));
    }

    // =========================================================================
    // FOREIGN SIGNERS
    // =========================================================================

    /// Test: signatures from another ISD are tolerated but never counted
    #[test]
    fn test_foreign_signatures_tolerated() {
        let cores = CoreSet::generate(1, 0x110, 3);
        let strangers = CoreSet::generate(2, 0x210, 2);
        let mut candidate = cores.document(cores.values(2, 2), 2_000, &[A, B]);
        strangers.sign(&mut candidate, &[0, 1]);

        let tally = rotate(&predecessor(&cores), &candidate).unwrap();

        assert_eq!(tally.achieved(), 2);
        assert_eq!(tally.foreign.len(), 2);
        assert!(tally.rejected.is_empty());
    }

    /// Test: a signer listed under a core identifier but using a stranger's key
    #[test]
    fn test_impersonated_core_signature_rejected() {
        let cores = CoreSet::generate(1, 0x110, 3);
        let impostor = CoreSet::generate(1, 0x110, 3);
        let mut candidate = cores.document(cores.values(2, 2), 2_000, &[A]);
        impostor.sign(&mut candidate, &[B]);

        let err = rotate(&predecessor(&cores), &candidate).unwrap_err();

        assert_eq!(err, not_met(2, 1));
    }

    // =========================================================================
    // ROTATION CHAINS
    // =========================================================================

    /// Test: core keys are replaced across a chain of three TRCs
    ///
    /// Version 2 introduces a new core set and is approved by the old one;
    /// version 3 must then be approved by the new set.
    #[test]
    fn test_core_key_rollover_chain() {
        let service = service();
        let old_cores = CoreSet::generate(1, 0x110, 3);
        let new_cores = CoreSet::generate(1, 0x120, 4);

        let v1 = old_cores.document(old_cores.values(1, 2), 1_000, &[]);
        let v2 = old_cores.document(new_cores.values(2, 3), 2_000, &[A, C]);
        service.verify_rotation(&v1, &v2).unwrap();

        let mut v3 = TrcDocument::from_values_at(new_cores.values(3, 3), 3_000).unwrap();
        old_cores.sign(&mut v3, &[A, B, C]);
        let err = service.verify_rotation(&v2, &v3).unwrap_err();
        assert_eq!(err, not_met(3, 0));

        new_cores.sign(&mut v3, &[0, 1, 3]);
        let tally = service.verify_rotation(&v2, &v3).unwrap();
        assert_eq!(tally.achieved(), 3);
        assert_eq!(tally.foreign.len(), 3);
    }

    /// Test: a successor announced under quarantine is held back, then the
    /// same content without quarantine passes
    #[test]
    fn test_quarantine_then_release() {
        let cores = CoreSet::generate(1, 0x110, 3);
        let old = predecessor(&cores);

        let mut announced = cores.values(2, 2);
        announced.quarantine = true;
        let early = cores.document(announced, 2_000, &[A, B, C]);
        let expected = TrcError::QuarantineViolation {
            previous: false,
            candidate: true,
        };
        assert_eq!(rotate(&old, &early).unwrap_err(), expected);

        let released = cores.document(cores.values(2, 2), 2_500, &[A, B, C]);
        assert!(rotate(&old, &released).is_ok());
    }

    // =========================================================================
    // CONCURRENCY
    // =========================================================================

    /// Test: read-only verification shared across threads agrees everywhere
    #[test]
    fn test_concurrent_verification() {
        let service = service();
        let cores = CoreSet::generate(1, 0x110, 5);
        let old = cores.document(cores.values(1, 3), 1_000, &[]);
        let accepted = cores.document(cores.values(2, 3), 2_000, &[0, 2, 4]);
        let rejected = cores.document(cores.values(2, 3), 2_000, &[1, 3]);

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|i| {
                    let (service, old, accepted, rejected) = (&service, &old, &accepted, &rejected);
                    scope.spawn(move || {
                        let candidate = if i % 2 == 0 { accepted } else { rejected };
                        service
                            .verify_rotation(old, candidate)
                            .map(|tally| tally.achieved())
                    })
                })
                .collect();

            for (i, handle) in handles.into_iter().enumerate() {
                let result = handle.join().unwrap();
                if i % 2 == 0 {
                    assert_eq!(result, Ok(3));
                } else {
                    assert_eq!(result, Err(not_met(3, 2)));
                }
            }
        });
    }

    /// Test: signing a clone leaves documents shared with other threads intact
    #[test]
    fn test_signed_clones_are_independent() {
        let cores = CoreSet::generate(1, 0x110, 3);
        let unsigned = TrcDocument::from_values_at(cores.values(2, 2), 2_000).unwrap();

        let variants: Vec<TrcDocument> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..3)
                .map(|i| {
                    let (unsigned, cores) = (&unsigned, &cores);
                    scope.spawn(move || {
                        let mut copy = unsigned.clone();
                        cores.sign(&mut copy, &[i]);
                        copy
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert!(unsigned.signatures().is_empty());
        for (i, variant) in variants.iter().enumerate() {
            let signers: Vec<_> = variant.signatures().signers().collect();
            assert_eq!(signers, vec![cores.id(i)]);
        }
    }
}
