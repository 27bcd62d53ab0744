//! # Quorum Verification
//!
//! Decides whether a candidate TRC carries enough valid signatures from the
//! core ASes of a reference TRC.
//!
//! Signatures from identifiers outside the reference core-AS set are
//! tolerated: they are reported as foreign and never counted. A signer whose
//! check fails, including a fault inside the signature primitive, is excluded
//! with a warning and the remaining signers are still checked.

use super::canonical::canonical_bytes;
use super::document::TrcDocument;
use super::errors::{TrcError, TrcResult};
use crate::ports::outbound::SignatureScheme;
use rayon::prelude::*;
use std::collections::BTreeSet;
use tracing::{debug, error, warn};

/// Per-signer outcome of one quorum check.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuorumTally {
    /// Signatures required by the reference TRC
    pub required: u32,
    /// Core-AS signers whose signature verified
    pub valid: BTreeSet<String>,
    /// Core-AS signers whose signature did not verify
    pub rejected: BTreeSet<String>,
    /// Signers outside the reference core-AS set
    pub foreign: BTreeSet<String>,
}

impl QuorumTally {
    /// Number of distinct valid core-AS signers.
    pub fn achieved(&self) -> usize {
        self.valid.len()
    }

    pub fn is_met(&self) -> bool {
        self.achieved() >= self.required as usize
    }
}

enum SignerCheck {
    Valid(String),
    Rejected(String),
}

/// Checks candidate signatures against a reference core-AS set.
#[derive(Debug, Clone, Copy)]
pub struct QuorumVerifier<'a, S: SignatureScheme> {
    scheme: &'a S,
}

impl<'a, S: SignatureScheme> QuorumVerifier<'a, S> {
    pub fn new(scheme: &'a S) -> Self {
        Self { scheme }
    }

    /// Verify every eligible signature of `candidate` without deciding.
    ///
    /// Eligible signers are checked in parallel; the tally does not depend
    /// on their order.
    ///
    /// # Errors
    /// * `TrcError::CanonicalEncoding` - the candidate signing input is invalid
    pub fn tally(
        &self,
        candidate: &TrcDocument,
        reference: &TrcDocument,
    ) -> TrcResult<QuorumTally> {
        let payload = canonical_bytes(candidate, false)?;

        let (eligible, foreign): (Vec<(&str, &[u8])>, Vec<(&str, &[u8])>) = candidate
            .signatures()
            .iter()
            .partition(|(signer, _)| reference.core_as(signer).is_some());

        let foreign: BTreeSet<String> = foreign
            .into_iter()
            .map(|(signer, _)| signer.to_string())
            .collect();
        if !foreign.is_empty() {
            warn!(
                isd = candidate.isd(),
                version = candidate.version(),
                foreign = ?foreign,
                "[trc] candidate carries signatures from non-core ASes"
            );
        }

        let checks: Vec<SignerCheck> = eligible
            .par_iter()
            .filter_map(|(signer, signature)| {
                let entry = reference.core_as(signer)?;
                let key = entry.online_key.as_slice();
                Some(self.check_signer(signer, &payload, signature, key))
            })
            .collect();

        let mut tally = QuorumTally {
            required: reference.quorum_own_trc(),
            foreign,
            ..QuorumTally::default()
        };
        for check in checks {
            match check {
                SignerCheck::Valid(signer) => tally.valid.insert(signer),
                SignerCheck::Rejected(signer) => tally.rejected.insert(signer),
            };
        }

        debug!(
            isd = candidate.isd(),
            version = candidate.version(),
            valid = tally.achieved(),
            required = tally.required,
            "[trc] quorum tally complete"
        );
        Ok(tally)
    }

    /// Succeed iff the candidate holds at least `reference.quorum_own_trc()`
    /// valid core-AS signatures.
    ///
    /// # Errors
    /// * `TrcError::QuorumNotMet` - too few valid signers
    /// * `TrcError::CanonicalEncoding` - the candidate signing input is invalid
    pub fn verify(
        &self,
        candidate: &TrcDocument,
        reference: &TrcDocument,
    ) -> TrcResult<QuorumTally> {
        let tally = self.tally(candidate, reference)?;
        if !tally.is_met() {
            error!(
                isd = candidate.isd(),
                version = candidate.version(),
                required = tally.required,
                achieved = tally.achieved(),
                "[trc] quorum not met"
            );
            return Err(TrcError::QuorumNotMet {
                required: tally.required,
                achieved: tally.achieved(),
            });
        }
        Ok(tally)
    }

    fn check_signer(
        &self,
        signer: &str,
        payload: &[u8],
        signature: &[u8],
        public_key: &[u8],
    ) -> SignerCheck {
        match self.scheme.verify(payload, signature, public_key) {
            Ok(true) => SignerCheck::Valid(signer.to_string()),
            Ok(false) => {
                warn!(signer, "[trc] signature verification failed");
                SignerCheck::Rejected(signer.to_string())
            }
            Err(e) => {
                warn!(signer, error = %e, "[trc] signature primitive fault");
                SignerCheck::Rejected(signer.to_string())
            }
        }
    }
}
