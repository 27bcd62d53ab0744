//! # Rotation Validation
//!
//! Decides whether a candidate TRC may supersede its predecessor. Checks run
//! in a fixed order and stop at the first failure:
//!
//! 1. same isolation domain
//! 2. version exactly one above the predecessor
//! 3. creation time not before the predecessor
//! 4. neither side quarantined
//! 5. candidate signed by a quorum of the predecessor's core ASes

use super::document::TrcDocument;
use super::errors::{TrcError, TrcResult};
use super::quorum::{QuorumTally, QuorumVerifier};
use crate::ports::outbound::SignatureScheme;
use tracing::{error, info};

/// Validates TRC version transitions.
#[derive(Debug, Clone, Copy)]
pub struct RotationValidator<'a, S: SignatureScheme> {
    quorum: QuorumVerifier<'a, S>,
}

impl<'a, S: SignatureScheme> RotationValidator<'a, S> {
    pub fn new(scheme: &'a S) -> Self {
        Self {
            quorum: QuorumVerifier::new(scheme),
        }
    }

    /// Accept `candidate` as the successor of `previous`.
    ///
    /// Returns the quorum tally of the accepted candidate. Quorum failures
    /// are propagated unchanged.
    pub fn verify_rotation(
        &self,
        previous: &TrcDocument,
        candidate: &TrcDocument,
    ) -> TrcResult<QuorumTally> {
        if let Err(e) = check_transition(previous, candidate) {
            error!(
                isd = previous.isd(),
                previous_version = previous.version(),
                candidate_version = candidate.version(),
                error = %e,
                "[trc] rotation rejected"
            );
            return Err(e);
        }

        let tally = self.quorum.verify(candidate, previous)?;
        info!(
            isd = candidate.isd(),
            version = candidate.version(),
            signers = tally.achieved(),
            "[trc] rotation accepted"
        );
        Ok(tally)
    }
}

/// Structural checks that need no signature verification.
fn check_transition(previous: &TrcDocument, candidate: &TrcDocument) -> TrcResult<()> {
    if previous.isd() != candidate.isd() {
        return Err(TrcError::IsdMismatch {
            previous: previous.isd(),
            candidate: candidate.isd(),
        });
    }

    if previous.version().checked_add(1) != Some(candidate.version()) {
        return Err(TrcError::VersionMismatch {
            expected: previous.version().saturating_add(1),
            actual: candidate.version(),
        });
    }

    if candidate.creation_time() < previous.creation_time() {
        return Err(TrcError::TimestampRegression {
            previous: previous.creation_time(),
            candidate: candidate.creation_time(),
        });
    }

    if previous.quarantine() || candidate.quarantine() {
        return Err(TrcError::QuarantineViolation {
            previous: previous.quarantine(),
            candidate: candidate.quarantine(),
        });
    }

    Ok(())
}
