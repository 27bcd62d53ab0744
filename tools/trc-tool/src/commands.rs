//! Subcommand implementations.
//!
//! Each command takes raw file contents and writes its report to `out`, so
//! file handling stays in `main`.

use anyhow::{Context, Result};
use std::io::Write;
use trc_core::adapters::compression::ZstdCodec;
use trc_core::adapters::ed25519::Ed25519Scheme;
use trc_core::{canonical_bytes, QuorumVerifier, TrcDocument, TrcService, TrustRootApi};
use trc_crypto::Ed25519KeyPair;

/// Service used by every command.
pub type ToolService = TrcService<Ed25519Scheme, ZstdCodec>;

/// Result of a verification command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    Rejected,
}

fn parse(service: &ToolService, raw: &[u8], compressed: bool, what: &str) -> Result<TrcDocument> {
    service
        .parse(raw, compressed)
        .with_context(|| format!("failed to parse {what}"))
}

pub fn show(
    service: &ToolService,
    raw: &[u8],
    compressed: bool,
    include_signatures: bool,
    out: &mut impl Write,
) -> Result<()> {
    let document = parse(service, raw, compressed, "TRC")?;
    writeln!(out, "{}", document.to_text(include_signatures)?)?;
    Ok(())
}

pub fn fingerprint(
    service: &ToolService,
    raw: &[u8],
    compressed: bool,
    out: &mut impl Write,
) -> Result<()> {
    let document = parse(service, raw, compressed, "TRC")?;
    writeln!(out, "{}", hex::encode(service.fingerprint(&document)?))?;
    Ok(())
}

pub fn canonical(
    service: &ToolService,
    raw: &[u8],
    compressed: bool,
    include_signatures: bool,
    out: &mut impl Write,
) -> Result<()> {
    let document = parse(service, raw, compressed, "TRC")?;
    let bytes = canonical_bytes(&document, include_signatures)?;
    out.write_all(&bytes)?;
    Ok(())
}

/// Sign with the key derived from `seed_hex`, returning the packed document.
/// The output uses the same envelope as the input.
pub fn sign(
    service: &ToolService,
    raw: &[u8],
    compressed: bool,
    signer: &str,
    seed_hex: &str,
) -> Result<Vec<u8>> {
    let mut document = parse(service, raw, compressed, "TRC")?;
    let seed = hex::decode(seed_hex.trim())
        .context("seed is not valid hex")?;
    let key = Ed25519KeyPair::from_seed_slice(&seed)
        .context("seed must be 32 bytes")?;

    if document.core_as(signer).is_none() {
        tracing::warn!(signer, "[trc] signer is not a core AS of this TRC");
    }

    service.sign(&mut document, signer, &key)?;
    Ok(service.pack(&document, compressed)?)
}

pub fn verify(
    service: &ToolService,
    candidate: &[u8],
    reference: &[u8],
    compressed: bool,
    out: &mut impl Write,
) -> Result<Verdict> {
    let candidate = parse(service, candidate, compressed, "candidate")?;
    let reference = parse(service, reference, compressed, "reference")?;

    let tally = QuorumVerifier::new(service.scheme())
        .tally(&candidate, &reference)?;
    writeln!(out, "required: {}", tally.required)?;
    writeln!(out, "valid:    {}", join(&tally.valid))?;
    writeln!(out, "rejected: {}", join(&tally.rejected))?;
    writeln!(out, "foreign:  {}", join(&tally.foreign))?;

    let (achieved, required) = (tally.achieved(), tally.required);
    if tally.is_met() {
        writeln!(out, "quorum met ({achieved} of {required})")?;
        Ok(Verdict::Accepted)
    } else {
        writeln!(out, "quorum NOT met ({achieved} of {required})")?;
        Ok(Verdict::Rejected)
    }
}

pub fn rotate(
    service: &ToolService,
    old: &[u8],
    new: &[u8],
    compressed: bool,
    out: &mut impl Write,
) -> Result<Verdict> {
    let old = parse(service, old, compressed, "previous TRC")?;
    let new = parse(service, new, compressed, "candidate TRC")?;

    match service.verify_rotation(&old, &new) {
        Ok(tally) => {
            writeln!(
                out,
                "accepted: ISD {} version {} -> {} ({} of {} signatures)",
                new.isd(),
                old.version(),
                new.version(),
                tally.achieved(),
                tally.required
            )?;
            Ok(Verdict::Accepted)
        }
        Err(e) if e.is_rejection() => {
            writeln!(out, "rejected: {e}")?;
            Ok(Verdict::Rejected)
        }
        Err(e) => Err(e.into()),
    }
}

fn join(signers: &std::collections::BTreeSet<String>) -> String {
    if signers.is_empty() {
        "-".to_string()
    } else {
        signers
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}
