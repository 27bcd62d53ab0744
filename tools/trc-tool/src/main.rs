//! trc-tool: inspect, sign and verify Trust Root Configuration files.

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use trc_core::{TrcConfig, TrcService};
use trc_telemetry::{init_logging, TelemetryConfig};
use trc_tool::commands::{self, ToolService, Verdict};
use trc_tool::{Cli, Command};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut telemetry = TelemetryConfig::from_env();
    if cli.verbose {
        telemetry = telemetry.with_level("debug");
    }
    if let Err(e) = init_logging(&telemetry) {
        eprintln!("Warning: logging disabled: {e}");
    }

    match run(cli) {
        Ok(Verdict::Accepted) => ExitCode::SUCCESS,
        Ok(Verdict::Rejected) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<Verdict> {
    let mut config = TrcConfig::default();
    if let Some(limit) = cli.max_payload_bytes {
        config.max_payload_bytes = limit;
    }
    let service: ToolService = TrcService::ed25519(config);
    let compressed = cli.compressed;
    let mut stdout = io::stdout().lock();

    match cli.command {
        Command::Show {
            file,
            no_signatures,
        } => {
            let raw = read(&file)?;
            commands::show(&service, &raw, compressed, !no_signatures, &mut stdout)?;
        }
        Command::Fingerprint { file } => {
            commands::fingerprint(&service, &read(&file)?, compressed, &mut stdout)?;
        }
        Command::Canonical {
            file,
            with_signatures,
        } => {
            let raw = read(&file)?;
            commands::canonical(&service, &raw, compressed, with_signatures, &mut stdout)?;
        }
        Command::Sign {
            file,
            signer,
            seed_hex,
            out,
        } => {
            let packed = commands::sign(&service, &read(&file)?, compressed, &signer, &seed_hex)?;
            match out {
                Some(path) => write(&path, &packed)?,
                None => stdout.write_all(&packed)?,
            }
        }
        Command::Verify {
            candidate,
            reference,
        } => {
            let (candidate, reference) = (read(&candidate)?, read(&reference)?);
            return commands::verify(&service, &candidate, &reference, compressed, &mut stdout);
        }
        Command::Rotate { old, new } => {
            let (old, new) = (read(&old)?, read(&new)?);
            return commands::rotate(&service, &old, &new, compressed, &mut stdout);
        }
    }

    stdout.flush()?;
    Ok(Verdict::Accepted)
}

fn read(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("failed to read {}", path.display()))
}

fn write(path: &Path, contents: &[u8]) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}
