//! Command-line arguments.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// trc-tool: inspect, sign and verify Trust Root Configurations
#[derive(Parser, Debug)]
#[command(name = "trc-tool", version)]
#[command(about = "Inspect, sign and verify Trust Root Configuration files")]
pub struct Cli {
    /// Log at debug level, overriding TRC_LOG_LEVEL
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Input files are zstd envelopes
    #[arg(short = 'z', long, global = true)]
    pub compressed: bool,

    /// Largest input file accepted, in bytes
    #[arg(long, global = true)]
    pub max_payload_bytes: Option<usize>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print a TRC as sorted, indented text
    Show {
        file: PathBuf,

        /// Leave out the Signatures field
        #[arg(long)]
        no_signatures: bool,
    },

    /// Print the hex SHA-256 of the unsigned signing input
    Fingerprint { file: PathBuf },

    /// Write the signing-input bytes to stdout
    Canonical {
        file: PathBuf,

        /// Include the Signatures field
        #[arg(long)]
        with_signatures: bool,
    },

    /// Add an Ed25519 signature
    Sign {
        file: PathBuf,

        /// Signer AS identifier, e.g. 1-ff00:0:110
        #[arg(long)]
        signer: String,

        /// 32-byte Ed25519 seed as 64 hex characters
        #[arg(long)]
        seed_hex: String,

        /// Output file; stdout if absent
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Check a TRC's signatures against a reference TRC
    Verify {
        candidate: PathBuf,

        /// TRC whose core ASes and quorum apply
        #[arg(long)]
        reference: PathBuf,
    },

    /// Check that NEW may supersede OLD
    Rotate { old: PathBuf, new: PathBuf },
}
