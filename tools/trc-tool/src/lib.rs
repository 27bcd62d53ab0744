//! trc-tool: command-line front end for `trc-core`.
//!
//! ```text
//! trc-tool show TRC          sorted, indented text
//! trc-tool fingerprint TRC   hex SHA-256 of the signing input
//! trc-tool canonical TRC     raw signing input
//! trc-tool sign TRC ...      add an Ed25519 signature
//! trc-tool verify TRC ...    quorum report against a reference TRC
//! trc-tool rotate OLD NEW    rotation check, exit status 1 on rejection
//! ```

pub mod cli;
pub mod commands;

pub use cli::{Cli, Command};
pub use commands::{ToolService, Verdict};
