//! # ISD-AS Identifier Adapter
//!
//! [`AsIdentifierParser`] producing [`IsdAs`] values.

use crate::domain::errors::TrcResult;
use crate::domain::isd_as::IsdAs;
use crate::ports::outbound::AsIdentifierParser;

/// Parses `CoreCAs` keys as `<isd>-<as>` identifiers.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsdAsParser;

impl AsIdentifierParser for IsdAsParser {
    type Id = IsdAs;

    fn parse_as_identifier(&self, key: &str) -> TrcResult<IsdAs> {
        key.parse()
    }
}
