//! # ISD-AS Identifiers
//!
//! Core ASes and signers are keyed by `"<isd>-<as>"` strings inside a TRC.
//! AS numbers in the BGP range are written in decimal, larger ones as three
//! colon-separated 16-bit hex groups (`1-ff00:0:110`).

use super::errors::{TrcError, TrcResult};
use std::fmt;
use std::str::FromStr;

/// Largest AS number written in decimal form.
pub const MAX_BGP_ASN: u64 = u32::MAX as u64;

/// Largest representable AS number (48 bits).
pub const MAX_ASN: u64 = (1 << 48) - 1;

/// Isolation domain plus AS number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IsdAs {
    pub isd: u16,
    pub asn: u64,
}

impl IsdAs {
    /// Create an identifier, rejecting AS numbers above 48 bits.
    pub fn new(isd: u16, asn: u64) -> TrcResult<Self> {
        if asn > MAX_ASN {
            return Err(TrcError::InvalidAsIdentifier {
                value: format!("{isd}-{asn}"),
                reason: "AS number exceeds 48 bits".to_string(),
            });
        }
        Ok(Self { isd, asn })
    }
}

impl FromStr for IsdAs {
    type Err = TrcError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| TrcError::InvalidAsIdentifier {
            value: value.to_string(),
            reason: reason.to_string(),
        };

        let (isd, asn) = value
            .split_once('-')
            .ok_or_else(|| invalid("missing '-' separator"))?;
        let isd: u16 = isd.parse().map_err(|_| invalid("invalid ISD number"))?;

        let asn = if asn.contains(':') {
            parse_hex_groups(asn)
                .ok_or_else(|| invalid("invalid hex AS number"))?
        } else {
            let asn: u64 = asn.parse().map_err(|_| invalid("invalid AS number"))?;
            if asn > MAX_BGP_ASN {
                return Err(invalid("decimal AS number outside BGP range"));
            }
            asn
        };

        Ok(Self { isd, asn })
    }
}

fn parse_hex_groups(text: &str) -> Option<u64> {
    let groups: Vec<&str> = text.split(':').collect();
    if groups.len() != 3 {
        return None;
    }
    groups.iter().try_fold(0u64, |acc, group| {
        if group.is_empty() || group.len() > 4 {
            return None;
        }
        u16::from_str_radix(group, 16)
            .ok()
            .map(|value| (acc << 16) | u64::from(value))
    })
}

impl fmt::Display for IsdAs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.asn <= MAX_BGP_ASN {
            write!(f, "{}-{}", self.isd, self.asn)
        } else {
            write!(
                f,
                "{}-{:x}:{:x}:{:x}",
                self.isd,
                (self.asn >> 32) & 0xffff,
                (self.asn >> 16) & 0xffff,
                self.asn & 0xffff
            )
        }
    }
}
