//! Hardware address parsing and canonical formatting.
//!
//! `arp` prints MAC addresses in several shapes depending on the platform:
//! lowercase colon form on Linux, hyphen form on Windows and single-digit
//! octets (`a:b:c:d:e:f`) on BSD/macOS. Everything downstream compares
//! addresses in one canonical form: uppercase, colon-delimited, two hex
//! digits per octet.

use std::fmt;
use std::str::FromStr;

/// Errors that can occur while parsing a MAC address
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MacParseError {
    #[error("expected 6 octets in MAC address '{input}', found {found}")]
    OctetCount { input: String, found: usize },

    #[error("invalid octet '{octet}' in MAC address '{input}'")]
    InvalidOctet { input: String, octet: String },
}

/// A six-octet hardware address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MacAddress([u8; 6]);

impl MacAddress {
    pub fn new(octets: [u8; 6]) -> Self {
        MacAddress(octets)
    }

    pub fn octets(&self) -> [u8; 6] {
        self.0
    }
}

impl FromStr for MacAddress {
    type Err = MacParseError;

    /// Parse colon- or hyphen-delimited hex, one or two digits per octet.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        let parts: Vec<&str> = input.split(|c| c == ':' || c == '-').collect();
        if parts.len() != 6 {
            return Err(MacParseError::OctetCount {
                input: input.to_string(),
                found: parts.len(),
            });
        }

        let mut octets = [0u8; 6];
        for (slot, part) in octets.iter_mut().zip(&parts) {
            // from_str_radix accepts a leading '+', which is not a hex digit
            if part.is_empty() || part.len() > 2 || !part.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(MacParseError::InvalidOctet {
                    input: input.to_string(),
                    octet: part.to_string(),
                });
            }
            *slot = u8::from_str_radix(part, 16).map_err(|_| MacParseError::InvalidOctet {
                input: input.to_string(),
                octet: part.to_string(),
            })?;
        }

        Ok(MacAddress(octets))
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}", a, b, c, d, e, g)
    }
}

/// Normalize a MAC address string to canonical uppercase colon form.
///
/// Text that does not parse as a MAC address is still uppercased with
/// hyphens turned into colons, so that lookups stay consistent for
/// whatever the operator wrote in the configuration.
///
/// # Examples
/// ```
/// use lfcompose::neighbor::normalize_mac;
///
/// assert_eq!(normalize_mac("aa-bb-cc-dd-ee-ff"), "AA:BB:CC:DD:EE:FF");
/// assert_eq!(normalize_mac("0:1b:2c:3:4:5"), "00:1B:2C:03:04:05");
/// ```
pub fn normalize_mac(mac: &str) -> String {
    match mac.parse::<MacAddress>() {
        Ok(parsed) => parsed.to_string(),
        Err(_) => mac.trim().to_uppercase().replace('-', ":"),
    }
}
