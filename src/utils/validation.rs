//! Configuration validation utilities.
//!
//! This module provides validation functions for the device list and
//! resolver settings loaded from the YAML configuration.

use crate::neighbor::MacAddress;
use crate::utils::ip_utils::{is_private_ip, is_valid_ipv4};
use std::collections::HashMap;

/// Validate the configured client MAC addresses
///
/// Checks for:
/// - Well-formed six-octet MAC addresses (colon or hyphen delimited)
/// - Duplicate devices, compared in canonical form
///
/// # Returns
/// * `Ok(())` if validation succeeds
/// * `Err(String)` with an error message if validation fails
///
/// # Examples
/// ```
/// use lfcompose::utils::validation::validate_client_macs;
///
/// assert!(validate_client_macs(&["aa:bb:cc:dd:ee:01", "AA-BB-CC-DD-EE-02"]).is_ok());
/// assert!(validate_client_macs(&["aa:bb:cc:dd:ee:01", "AA-BB-CC-DD-EE-01"]).is_err());
/// ```
pub fn validate_client_macs<M: AsRef<str>>(macs: &[M]) -> Result<(), String> {
    let mut seen: HashMap<MacAddress, usize> = HashMap::new();

    for (index, mac) in macs.iter().enumerate() {
        let mac = mac.as_ref();
        let parsed: MacAddress = mac
            .parse()
            .map_err(|e| format!("client {}: {}", index, e))?;

        if let Some(first) = seen.insert(parsed, index) {
            return Err(format!(
                "client {} repeats MAC address {} already used by client {}",
                index, parsed, first
            ));
        }
    }

    Ok(())
}

/// Validate the fallback address assigned to unresolved devices
///
/// The fallback must be an IPv4 address. A public address is accepted but
/// logged, since capture nodes live on the local segment.
pub fn validate_fallback_ip(ip: &str) -> Result<(), String> {
    if !is_valid_ipv4(ip) {
        return Err(format!("fallback_ip '{}' is not a valid IPv4 address", ip));
    }
    if let Ok(false) = is_private_ip(ip) {
        log::warn!("fallback_ip {} is not a private address; unresolved nodes will be placed outside the local segment", ip);
    }
    Ok(())
}
