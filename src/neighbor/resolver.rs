//! MAC to IP resolution against a single snapshot of the neighbor table.

use crate::neighbor::mac::normalize_mac;
use crate::neighbor::table::{NeighborSource, NeighborTableError};
use log::{debug, info};
use std::collections::BTreeMap;

/// Result of one resolution pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MacMapping {
    /// Canonical MAC -> IP, only for MACs found in the table
    pub mac_to_ip: BTreeMap<String, String>,
    /// IP -> canonical MAC, the reverse of `mac_to_ip`
    pub ip_to_mac: BTreeMap<String, String>,
}

impl MacMapping {
    pub fn ip_for(&self, mac: &str) -> Option<&str> {
        self.mac_to_ip.get(&normalize_mac(mac)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.mac_to_ip.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mac_to_ip.is_empty()
    }
}

/// Resolves MAC addresses to their current IP through a [`NeighborSource`]
pub struct MacResolver<S> {
    source: S,
}

impl<S: NeighborSource> MacResolver<S> {
    pub fn new(source: S) -> Self {
        MacResolver { source }
    }

    /// Resolve `macs` against a fresh read of the neighbor table.
    ///
    /// The table is read exactly once per call. When a MAC appears more
    /// than once, the first entry in table order wins. MACs without an
    /// entry are left out of the mapping; that is the normal case for an
    /// offline device, not an error.
    pub fn resolve<M: AsRef<str>>(&self, macs: &[M]) -> Result<MacMapping, NeighborTableError> {
        let table = self.source.read()?;
        let mut mapping = MacMapping::default();

        for mac in macs {
            let mac = normalize_mac(mac.as_ref());
            if mapping.mac_to_ip.contains_key(&mac) {
                continue;
            }
            if let Some(pair) = table.iter().find(|pair| pair.mac == mac) {
                debug!("Resolved {} -> {}", mac, pair.ip);
                mapping.ip_to_mac.insert(pair.ip.clone(), mac.clone());
                mapping.mac_to_ip.insert(mac, pair.ip.clone());
            }
        }

        info!("Resolved {} of {} MAC addresses from {} neighbor entries",
              mapping.len(), macs.len(), table.len());
        Ok(mapping)
    }
}
