//! # Node Registry Module
//!
//! This module turns the ordered list of configured capture devices into
//! [`NodeDescriptor`]s, one per device, and optionally records them in a
//! JSON registry file next to the generated program.
//!
//! ## Ordering
//!
//! The registry preserves the configured device order exactly. Position in
//! the list becomes the node index, and the index becomes the `N<i>`
//! identifier used both for placement and for wiring in the generated
//! program. Reordering the configuration therefore renumbers nodes.
//!
//! ## Fallback Addresses
//!
//! A device that is not present in the neighbor table (powered off, not yet
//! connected) still gets a node. It is placed at the registry's fallback
//! address, which is an explicit value handed to [`NodeRegistry::new`]. The
//! operator is expected to re-run generation once the device is online.
//!
//! ## Example Registry Structure
//!
//! ```json
//! {
//!   "generated_at": "2026-10-19T09:30:00Z",
//!   "nodes": [
//!     {
//!       "id": "N0",
//!       "index": 0,
//!       "mac_address": "DC:A6:32:01:02:03",
//!       "ip_address": "192.168.0.17",
//!       "resolved": true
//!     }
//!   ]
//! }
//! ```

use crate::neighbor::normalize_mac;
use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Address used for unresolved devices when the configuration names none
pub const DEFAULT_FALLBACK_IP: &str = "192.168.0.100";

/// How a node's address was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressOrigin {
    /// Found in the neighbor table
    Resolved,
    /// Device was not in the neighbor table; fallback address assigned
    Fallback,
}

/// One capture node: its hardware address and placement address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeDescriptor {
    pub mac_address: String,
    pub ip_address: String,
    pub origin: AddressOrigin,
}

impl NodeDescriptor {
    pub fn new(mac_address: impl Into<String>, ip_address: impl Into<String>, origin: AddressOrigin) -> Self {
        NodeDescriptor {
            mac_address: mac_address.into(),
            ip_address: ip_address.into(),
            origin,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.origin == AddressOrigin::Resolved
    }
}

/// Builds node descriptors, substituting a fallback for unresolved devices
#[derive(Debug, Clone)]
pub struct NodeRegistry {
    fallback_ip: String,
}

impl NodeRegistry {
    pub fn new(fallback_ip: impl Into<String>) -> Self {
        NodeRegistry {
            fallback_ip: fallback_ip.into(),
        }
    }

    pub fn fallback_ip(&self) -> &str {
        &self.fallback_ip
    }

    /// Build one descriptor per device MAC, in input order.
    ///
    /// `mac_to_ip` is keyed by canonical MAC; device MACs are normalized
    /// before lookup. Devices missing from the mapping get the fallback
    /// address and never cause an error.
    pub fn build<M: AsRef<str>>(&self, device_macs: &[M], mac_to_ip: &BTreeMap<String, String>) -> Vec<NodeDescriptor> {
        let nodes: Vec<NodeDescriptor> = device_macs
            .iter()
            .enumerate()
            .map(|(index, mac)| {
                let mac = normalize_mac(mac.as_ref());
                match mac_to_ip.get(&mac) {
                    Some(ip) => NodeDescriptor::new(mac, ip.clone(), AddressOrigin::Resolved),
                    None => {
                        warn!("N{}: {} not found in neighbor table, using fallback {}",
                              index, mac, self.fallback_ip);
                        NodeDescriptor::new(mac, self.fallback_ip.clone(), AddressOrigin::Fallback)
                    }
                }
            })
            .collect();

        let resolved = nodes.iter().filter(|node| node.is_resolved()).count();
        info!("Registered {} nodes ({} resolved, {} fallback)",
              nodes.len(), resolved, nodes.len() - resolved);
        nodes
    }
}

impl Default for NodeRegistry {
    fn default() -> Self {
        NodeRegistry::new(DEFAULT_FALLBACK_IP)
    }
}

/// Entry of the JSON node registry
#[derive(Serialize, Debug)]
pub struct NodeRegistryEntry {
    /// Identifier used in the generated program (`N0`, `N1`, ...)
    pub id: String,
    pub index: usize,
    pub mac_address: String,
    pub ip_address: String,
    /// False when the fallback address was assigned
    pub resolved: bool,
}

/// JSON node registry written alongside the generated program
#[derive(Serialize, Debug)]
pub struct NodeRegistryFile {
    pub generated_at: DateTime<Utc>,
    pub nodes: Vec<NodeRegistryEntry>,
}

impl NodeRegistryFile {
    pub fn from_nodes(nodes: &[NodeDescriptor], generated_at: DateTime<Utc>) -> Self {
        NodeRegistryFile {
            generated_at,
            nodes: nodes
                .iter()
                .enumerate()
                .map(|(index, node)| NodeRegistryEntry {
                    id: format!("N{}", index),
                    index,
                    mac_address: node.mac_address.clone(),
                    ip_address: node.ip_address.clone(),
                    resolved: node.is_resolved(),
                })
                .collect(),
        }
    }
}

/// Write the node registry as pretty-printed JSON
pub fn write_node_registry(nodes: &[NodeDescriptor], path: &Path) -> color_eyre::eyre::Result<()> {
    let registry = NodeRegistryFile::from_nodes(nodes, Utc::now());
    let registry_json = serde_json::to_string_pretty(&registry)?;
    std::fs::write(path, registry_json)?;
    info!("Wrote node registry for {} nodes to {:?}", nodes.len(), path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries.iter().map(|(mac, ip)| (mac.to_string(), ip.to_string())).collect()
    }

    #[test]
    fn test_build_preserves_order() {
        let macs = ["AA:00:00:00:00:03", "AA:00:00:00:00:01", "AA:00:00:00:00:02"];
        let mac_to_ip = mapping(&[
            ("AA:00:00:00:00:01", "10.0.0.1"),
            ("AA:00:00:00:00:02", "10.0.0.2"),
            ("AA:00:00:00:00:03", "10.0.0.3"),
        ]);

        let nodes = NodeRegistry::default().build(&macs, &mac_to_ip);

        let ips: Vec<&str> = nodes.iter().map(|n| n.ip_address.as_str()).collect();
        assert_eq!(ips, vec!["10.0.0.3", "10.0.0.1", "10.0.0.2"]);
        assert!(nodes.iter().all(NodeDescriptor::is_resolved));
    }

    #[test]
    fn test_unresolved_device_gets_fallback() {
        let macs = ["AA:BB:CC:DD:EE:FF", "00:00:00:00:00:00"];
        let mac_to_ip = mapping(&[("AA:BB:CC:DD:EE:FF", "10.0.0.5")]);

        let nodes = NodeRegistry::default().build(&macs, &mac_to_ip);

        assert_eq!(nodes[0], NodeDescriptor::new("AA:BB:CC:DD:EE:FF", "10.0.0.5", AddressOrigin::Resolved));
        assert_eq!(nodes[1], NodeDescriptor::new("00:00:00:00:00:00", DEFAULT_FALLBACK_IP, AddressOrigin::Fallback));
    }

    #[test]
    fn test_custom_fallback() {
        let registry = NodeRegistry::new("10.99.0.1");
        let nodes = registry.build(&["AA:BB:CC:DD:EE:FF"], &BTreeMap::new());
        assert_eq!(nodes[0].ip_address, "10.99.0.1");
        assert_eq!(registry.fallback_ip(), "10.99.0.1");
    }

    #[test]
    fn test_lowercase_config_mac_still_resolves() {
        let mac_to_ip = mapping(&[("AA:BB:CC:DD:EE:FF", "10.0.0.5")]);
        let nodes = NodeRegistry::default().build(&["aa-bb-cc-dd-ee-ff"], &mac_to_ip);
        assert_eq!(nodes[0].mac_address, "AA:BB:CC:DD:EE:FF");
        assert_eq!(nodes[0].ip_address, "10.0.0.5");
    }

    #[test]
    fn test_registry_file_entries() {
        let nodes = vec![
            NodeDescriptor::new("AA:00:00:00:00:01", "10.0.0.1", AddressOrigin::Resolved),
            NodeDescriptor::new("AA:00:00:00:00:02", DEFAULT_FALLBACK_IP, AddressOrigin::Fallback),
        ];
        let registry = NodeRegistryFile::from_nodes(&nodes, Utc::now());

        assert_eq!(registry.nodes[1].id, "N1");
        assert_eq!(registry.nodes[1].index, 1);
        assert!(registry.nodes[0].resolved);
        assert!(!registry.nodes[1].resolved);
    }

    #[test]
    fn test_write_node_registry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nodes.json");
        let nodes = vec![NodeDescriptor::new("AA:00:00:00:00:01", "10.0.0.1", AddressOrigin::Resolved)];

        write_node_registry(&nodes, &path).unwrap();

        let value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["nodes"][0]["id"], "N0");
        assert_eq!(value["nodes"][0]["ip_address"], "10.0.0.1");
        assert!(value["generated_at"].is_string());
    }
}
