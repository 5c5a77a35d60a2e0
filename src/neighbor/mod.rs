//! Neighbor (ARP) table access and MAC resolution.
//!
//! This module turns the host's address-resolution cache into
//! [`AddressPair`]s and resolves the configured capture-node MAC addresses
//! against them. The table is read fresh on every resolution pass; nothing
//! is cached between runs.

pub mod mac;
pub mod resolver;
pub mod table;

// Re-export commonly used types
pub use mac::{normalize_mac, MacAddress, MacParseError};
pub use resolver::{MacMapping, MacResolver};
pub use table::{parse_neighbor_table, AddressPair, ArpCommand, NeighborSource, NeighborTableError};
