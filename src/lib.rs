//! # lfcompose - Capture arena program generator
//!
//! This library finds the current IP address of a fixed set of capture
//! devices on the local network and generates the federated Lingua Franca
//! program that deploys one `CaptureNode` to each of them, all driven by a
//! single `MainScheduler`.
//!
//! ## Overview
//!
//! Capture devices are known by MAC address only; their IP addresses come
//! from DHCP and change between sessions. Before each session the operator
//! runs `lfcompose`, which reads the host's ARP cache, binds every device
//! to its current address and rewrites the program so each federate is
//! placed on the right host.
//!
//! ## Architecture
//!
//! - `neighbor`: ARP table reading, MAC normalization and resolution
//! - `registry`: ordered capture-node descriptors with fallback addresses
//! - `topology`: document builder, serializer and composer for the program
//! - `config` / `config_loader`: YAML configuration and validation
//! - `orchestrator`: the end-to-end generation pass
//! - `utils`: IP helpers, LF time values, validation helpers
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use lfcompose::{config_loader, orchestrator};
//! use std::path::Path;
//!
//! let config = config_loader::load_config(Path::new("lf_config.yaml"))?;
//! let options = orchestrator::GenerationOptions {
//!     output: Some("src/MotionTrackingArena.lf".into()),
//!     registry: None,
//! };
//! let report = orchestrator::generate(&config, config.arp_command(), &options)?;
//! println!("{} nodes, {} on fallback", report.nodes.len(), report.fallback_count());
//! # Ok::<(), color_eyre::eyre::Error>(())
//! ```
//!
//! ## Configuration Format
//!
//! ```yaml
//! clients:
//!   - mac_address: "DC:A6:32:01:02:03"
//!   - mac_address: "dc-a6-32-01-02-04"
//!
//! resolver:
//!   command: ["arp", "-a"]
//!   fallback_ip: "192.168.0.100"
//!
//! composer:
//!   reactor_name: MotionTrackingArena
//!   capture_rate: 1s
//! ```
//!
//! ## Error Handling
//!
//! Module-level failures are `thiserror` enums (`NeighborTableError`,
//! `ComposeError`, `PersistError`, `ValidationError`); orchestration and
//! the binary report them through `color_eyre`.

pub mod config;
pub mod config_loader;
pub mod neighbor;
pub mod orchestrator;
pub mod registry;
pub mod topology;
pub mod utils;
