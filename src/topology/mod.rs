//! Network topology module.
//!
//! This module composes the federated program for the capture arena: a
//! typed document builder, the serializer that owns the output grammar,
//! and the composer that wires one coordinator to every capture node.

pub mod composer;
pub mod document;
pub mod render;
pub mod types;

// Re-export key types and functions for easier access
pub use composer::{persist, ComposeError, PersistError, TopologyComposer};
pub use document::{Document, DocumentBuilder, PortRef, Section};
pub use render::render;
pub use types::{Coordinator, GeneratedConfiguration, Topology};
