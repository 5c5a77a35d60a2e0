//! Topology type definitions.
//!
//! A topology is a star: one coordinator reactor fanning triggers out to
//! every capture node and collecting their data back in, plus the ordered
//! list of capture nodes. Node position in the list is the node index.

use crate::config::ComposerSettings;
use crate::registry::NodeDescriptor;
use std::time::Duration;

/// Instance name of the coordinator in the generated program
pub const COORDINATOR_INSTANCE: &str = "S";

/// Coordinator output port driving every node's capture
pub const CAPTURE_TRIGGER_PORT: &str = "capture_trigger";

/// Capture node output port carrying captured data
pub const DATA_OUT_PORT: &str = "data_out";

/// Coordinator input port receiving all node data
pub const DATA_IN_PORT: &str = "data_in";

/// The coordinating reactor at the hub of the star
#[derive(Debug, Clone, PartialEq)]
pub struct Coordinator {
    pub instance: String,
    pub class: String,
    pub capture_rate: Duration,
}

impl Coordinator {
    pub fn from_settings(settings: &ComposerSettings) -> Self {
        Coordinator {
            instance: COORDINATOR_INSTANCE.to_string(),
            class: settings.coordinator_class.clone(),
            capture_rate: settings.capture_rate,
        }
    }
}

/// Ordered capture nodes plus their coordinator
#[derive(Debug, Clone, PartialEq)]
pub struct Topology {
    pub nodes: Vec<NodeDescriptor>,
    pub coordinator: Coordinator,
}

impl Topology {
    pub fn new(nodes: Vec<NodeDescriptor>, coordinator: Coordinator) -> Self {
        Topology { nodes, coordinator }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Identifier of the node at `index` (`N0`, `N1`, ...)
    pub fn node_id(index: usize) -> String {
        format!("N{}", index)
    }
}

/// Rendered program text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedConfiguration {
    text: String,
    node_count: usize,
}

impl GeneratedConfiguration {
    pub fn new(text: String, node_count: usize) -> Self {
        GeneratedConfiguration { text, node_count }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }
}

impl std::fmt::Display for GeneratedConfiguration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}
