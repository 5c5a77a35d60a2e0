//! Configuration orchestrator.
//!
//! This module runs the whole pipeline: resolve the configured device MACs
//! against the neighbor table, register one node per device, compose the
//! federated program and write it out.

use crate::config::Config;
use crate::neighbor::{MacMapping, MacResolver, NeighborSource};
use crate::registry::{write_node_registry, NodeDescriptor, NodeRegistry};
use crate::topology::{persist, GeneratedConfiguration, PersistError, TopologyComposer};
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::{debug, error, info};
use std::path::PathBuf;

/// Where generation results go
#[derive(Debug, Clone, Default)]
pub struct GenerationOptions {
    /// Program output path; `None` keeps the program in memory only
    pub output: Option<PathBuf>,
    /// Optional JSON node registry path
    pub registry: Option<PathBuf>,
}

/// Everything one generation pass produced
#[derive(Debug)]
pub struct GenerationReport {
    pub mapping: MacMapping,
    pub nodes: Vec<NodeDescriptor>,
    pub configuration: GeneratedConfiguration,
    /// Set when the program could not be written; the in-memory
    /// configuration above is still complete.
    pub persist_error: Option<PersistError>,
}

impl GenerationReport {
    pub fn fallback_count(&self) -> usize {
        self.nodes.iter().filter(|node| !node.is_resolved()).count()
    }
}

/// Run resolution, registration, composition and persistence.
///
/// A failure to read the neighbor table aborts the pass. A failure to
/// write the program is logged and returned in the report instead.
pub fn generate<S: NeighborSource>(config: &Config, source: S, options: &GenerationOptions) -> Result<GenerationReport> {
    let device_macs = config.device_macs();

    let resolver = MacResolver::new(source);
    let mapping = resolver
        .resolve(&device_macs)
        .wrap_err("Failed to resolve capture node addresses")?;
    for (ip, mac) in &mapping.ip_to_mac {
        debug!("{} is at {}", mac, ip);
    }

    let registry = NodeRegistry::new(config.resolver.fallback_ip.clone());
    let nodes = registry.build(&device_macs, &mapping.mac_to_ip);

    let composer = TopologyComposer::new(config.composer.clone());
    let configuration = composer.compose(&nodes, nodes.len())?;

    let persist_error = match &options.output {
        Some(path) => match persist(&configuration, path) {
            Ok(()) => {
                let shown = std::fs::canonicalize(path).unwrap_or_else(|_| path.clone());
                info!("Generated {} for {} nodes", shown.display(), configuration.node_count());
                None
            }
            Err(e) => {
                error!("Error saving file: {}", e);
                Some(e)
            }
        },
        None => None,
    };

    if let Some(registry_path) = &options.registry {
        write_node_registry(&nodes, registry_path)
            .wrap_err_with(|| format!("Failed to write node registry '{}'", registry_path.display()))?;
    }

    Ok(GenerationReport {
        mapping,
        nodes,
        configuration,
        persist_error,
    })
}
