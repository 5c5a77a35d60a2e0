//! Topology composer.
//!
//! Builds the federated program for a star topology and writes it to disk.
//! Composition is a pure function of the node list and the settings: the
//! same input always yields byte-identical text.

use crate::config::ComposerSettings;
use crate::registry::NodeDescriptor;
use crate::topology::document::{Document, PortRef, Section};
use crate::topology::render::render;
use crate::topology::types::{
    Coordinator, GeneratedConfiguration, Topology, CAPTURE_TRIGGER_PORT, DATA_IN_PORT, DATA_OUT_PORT,
};
use crate::utils::duration::format_lf_time;
use log::{debug, info};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Federation coordination mode; fixed for this topology
pub const COORDINATION: &str = "decentralized";

/// Whether runtime clock synchronization is enabled; fixed for this topology
pub const CLOCK_SYNC: bool = true;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ComposeError {
    #[error("node_count {declared} does not match the {actual} node descriptors supplied")]
    NodeCountMismatch { declared: usize, actual: usize },
}

/// Failure to write the generated program
#[derive(Debug, thiserror::Error)]
#[error("failed to write {}: {source}", .path.display())]
pub struct PersistError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Composes the federated star-topology program
#[derive(Debug, Clone, Default)]
pub struct TopologyComposer {
    settings: ComposerSettings,
}

impl TopologyComposer {
    pub fn new(settings: ComposerSettings) -> Self {
        TopologyComposer { settings }
    }

    pub fn settings(&self) -> &ComposerSettings {
        &self.settings
    }

    /// Generate the program for `nodes`, which must hold exactly
    /// `node_count` descriptors. Node `i` becomes `N<i>`.
    pub fn compose(&self, nodes: &[NodeDescriptor], node_count: usize) -> Result<GeneratedConfiguration, ComposeError> {
        if nodes.len() != node_count {
            return Err(ComposeError::NodeCountMismatch {
                declared: node_count,
                actual: nodes.len(),
            });
        }

        let topology = Topology::new(nodes.to_vec(), Coordinator::from_settings(&self.settings));
        let document = self.document(&topology);
        debug!("Composed document with {} sections", document.sections().len());

        Ok(GeneratedConfiguration::new(render(&document), node_count))
    }

    /// Lay out the sections of the program for `topology`
    pub fn document(&self, topology: &Topology) -> Document {
        let settings = &self.settings;
        let coordinator = &topology.coordinator;

        let mut builder = Document::builder()
            .section(Section::Target {
                language: settings.target.clone(),
                coordination: COORDINATION.to_string(),
                clock_sync: CLOCK_SYNC,
            })
            .section(Section::Import {
                class: settings.node_class.clone(),
                file: format!("{}.lf", settings.node_class),
            })
            .section(Section::Import {
                class: coordinator.class.clone(),
                file: format!("{}.lf", coordinator.class),
            })
            .section(Section::ReactorOpen {
                name: settings.reactor_name.clone(),
                node_count: topology.node_count(),
            })
            .section(Section::Coordinator {
                instance: coordinator.instance.clone(),
                class: coordinator.class.clone(),
                capture_rate: format_lf_time(coordinator.capture_rate),
            });

        // Placements
        builder = builder.sections(topology.nodes.iter().enumerate().map(|(index, node)| {
            Section::Placement {
                id: Topology::node_id(index),
                class: settings.node_class.clone(),
                index,
                mac_address: node.mac_address.clone(),
                user: settings.deploy_user.clone(),
                host: node.ip_address.clone(),
            }
        }));

        // Trigger fan-out
        builder = builder.sections((0..topology.node_count()).map(|index| Section::TriggerFanout {
            from: PortRef::new(coordinator.instance.as_str(), CAPTURE_TRIGGER_PORT),
            to: PortRef::new(Topology::node_id(index), CAPTURE_TRIGGER_PORT),
        }));

        // Data fan-in, in index order
        if topology.node_count() > 0 {
            builder = builder.section(Section::DataFanin {
                sources: (0..topology.node_count())
                    .map(|index| PortRef::new(Topology::node_id(index), DATA_OUT_PORT))
                    .collect(),
                sink: PortRef::new(coordinator.instance.as_str(), DATA_IN_PORT),
            });
        }

        builder.section(Section::ReactorClose).build()
    }
}

/// Write the generated program to `path`.
///
/// The file is created (or truncated), written and flushed through a
/// handle scoped to this call; it is closed on every return path. Parent
/// directories are not created.
pub fn persist(configuration: &GeneratedConfiguration, path: &Path) -> Result<(), PersistError> {
    let to_error = |source| PersistError {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(to_error)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(configuration.as_str().as_bytes()).map_err(to_error)?;
    writer.flush().map_err(to_error)?;

    info!("Wrote {} nodes to {:?}", configuration.node_count(), path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::AddressOrigin;
    use std::time::Duration;

    fn nodes(ips: &[&str]) -> Vec<NodeDescriptor> {
        ips.iter()
            .enumerate()
            .map(|(i, ip)| NodeDescriptor::new(format!("AA:BB:CC:DD:EE:{:02X}", i), *ip, AddressOrigin::Resolved))
            .collect()
    }

    #[test]
    fn test_compose_full_document() {
        let composer = TopologyComposer::default();
        let output = composer.compose(&nodes(&["10.0.0.1", "10.0.0.2"]), 2).unwrap();

        let expected = r#"target Python {
    coordination: decentralized,
    clock-sync: on
}

import CaptureNode from "CaptureNode.lf"
import MainScheduler from "MainScheduler.lf"

federated reactor MotionTrackingArena (
    node_count=2
) {
    S = new MainScheduler(
        node_count=node_count,
        capture_rate=1 sec
    );

    N0 = new CaptureNode(
        index=0,
        mac_address="AA:BB:CC:DD:EE:00"
    ) at linguafranca@10.0.0.1;

    N1 = new CaptureNode(
        index=1,
        mac_address="AA:BB:CC:DD:EE:01"
    ) at linguafranca@10.0.0.2;

    S.capture_trigger -> N0.capture_trigger;
    S.capture_trigger -> N1.capture_trigger;

    N0.data_out,
    N1.data_out
    -> S.data_in;
}
"#;
        assert_eq!(output.as_str(), expected);
        assert_eq!(output.node_count(), 2);
    }

    #[test]
    fn test_three_nodes_in_order() {
        let composer = TopologyComposer::default();
        let text = composer
            .compose(&nodes(&["10.0.0.1", "10.0.0.2", "10.0.0.3"]), 3)
            .unwrap()
            .to_string();

        let placements: Vec<usize> = ["N0 = new", "N1 = new", "N2 = new"]
            .iter()
            .map(|needle| text.find(needle).unwrap())
            .collect();
        assert!(placements.windows(2).all(|w| w[0] < w[1]));
        assert!(text.contains("index=2,\n        mac_address=\"AA:BB:CC:DD:EE:02\"\n    ) at linguafranca@10.0.0.3;"));
        assert_eq!(text.matches(" = new CaptureNode(").count(), 3);

        let triggers: Vec<&str> = text.lines().filter(|l| l.contains("-> N")).map(str::trim).collect();
        assert_eq!(
            triggers,
            vec![
                "S.capture_trigger -> N0.capture_trigger;",
                "S.capture_trigger -> N1.capture_trigger;",
                "S.capture_trigger -> N2.capture_trigger;",
            ]
        );

        assert!(text.contains("    N0.data_out,\n    N1.data_out,\n    N2.data_out\n    -> S.data_in;"));
        assert_eq!(text.matches("-> S.data_in").count(), 1);
    }

    #[test]
    fn test_compose_is_deterministic() {
        let composer = TopologyComposer::default();
        let input = nodes(&["10.0.0.1", "192.168.0.100", "10.0.0.3"]);
        let first = composer.compose(&input, 3).unwrap();
        let second = composer.compose(&input, 3).unwrap();
        assert_eq!(first.as_str().as_bytes(), second.as_str().as_bytes());
    }

    #[test]
    fn test_zero_nodes() {
        let text = TopologyComposer::default().compose(&[], 0).unwrap().to_string();
        assert!(text.contains("node_count=0"));
        assert!(!text.contains("CaptureNode("));
        assert!(!text.contains("capture_trigger"));
        assert!(!text.contains("data_in"));
        assert!(text.ends_with("    );\n}\n"));
    }

    #[test]
    fn test_node_count_mismatch() {
        let result = TopologyComposer::default().compose(&nodes(&["10.0.0.1"]), 2);
        assert_eq!(result, Err(ComposeError::NodeCountMismatch { declared: 2, actual: 1 }));
    }

    #[test]
    fn test_custom_settings() {
        let settings = ComposerSettings {
            reactor_name: "Lab".to_string(),
            target: "C".to_string(),
            capture_rate: Duration::from_millis(100),
            deploy_user: "pi".to_string(),
            coordinator_class: "Hub".to_string(),
            node_class: "Camera".to_string(),
        };
        let text = TopologyComposer::new(settings).compose(&nodes(&["10.0.0.9"]), 1).unwrap().to_string();

        assert!(text.starts_with("target C {"));
        assert!(text.contains("import Camera from \"Camera.lf\"\nimport Hub from \"Hub.lf\""));
        assert!(text.contains("federated reactor Lab ("));
        assert!(text.contains("S = new Hub("));
        assert!(text.contains("capture_rate=100 msec"));
        assert!(text.contains("N0 = new Camera("));
        assert!(text.contains(") at pi@10.0.0.9;"));
    }

    #[test]
    fn test_persist_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Arena.lf");
        let output = TopologyComposer::default().compose(&nodes(&["10.0.0.1"]), 1).unwrap();

        persist(&output, &path).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), output.as_str());
    }

    #[test]
    fn test_persist_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Arena.lf");
        std::fs::write(&path, "stale content that is longer than nothing at all").unwrap();
        let output = GeneratedConfiguration::new("fresh".to_string(), 0);

        persist(&output, &path).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "fresh");
    }

    #[test]
    fn test_persist_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("Arena.lf");
        let output = TopologyComposer::default().compose(&[], 0).unwrap();

        let err = persist(&output, &path).unwrap_err();

        assert_eq!(err.path, path);
        assert_eq!(err.source.kind(), std::io::ErrorKind::NotFound);
        assert!(err.to_string().contains("Arena.lf"));
    }
}
