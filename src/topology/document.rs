//! Typed sections of a generated Lingua Franca program.
//!
//! The composer describes the program as an ordered list of [`Section`]s;
//! turning them into text is the job of [`crate::topology::render`] alone.

/// `instance.port` reference used in connections
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortRef {
    pub instance: String,
    pub port: String,
}

impl PortRef {
    pub fn new(instance: impl Into<String>, port: impl Into<String>) -> Self {
        PortRef {
            instance: instance.into(),
            port: port.into(),
        }
    }
}

/// One syntactic block of the program, in output order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Section {
    /// `target <language> { ... }` with federation properties
    Target {
        language: String,
        coordination: String,
        clock_sync: bool,
    },
    /// `import <class> from "<file>"`
    Import { class: String, file: String },
    /// Opening of the federated main reactor and its parameter
    ReactorOpen { name: String, node_count: usize },
    /// Instantiation of the coordinator reactor
    Coordinator {
        instance: String,
        class: String,
        capture_rate: String,
    },
    /// Instantiation of one capture node bound to a host
    Placement {
        id: String,
        class: String,
        index: usize,
        mac_address: String,
        user: String,
        host: String,
    },
    /// Single connection from the coordinator to one node
    TriggerFanout { from: PortRef, to: PortRef },
    /// Multiport connection from all node outputs to one input
    DataFanin { sources: Vec<PortRef>, sink: PortRef },
    /// Closing brace of the main reactor
    ReactorClose,
}

/// Ordered sections making up one program
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    sections: Vec<Section>,
}

impl Document {
    pub fn builder() -> DocumentBuilder {
        DocumentBuilder::default()
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }
}

/// Appends sections in output order
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    sections: Vec<Section>,
}

impl DocumentBuilder {
    pub fn section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    pub fn sections(mut self, sections: impl IntoIterator<Item = Section>) -> Self {
        self.sections.extend(sections);
        self
    }

    pub fn build(self) -> Document {
        Document {
            sections: self.sections,
        }
    }
}
