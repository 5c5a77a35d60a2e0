//! Serializer for [`Document`]s.
//!
//! All of the output grammar lives here: indentation, separators between
//! blocks and the exact spelling of each construct.

use crate::topology::document::{Document, PortRef, Section};

const INDENT: &str = "    ";

/// Render a document to program text
pub fn render(document: &Document) -> String {
    let mut out = String::new();
    let mut previous: Option<&Section> = None;

    for section in document.sections() {
        if let Some(prev) = previous {
            if needs_blank_line(prev, section) {
                out.push('\n');
            }
        }
        render_section(&mut out, section);
        previous = Some(section);
    }

    out
}

/// Blocks are separated by a blank line, except runs of imports, runs of
/// trigger lines, the first line inside the reactor and its closing brace.
fn needs_blank_line(prev: &Section, next: &Section) -> bool {
    match (prev, next) {
        (Section::Import { .. }, Section::Import { .. }) => false,
        (Section::TriggerFanout { .. }, Section::TriggerFanout { .. }) => false,
        (Section::ReactorOpen { .. }, _) => false,
        (_, Section::ReactorClose) => false,
        _ => true,
    }
}

fn port(port: &PortRef) -> String {
    format!("{}.{}", port.instance, port.port)
}

fn render_section(out: &mut String, section: &Section) {
    match section {
        Section::Target { language, coordination, clock_sync } => {
            out.push_str(&format!("target {} {{\n", language));
            out.push_str(&format!("{}coordination: {},\n", INDENT, coordination));
            out.push_str(&format!("{}clock-sync: {}\n", INDENT, if *clock_sync { "on" } else { "off" }));
            out.push_str("}\n");
        }
        Section::Import { class, file } => {
            out.push_str(&format!("import {} from \"{}\"\n", class, file));
        }
        Section::ReactorOpen { name, node_count } => {
            out.push_str(&format!("federated reactor {} (\n", name));
            out.push_str(&format!("{}node_count={}\n", INDENT, node_count));
            out.push_str(") {\n");
        }
        Section::Coordinator { instance, class, capture_rate } => {
            out.push_str(&format!("{}{} = new {}(\n", INDENT, instance, class));
            out.push_str(&format!("{0}{0}node_count=node_count,\n", INDENT));
            out.push_str(&format!("{0}{0}capture_rate={1}\n", INDENT, capture_rate));
            out.push_str(&format!("{});\n", INDENT));
        }
        Section::Placement { id, class, index, mac_address, user, host } => {
            out.push_str(&format!("{}{} = new {}(\n", INDENT, id, class));
            out.push_str(&format!("{0}{0}index={1},\n", INDENT, index));
            out.push_str(&format!("{0}{0}mac_address=\"{1}\"\n", INDENT, mac_address));
            out.push_str(&format!("{}) at {}@{};\n", INDENT, user, host));
        }
        Section::TriggerFanout { from, to } => {
            out.push_str(&format!("{}{} -> {};\n", INDENT, port(from), port(to)));
        }
        Section::DataFanin { sources, sink } => {
            let sources: Vec<String> = sources
                .iter()
                .map(|source| format!("{}{}", INDENT, port(source)))
                .collect();
            out.push_str(&sources.join(",\n"));
            out.push('\n');
            out.push_str(&format!("{}-> {};\n", INDENT, port(sink)));
        }
        Section::ReactorClose => {
            out.push_str("}\n");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_block() {
        let doc = Document::builder()
            .section(Section::Target {
                language: "Python".into(),
                coordination: "decentralized".into(),
                clock_sync: true,
            })
            .build();
        assert_eq!(
            render(&doc),
            "target Python {\n    coordination: decentralized,\n    clock-sync: on\n}\n"
        );
    }

    #[test]
    fn test_imports_are_grouped() {
        let doc = Document::builder()
            .section(Section::Import { class: "A".into(), file: "A.lf".into() })
            .section(Section::Import { class: "B".into(), file: "B.lf".into() })
            .section(Section::ReactorOpen { name: "R".into(), node_count: 0 })
            .section(Section::ReactorClose)
            .build();
        assert_eq!(
            render(&doc),
            "import A from \"A.lf\"\nimport B from \"B.lf\"\n\nfederated reactor R (\n    node_count=0\n) {\n}\n"
        );
    }

    #[test]
    fn test_placement_block() {
        let doc = Document::builder()
            .section(Section::Placement {
                id: "N3".into(),
                class: "CaptureNode".into(),
                index: 3,
                mac_address: "AA:BB:CC:DD:EE:FF".into(),
                user: "linguafranca".into(),
                host: "10.0.0.4".into(),
            })
            .build();
        assert_eq!(
            render(&doc),
            "    N3 = new CaptureNode(\n        index=3,\n        mac_address=\"AA:BB:CC:DD:EE:FF\"\n    ) at linguafranca@10.0.0.4;\n"
        );
    }

    #[test]
    fn test_trigger_lines_are_grouped_and_fanin_separated() {
        let doc = Document::builder()
            .section(Section::TriggerFanout { from: PortRef::new("S", "t"), to: PortRef::new("N0", "t") })
            .section(Section::TriggerFanout { from: PortRef::new("S", "t"), to: PortRef::new("N1", "t") })
            .section(Section::DataFanin {
                sources: vec![PortRef::new("N0", "d"), PortRef::new("N1", "d")],
                sink: PortRef::new("S", "i"),
            })
            .build();
        assert_eq!(
            render(&doc),
            "    S.t -> N0.t;\n    S.t -> N1.t;\n\n    N0.d,\n    N1.d\n    -> S.i;\n"
        );
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(render(&Document::default()), "");
    }
}
