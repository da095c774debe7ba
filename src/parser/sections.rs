use tracing::debug;

use super::nodes::Node;
use crate::records::SectionRecord;

/// Fold a flat node sequence into titled sections. Only h2/h3 open a new
/// section; nodes before the first heading are preamble and dropped. A
/// section whose title mentions "contact" captures unordered-list items
/// separately so their markup (mailto links etc.) survives.
pub fn parse_sections(nodes: &[Node]) -> Vec<SectionRecord> {
    let mut sections: Vec<SectionRecord> = Vec::new();
    let mut current: Option<SectionRecord> = None;

    for node in nodes {
        if let Node::Heading { level: 2 | 3, .. } = node {
            if let Some(done) = current.take() {
                sections.push(done);
            }
            current = Some(SectionRecord {
                title: node.plain_text().trim().to_string(),
                body_html: Vec::new(),
                list_items: Vec::new(),
            });
            continue;
        }

        let Some(section) = current.as_mut() else {
            debug!(kind = node.kind(), "dropping preamble node before first heading");
            continue;
        };

        match node {
            Node::List { ordered: false, items }
                if section.title.to_lowercase().contains("contact") =>
            {
                section.list_items.extend(items.iter().cloned());
            }
            Node::Text(t) if t.trim().is_empty() => {}
            _ => section.body_html.push(node.outer_html()),
        }
    }

    if let Some(done) = current.take() {
        sections.push(done);
    }

    sections
}
