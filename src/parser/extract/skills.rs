use tracing::debug;

use crate::parser::nodes::{parse_fragment, Node};
use crate::records::SkillCategory;
use crate::text;

/// Build the skills taxonomy: every h2/h3 paired with the first unordered
/// list that follows it before the next h2/h3. A heading that reaches
/// another heading first has no skills and is discarded. This is the sole
/// producer of the cross-linker's vocabulary.
pub fn extract(html: &str) -> Vec<SkillCategory> {
    let nodes = parse_fragment(html);
    let mut categories = Vec::new();

    for (i, node) in nodes.iter().enumerate() {
        let Node::Heading { level: 2 | 3, .. } = node else {
            continue;
        };
        let name = node.plain_text().trim().to_string();

        let mut skills = Vec::new();
        for next in &nodes[i + 1..] {
            match next {
                Node::Heading { level: 2 | 3, .. } => break,
                Node::List { ordered: false, items } => {
                    skills = items
                        .iter()
                        .map(|item| text::strip_tags(item).trim().to_string())
                        .collect();
                    break;
                }
                _ => {}
            }
        }

        if !name.is_empty() && !skills.is_empty() {
            categories.push(SkillCategory { name, skills });
        } else {
            debug!(category = %name, "discarding heading with no skill list");
        }
    }

    categories
}
