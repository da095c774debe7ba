use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::parser::nodes::{parse_fragment, Node};
use crate::records::ProjectRecord;
use crate::text;

static HR_SPLIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s*<hr\s*/?>\s*").unwrap());
static STRONG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<(strong|b)\b[^>]*>").unwrap());

const ROLE_PREFIX: &str = "role:";
const TECH_PREFIX: &str = "technologies:";

/// Split a projects document on `<hr>` boundaries and parse each block into
/// at most one record. The block before the first rule is intro copy, not a
/// project. Record ids are block positions, so a stray empty block still
/// consumes an index.
pub fn extract(html: &str) -> Vec<ProjectRecord> {
    if html.trim().is_empty() {
        return Vec::new();
    }

    let mut blocks = HR_SPLIT_RE.split(html);
    blocks.next(); // intro region
    let mut projects = Vec::new();

    for (idx, block) in blocks.enumerate() {
        if block.trim().is_empty() {
            continue;
        }
        if let Some(project) = parse_block(idx, block) {
            projects.push(project);
        } else {
            debug!(block = idx, "dropping project block with no content");
        }
    }

    projects
}

fn parse_block(idx: usize, block: &str) -> Option<ProjectRecord> {
    let mut title_line = String::new();
    let mut technologies = Vec::new();
    let mut details = String::new();

    for node in parse_fragment(block) {
        let plain = node.plain_text().trim().to_string();
        match &node {
            Node::Paragraph { html }
                if STRONG_RE.is_match(html) && starts_with_ci(&plain, ROLE_PREFIX) =>
            {
                title_line = node.outer_html();
            }
            Node::Paragraph { .. } if starts_with_ci(&plain, TECH_PREFIX) => {
                technologies = text::split_tech_list(plain[TECH_PREFIX.len()..].trim());
            }
            Node::Paragraph { .. } | Node::List { .. } => details.push_str(&node.outer_html()),
            Node::Text(t) if !t.trim().is_empty() => {
                details.push_str(&format!("<p>{}</p>", t.trim()));
            }
            Node::Text(_) => {}
            _ => details.push_str(&node.outer_html()),
        }
    }

    if title_line.is_empty() && details.is_empty() && technologies.is_empty() {
        return None;
    }
    Some(ProjectRecord {
        id: format!("project-{idx}"),
        title_line,
        technologies,
        details_html: details,
    })
}

fn starts_with_ci(s: &str, prefix: &str) -> bool {
    s.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}
