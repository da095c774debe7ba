use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::parser::nodes::Node;
use crate::records::JobRecord;
use crate::text;

static STRONG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<(strong|b)\b[^>]*>(.*?)</(strong|b)\s*>").unwrap());
static EM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<(em|i)\b[^>]*>(.*?)</(em|i)\s*>").unwrap());

const TECH_PREFIX: &str = "technologies:";

/// Parse an experience document's nodes into job records.
///
/// A header line is any node carrying a bold inline element whose full text
/// contains `|`, conventionally `**Company** | Title | Location | Dates`.
/// The split therefore yields an empty part 0; title/location/dates read
/// from parts 1/2/3, which is the authoring convention and must stay 1-based.
pub fn extract(nodes: &[Node]) -> Vec<JobRecord> {
    let mut jobs: Vec<JobRecord> = Vec::new();
    let mut open = false;

    for node in nodes {
        if let Some((company, rest)) = header_fields(node) {
            let parts: Vec<String> = rest.split('|').map(|p| p.trim().to_string()).collect();
            if parts.len() < 4 {
                warn!(
                    header = %format!("{} {}", company, rest),
                    "could not fully parse job header, check delimiters"
                );
            }
            jobs.push(JobRecord {
                id: format!("job-{}", jobs.len()),
                company,
                title: parts.get(1).cloned().unwrap_or_default(),
                location: parts.get(2).cloned().unwrap_or_default(),
                dates: parts.get(3).cloned().unwrap_or_default(),
                responsibilities: Vec::new(),
                technologies: Vec::new(),
            });
            open = true;
            continue;
        }

        if !open {
            continue;
        }
        match node {
            Node::List { ordered: false, items } => {
                if let Some(job) = jobs.last_mut() {
                    consume_list(job, items);
                }
            }
            _ => debug!(kind = node.kind(), "ignoring node between job entries"),
        }
    }

    jobs.retain(|j| {
        !j.company.is_empty() || !j.responsibilities.is_empty() || !j.technologies.is_empty()
    });
    jobs
}

/// Bold element text + the remaining header text, if this node looks like a
/// job header.
fn header_fields(node: &Node) -> Option<(String, String)> {
    let html = match node {
        Node::Heading { html, .. } | Node::Paragraph { html } => html,
        _ => return None,
    };
    let caps = STRONG_RE.captures(html)?;
    let full_text = text::strip_tags(html);
    if !full_text.contains('|') {
        return None;
    }

    let bold_text = text::strip_tags(&caps[2]);
    let rest = match full_text.find(bold_text.as_str()) {
        Some(at) => &full_text[at + bold_text.len()..],
        None => full_text.as_str(),
    };
    Some((bold_text.trim().to_string(), rest.trim().to_string()))
}

/// A list following a header belongs to that job: items whose emphasized
/// text starts with "Technologies:" become the tech set, everything else is
/// a responsibility with markup kept.
fn consume_list(job: &mut JobRecord, items: &[String]) {
    for item in items {
        let tech = EM_RE.captures(item).and_then(|caps| {
            let em_text = text::strip_tags(&caps[2]);
            let trimmed = em_text.trim();
            match trimmed.get(..TECH_PREFIX.len()) {
                Some(head) if head.eq_ignore_ascii_case(TECH_PREFIX) => {
                    Some(trimmed[TECH_PREFIX.len()..].trim().to_string())
                }
                _ => None,
            }
        });

        match tech {
            Some(raw) => {
                let mut techs: Vec<String> = Vec::new();
                for t in text::split_tech_list(&raw) {
                    if !techs.contains(&t) {
                        techs.push(t);
                    }
                }
                job.technologies = techs;
            }
            None => job.responsibilities.push(item.clone()),
        }
    }
}
