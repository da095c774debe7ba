use crate::parser::nodes::{parse_fragment, Node};
use crate::records::{PostMeta, PostRef, SectionRef, SkillCrossLinkIndex, SkillLinks};
use crate::text;

/// One h2/h3-bounded span of a document, flattened for matching. `text` is
/// the lowercased heading text plus all sibling plain text up to the next
/// h2/h3; `anchor` is the heading's id attribute or a slug of its title.
#[derive(Debug, Clone, PartialEq)]
pub struct DocSection {
    pub title: String,
    pub anchor: String,
    pub text: String,
}

pub fn doc_sections(html: &str) -> Vec<DocSection> {
    let nodes = parse_fragment(html);
    let mut sections = Vec::new();

    for (i, node) in nodes.iter().enumerate() {
        let Node::Heading { level: 2 | 3, id, .. } = node else {
            continue;
        };
        let title = node.plain_text().trim().to_string();
        if title.is_empty() {
            continue;
        }
        let anchor = id.clone().unwrap_or_else(|| text::slugify(&title));

        let mut body = title.clone();
        for next in &nodes[i + 1..] {
            if matches!(next, Node::Heading { level: 2 | 3, .. }) {
                break;
            }
            body.push(' ');
            body.push_str(&next.plain_text());
        }

        sections.push(DocSection {
            title,
            anchor,
            text: body.to_lowercase(),
        });
    }

    sections
}

/// Build the skill cross-link index. Two deliberately different rules:
/// posts need an exact case-insensitive tag match, job/project sections need
/// only the skill as a case-insensitive substring of the section text. The
/// substring rule is naive on purpose ("go" matches inside "mongo") and
/// must not be tightened without changing user-visible link sets.
pub fn build_index(
    skills: &[String],
    job_sections: &[DocSection],
    project_sections: &[DocSection],
    posts: &[PostMeta],
) -> SkillCrossLinkIndex {
    let lowered: Vec<String> = skills.iter().map(|s| s.to_lowercase()).collect();
    let mut index = SkillCrossLinkIndex::new();

    for post in posts {
        let tags: Vec<String> = post.tags.iter().map(|t| t.to_lowercase()).collect();
        for (skill, lower) in skills.iter().zip(&lowered) {
            if !tags.iter().any(|t| t == lower) {
                continue;
            }
            let links = index.entry(skill.clone()).or_default();
            if !links.posts.iter().any(|p| p.slug == post.slug) {
                links.posts.push(PostRef {
                    slug: post.slug.clone(),
                    title: post.title.clone(),
                });
            }
        }
    }

    link_sections(&mut index, skills, &lowered, job_sections, |l| &mut l.jobs);
    link_sections(&mut index, skills, &lowered, project_sections, |l| {
        &mut l.projects
    });
    index
}

fn link_sections(
    index: &mut SkillCrossLinkIndex,
    skills: &[String],
    lowered: &[String],
    sections: &[DocSection],
    pick: fn(&mut SkillLinks) -> &mut Vec<SectionRef>,
) {
    for section in sections {
        for (skill, lower) in skills.iter().zip(lowered) {
            if !section.text.contains(lower.as_str()) {
                continue;
            }
            let refs = pick(index.entry(skill.clone()).or_default());
            if !refs.iter().any(|r| r.title == section.title) {
                refs.push(SectionRef {
                    title: section.title.clone(),
                    anchor: section.anchor.clone(),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(slug: &str, title: &str, tags: &[&str]) -> PostMeta {
        PostMeta {
            slug: slug.to_string(),
            title: title.to_string(),
            date: None,
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn skills(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn post_match_is_exact_tag_only() {
        let posts = vec![
            post("a", "Tagged Go", &["go"]),
            post("b", "Tagged Golang", &["Golang"]),
        ];
        let index = build_index(&skills(&["Go"]), &[], &[], &posts);
        let links = &index["Go"];
        assert_eq!(links.posts.len(), 1);
        assert_eq!(links.posts[0].slug, "a");
    }

    #[test]
    fn section_match_is_naive_substring() {
        let sections = doc_sections(
            "<h2>backup-tool</h2><p>Dumps a mongo replica set nightly.</p>",
        );
        let index = build_index(&skills(&["Go"]), &[], &sections, &[]);
        // "go" sits inside "mongo"; the known false positive is kept as-is
        assert_eq!(index["Go"].projects.len(), 1);
        assert_eq!(index["Go"].projects[0].anchor, "backup-tool");
    }

    #[test]
    fn heading_text_participates_in_matching() {
        let sections = doc_sections("<h2>Rust tooling</h2><p>notes</p>");
        let index = build_index(&skills(&["Rust"]), &sections, &[], &[]);
        assert_eq!(index["Rust"].jobs.len(), 1);
    }

    #[test]
    fn duplicate_targets_suppressed() {
        // duplicate skill entries in the vocabulary must not double-link
        let posts = vec![post("a", "Go post", &["Go"])];
        let sections = doc_sections("<h2>Go things</h2><p>go go go</p>");
        let index = build_index(&skills(&["Go", "Go"]), &sections, &[], &posts);
        assert_eq!(index["Go"].posts.len(), 1);
        assert_eq!(index["Go"].jobs.len(), 1);
    }

    #[test]
    fn anchor_prefers_heading_id() {
        let sections = doc_sections("<h2 id=\"job-3\">Acme Corp</h2><p>x</p>");
        assert_eq!(sections[0].anchor, "job-3");
        let sections = doc_sections("<h2>Acme Corp</h2><p>x</p>");
        assert_eq!(sections[0].anchor, "acme-corp");
    }

    #[test]
    fn unmatched_skills_absent_from_index() {
        let index = build_index(&skills(&["Erlang"]), &[], &[], &[]);
        assert!(index.is_empty());
    }

    #[test]
    fn empty_document_yields_no_sections() {
        assert!(doc_sections("").is_empty());
        assert!(doc_sections("<p>no headings here</p>").is_empty());
    }
}
