pub mod jobs;
pub mod projects;
pub mod skills;

use serde::Serialize;

use super::{crosslink, nodes, sections};
use crate::records::*;

/// The rendered documents one site build hands the pipeline, plus post
/// front matter. Missing documents are empty strings, never errors.
#[derive(Debug, Clone, Default)]
pub struct SiteContent {
    pub skills_html: String,
    pub experience_html: String,
    pub projects_html: String,
    pub about_html: String,
    pub posts: Vec<PostMeta>,
}

/// Everything the rendering layer consumes, recomputed from scratch on
/// every call.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractedSite {
    pub skill_categories: Vec<SkillCategory>,
    pub jobs: Vec<JobRecord>,
    pub projects: Vec<ProjectRecord>,
    pub about_sections: Vec<SectionRecord>,
    pub posts: Vec<PostMeta>,
    pub crosslinks: SkillCrossLinkIndex,
}

/// Run every extractor over one site's content. The taxonomy runs first
/// since it supplies the cross-linker's vocabulary.
pub fn extract_site(content: &SiteContent) -> ExtractedSite {
    let skill_categories = skills::extract(&content.skills_html);
    let jobs = jobs::extract(&nodes::parse_fragment(&content.experience_html));
    let projects = projects::extract(&content.projects_html);
    let about_sections = sections::parse_sections(&nodes::parse_fragment(&content.about_html));

    let vocabulary: Vec<String> = skill_categories
        .iter()
        .flat_map(|c| c.skills.iter().cloned())
        .collect();
    let crosslinks = crosslink::build_index(
        &vocabulary,
        &crosslink::doc_sections(&content.experience_html),
        &crosslink::doc_sections(&content.projects_html),
        &content.posts,
    );

    ExtractedSite {
        skill_categories,
        jobs,
        projects,
        about_sections,
        posts: content.posts.clone(),
        crosslinks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(name: &str) -> String {
        std::fs::read_to_string(format!("tests/fixtures/{name}")).unwrap()
    }

    fn site() -> SiteContent {
        SiteContent {
            skills_html: fixture("skills.html"),
            experience_html: fixture("experience.html"),
            projects_html: fixture("projects.html"),
            about_html: fixture("about.html"),
            posts: vec![
                PostMeta {
                    slug: "shipping-go-services".to_string(),
                    title: "Shipping Go Services".to_string(),
                    date: None,
                    tags: vec!["Go".to_string(), "Docker".to_string()],
                },
                PostMeta {
                    slug: "going-static".to_string(),
                    title: "Going Static with Gatsby".to_string(),
                    date: None,
                    tags: vec!["Gatsby".to_string(), "React".to_string()],
                },
            ],
        }
    }

    #[test]
    fn full_site_extraction() {
        let out = extract_site(&site());
        assert_eq!(out.skill_categories.len(), 4);
        assert_eq!(out.jobs.len(), 3);
        assert_eq!(out.projects.len(), 2);
        assert_eq!(out.about_sections.len(), 3);
        assert!(!out.crosslinks.is_empty());
    }

    #[test]
    fn crosslinks_span_all_three_target_kinds() {
        let out = extract_site(&site());
        let go = &out.crosslinks["Go"];
        assert_eq!(go.posts.len(), 1);
        assert_eq!(go.posts[0].slug, "shipping-go-services");
        // "Go" appears in the Acme tech list under the experience heading
        assert!(!go.jobs.is_empty());
        // naive substring: the mongo-backup project matches "Go" too
        assert!(go
            .projects
            .iter()
            .any(|p| p.title.contains("mongo-backup-tool")));

        let react = &out.crosslinks["React"];
        assert_eq!(react.posts[0].slug, "going-static");
    }

    #[test]
    fn empty_site_degrades_to_empty_output() {
        let out = extract_site(&SiteContent::default());
        assert!(out.skill_categories.is_empty());
        assert!(out.jobs.is_empty());
        assert!(out.projects.is_empty());
        assert!(out.about_sections.is_empty());
        assert!(out.crosslinks.is_empty());
    }

    #[test]
    fn extraction_is_deterministic() {
        let content = site();
        let a = serde_json::to_string(&extract_site(&content)).unwrap();
        let b = serde_json::to_string(&extract_site(&content)).unwrap();
        assert_eq!(a, b);
    }
}
