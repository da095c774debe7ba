use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

/// Titled span of an about-style document. Body markup is preserved verbatim
/// so inline links survive into rendering; contact lists are pulled out
/// separately as `list_items`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionRecord {
    pub title: String,
    pub body_html: Vec<String>,
    pub list_items: Vec<String>,
}

/// One work-experience entry, built from a `**Company** | Title | Location |
/// Dates` header line and the list that follows it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobRecord {
    pub id: String,
    pub company: String,
    pub title: String,
    pub location: String,
    pub dates: String,
    pub responsibilities: Vec<String>,
    pub technologies: Vec<String>,
}

/// One project block from an `<hr>`-separated projects document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectRecord {
    pub id: String,
    pub title_line: String,
    pub technologies: Vec<String>,
    pub details_html: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillCategory {
    pub name: String,
    pub skills: Vec<String>,
}

/// Blog-post front matter. Slug comes from the file stem, matching how the
/// site build derives page paths.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostMeta {
    pub slug: String,
    pub title: String,
    pub date: Option<NaiveDate>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostRef {
    pub slug: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionRef {
    pub title: String,
    pub anchor: String,
}

/// Related content for one skill. Post links require an exact tag match;
/// job/project links require only a substring hit in the section text.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SkillLinks {
    pub posts: Vec<PostRef>,
    pub jobs: Vec<SectionRef>,
    pub projects: Vec<SectionRef>,
}

/// Skill name → related content. Skills with no links carry no entry.
pub type SkillCrossLinkIndex = BTreeMap<String, SkillLinks>;
