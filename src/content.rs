use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::warn;

use crate::frontmatter;
use crate::parser::extract::SiteContent;
use crate::records::PostMeta;

/// Load the four rendered documents plus post front matter. A missing
/// document file degrades to an empty fragment (the extractors then emit
/// nothing for it); only an unreadable posts directory is a hard error.
pub fn load_site(content_dir: &Path, posts_dir: Option<&Path>) -> Result<SiteContent> {
    Ok(SiteContent {
        skills_html: read_doc(content_dir, "skills.html"),
        experience_html: read_doc(content_dir, "experience.html"),
        projects_html: read_doc(content_dir, "projects.html"),
        about_html: read_doc(content_dir, "about.html"),
        posts: match posts_dir {
            Some(dir) => load_posts(dir)?,
            None => Vec::new(),
        },
    })
}

fn read_doc(dir: &Path, name: &str) -> String {
    match fs::read_to_string(dir.join(name)) {
        Ok(html) => html,
        Err(err) => {
            warn!(%name, %err, "content document missing, extractor will see it empty");
            String::new()
        }
    }
}

/// Read every .md file in the posts directory (sorted by file name) and
/// parse its front matter. Slug = file stem, like the site build.
pub fn load_posts(dir: &Path) -> Result<Vec<PostMeta>> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("reading posts directory {}", dir.display()))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "md"))
        .collect();
    paths.sort();

    let pb = ProgressBar::new(paths.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} posts")
            .unwrap()
            .progress_chars("#>-"),
    );

    let posts: Vec<PostMeta> = paths
        .par_iter()
        .map(|path| {
            let raw = match fs::read_to_string(path) {
                Ok(raw) => raw,
                Err(err) => {
                    warn!(path = %path.display(), %err, "unreadable post, treating as empty");
                    String::new()
                }
            };
            let fm = frontmatter::parse(&raw);
            let slug = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default()
                .to_string();
            pb.inc(1);
            PostMeta {
                title: fm.title.unwrap_or_else(|| slug.clone()),
                slug,
                date: fm.date,
                tags: fm.tags,
            }
        })
        .collect();

    pb.finish_and_clear();
    Ok(posts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn posts_fixture_sorted_by_file_name() {
        let posts = load_posts(Path::new("tests/fixtures/posts")).unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].slug, "going-static");
        assert_eq!(posts[0].title, "Going Static with Gatsby");
        assert_eq!(posts[0].tags, vec!["Gatsby", "React"]);
        assert_eq!(posts[1].slug, "shipping-go-services");
        assert_eq!(posts[1].tags, vec!["Go", "Docker"]);
    }

    #[test]
    fn load_site_tolerates_missing_documents() {
        let site = load_site(Path::new("tests/fixtures/nonexistent"), None).unwrap();
        assert!(site.skills_html.is_empty());
        assert!(site.posts.is_empty());
    }

    #[test]
    fn load_site_reads_fixture_documents() {
        let site = load_site(
            Path::new("tests/fixtures"),
            Some(Path::new("tests/fixtures/posts")),
        )
        .unwrap();
        assert!(site.skills_html.contains("<h2>Languages</h2>"));
        assert!(site.experience_html.contains("Acme Corp"));
        assert_eq!(site.posts.len(), 2);
    }

    #[test]
    fn missing_posts_dir_is_an_error() {
        assert!(load_posts(Path::new("tests/fixtures/no-such-dir")).is_err());
    }
}
