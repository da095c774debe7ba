mod content;
mod frontmatter;
mod parser;
mod records;
mod text;

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use parser::extract::{extract_site, ExtractedSite};

#[derive(Parser)]
#[command(
    name = "portfolio_extractor",
    about = "Extracts structured records from a portfolio site's rendered markdown"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every extractor and emit the JSON bundle
    Process {
        /// Directory holding skills.html / experience.html / projects.html / about.html
        #[arg(short, long)]
        content: PathBuf,
        /// Directory of blog-post markdown files (front matter only is read)
        #[arg(short, long)]
        posts: Option<PathBuf>,
        /// Output file (default: stdout)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Show cross-links for one skill, or every linked skill
    Crosslink {
        #[arg(short, long)]
        content: PathBuf,
        #[arg(short, long)]
        posts: Option<PathBuf>,
        /// Skill name (exact, case-sensitive as authored)
        #[arg(short, long)]
        skill: Option<String>,
    },
    /// Extraction counts overview
    Stats {
        #[arg(short, long)]
        content: PathBuf,
        #[arg(short, long)]
        posts: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Process { content, posts, out } => {
            let site = content::load_site(&content, posts.as_deref())?;
            let extracted = extract_site(&site);
            let json = serde_json::to_string_pretty(&extracted)?;
            match out {
                Some(path) => {
                    fs::write(&path, json)
                        .with_context(|| format!("writing {}", path.display()))?;
                    println!(
                        "Wrote {} categories, {} jobs, {} projects, {} sections, {} posts to {}",
                        extracted.skill_categories.len(),
                        extracted.jobs.len(),
                        extracted.projects.len(),
                        extracted.about_sections.len(),
                        extracted.posts.len(),
                        path.display()
                    );
                }
                None => println!("{json}"),
            }
            Ok(())
        }
        Commands::Crosslink { content, posts, skill } => {
            let site = content::load_site(&content, posts.as_deref())?;
            let extracted = extract_site(&site);
            match skill {
                Some(name) => print_skill(&extracted, &name),
                None => {
                    for (name, links) in &extracted.crosslinks {
                        println!(
                            "{:<28} {:>2} posts | {:>2} jobs | {:>2} projects",
                            truncate(name, 28),
                            links.posts.len(),
                            links.jobs.len(),
                            links.projects.len()
                        );
                    }
                    println!("\n{} linked skills", extracted.crosslinks.len());
                }
            }
            Ok(())
        }
        Commands::Stats { content, posts } => {
            let site = content::load_site(&content, posts.as_deref())?;
            let extracted = extract_site(&site);

            println!("{:>3} | {:<28} | {:>6} | {:>6}", "#", "Category", "Skills", "Linked");
            println!("{}", "-".repeat(54));
            for (i, cat) in extracted.skill_categories.iter().enumerate() {
                let linked = cat
                    .skills
                    .iter()
                    .filter(|s| extracted.crosslinks.contains_key(*s))
                    .count();
                println!(
                    "{:>3} | {:<28} | {:>6} | {:>6}",
                    i + 1,
                    truncate(&cat.name, 28),
                    cat.skills.len(),
                    linked
                );
            }

            println!();
            println!("Jobs:      {}", extracted.jobs.len());
            println!("Projects:  {}", extracted.projects.len());
            println!("Sections:  {}", extracted.about_sections.len());
            println!("Posts:     {}", extracted.posts.len());
            Ok(())
        }
    }
}

fn print_skill(extracted: &ExtractedSite, name: &str) {
    let Some(links) = extracted.crosslinks.get(name) else {
        println!("No content linked to '{name}'.");
        return;
    };
    if !links.posts.is_empty() {
        println!("Posts:");
        for p in &links.posts {
            println!("  /blog/{} — {}", p.slug, p.title);
        }
    }
    if !links.jobs.is_empty() {
        println!("Experience:");
        for j in &links.jobs {
            println!("  /experience#{} — {}", j.anchor, j.title);
        }
    }
    if !links.projects.is_empty() {
        println!("Projects:");
        for p in &links.projects {
            println!("  /projects#{} — {}", p.anchor, p.title);
        }
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}
