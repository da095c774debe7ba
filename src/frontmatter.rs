use chrono::NaiveDate;

/// Metadata from a post's `---`-delimited front-matter block. Anything
/// malformed degrades to the defaults; a post without front matter is just
/// an untagged post.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub date: Option<NaiveDate>,
    pub tags: Vec<String>,
}

pub fn parse(raw: &str) -> FrontMatter {
    let mut fm = FrontMatter::default();
    let mut lines = raw.lines();

    // the opening fence must be the first non-blank line
    let opened = loop {
        match lines.next() {
            Some(line) if line.trim().is_empty() => continue,
            Some(line) => break line.trim() == "---",
            None => break false,
        }
    };
    if !opened {
        return fm;
    }

    let mut in_tags = false;
    for line in lines {
        let trimmed = line.trim();
        if trimmed == "---" {
            break;
        }

        if in_tags {
            if let Some(item) = trimmed.strip_prefix('-') {
                let item = unquote(item);
                if !item.is_empty() {
                    fm.tags.push(item);
                }
                continue;
            }
            in_tags = false;
        }

        let Some((key, value)) = trimmed.split_once(':') else {
            continue;
        };
        let value = value.trim();
        match key.trim().to_lowercase().as_str() {
            "title" => fm.title = Some(unquote(value)).filter(|t| !t.is_empty()),
            "date" => fm.date = parse_date(&unquote(value)),
            "tags" => {
                if let Some(inline) = value.strip_prefix('[') {
                    fm.tags = inline
                        .trim_end_matches(']')
                        .split(',')
                        .map(unquote)
                        .filter(|t| !t.is_empty())
                        .collect();
                } else if value.is_empty() {
                    in_tags = true;
                } else {
                    // scalar tags line: treat as a single tag
                    fm.tags = vec![unquote(value)];
                }
            }
            _ => {}
        }
    }

    fm
}

fn unquote(s: &str) -> String {
    s.trim()
        .trim_matches('"')
        .trim_matches('\'')
        .trim()
        .to_string()
}

/// Front-matter dates are `YYYY-MM-DD`, sometimes with a trailing timestamp.
fn parse_date(s: &str) -> Option<NaiveDate> {
    let head = s.get(..10)?;
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_tag_list() {
        let fm = parse("---\ntitle: \"Going Static\"\ndate: 2024-03-10\ntags: [Gatsby, React]\n---\n\nBody.");
        assert_eq!(fm.title.as_deref(), Some("Going Static"));
        assert_eq!(fm.date, NaiveDate::from_ymd_opt(2024, 3, 10));
        assert_eq!(fm.tags, vec!["Gatsby", "React"]);
    }

    #[test]
    fn dash_tag_list() {
        let fm = parse("---\ntitle: Shipping Go Services\ntags:\n  - Go\n  - Docker\ndate: 2023-11-02\n---\n");
        assert_eq!(fm.tags, vec!["Go", "Docker"]);
        assert_eq!(fm.date, NaiveDate::from_ymd_opt(2023, 11, 2));
    }

    #[test]
    fn no_front_matter() {
        assert_eq!(parse("# Just markdown\n"), FrontMatter::default());
        assert_eq!(parse(""), FrontMatter::default());
    }

    #[test]
    fn unterminated_block_keeps_what_it_saw() {
        let fm = parse("---\ntitle: Oops\ntags: [a]");
        assert_eq!(fm.title.as_deref(), Some("Oops"));
        assert_eq!(fm.tags, vec!["a"]);
    }

    #[test]
    fn timestamped_date() {
        let fm = parse("---\ndate: 2022-01-05T09:30:00Z\n---\n");
        assert_eq!(fm.date, NaiveDate::from_ymd_opt(2022, 1, 5));
    }

    #[test]
    fn garbage_date_is_none() {
        assert_eq!(parse("---\ndate: soonish\n---\n").date, None);
    }

    #[test]
    fn unknown_keys_ignored() {
        let fm = parse("---\nlayout: post\ntitle: T\ndraft: true\n---\n");
        assert_eq!(fm.title.as_deref(), Some("T"));
        assert!(fm.tags.is_empty());
    }
}
