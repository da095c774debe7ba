use std::sync::LazyLock;

use regex::Regex;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").unwrap());
static WS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Plain-text content of an HTML fragment: tags removed, the handful of
/// entities markdown renderers actually emit decoded.
pub fn strip_tags(html: &str) -> String {
    let text = TAG_RE.replace_all(html, "");
    decode_entities(&text)
}

fn decode_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&amp;", "&")
}

pub fn collapse_ws(s: &str) -> String {
    WS_RE.replace_all(s.trim(), " ").to_string()
}

/// Anchor slug: lowercase, whitespace to hyphens, everything else but
/// [a-z0-9-] dropped. Same convention the site uses for skill hashes.
pub fn slugify(s: &str) -> String {
    let mut slug = String::with_capacity(s.len());
    for c in s.trim().to_lowercase().chars() {
        if c.is_whitespace() {
            slug.push('-');
        } else if c.is_ascii_alphanumeric() || c == '-' {
            slug.push(c);
        }
    }
    // collapse runs of hyphens from consecutive spaces/punctuation
    while slug.contains("--") {
        slug = slug.replace("--", "-");
    }
    slug.trim_matches('-').to_string()
}

/// Split a "Technologies:" value on commas and slashes, trimming each piece
/// and dropping empties. "Python, Go/Rust" → ["Python", "Go", "Rust"].
pub fn split_tech_list(s: &str) -> Vec<String> {
    s.split(|c| c == ',' || c == '/')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
