use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::text;

static BLOCK_OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<(h[1-6]|p|ul|ol|hr)(\s[^>]*)?/?>").unwrap());
static ID_ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)\bid\s*=\s*["']([^"']*)["']"#).unwrap());
static CLOSE_P_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)</p\s*>").unwrap());
static CLOSE_H_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)</h[1-6]\s*>").unwrap());
static UL_TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<(/?)ul\b[^>]*>").unwrap());
static OL_TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<(/?)ol\b[^>]*>").unwrap());
static LI_TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<(/?)li\b[^>]*>").unwrap());

/// Minimal block-level node kinds found in markdown-rendered HTML. Inner
/// markup is kept verbatim; list items carry each `<li>`'s inner HTML.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Heading {
        level: u8,
        id: Option<String>,
        html: String,
    },
    Paragraph {
        html: String,
    },
    List {
        ordered: bool,
        items: Vec<String>,
    },
    Rule,
    Text(String),
}

impl Node {
    pub fn plain_text(&self) -> String {
        match self {
            Node::Heading { html, .. } | Node::Paragraph { html } => text::strip_tags(html),
            Node::List { items, .. } => items
                .iter()
                .map(|i| text::strip_tags(i))
                .collect::<Vec<_>>()
                .join(" "),
            Node::Rule => String::new(),
            Node::Text(t) => text::strip_tags(t),
        }
    }

    pub fn outer_html(&self) -> String {
        match self {
            Node::Heading { level, id, html } => match id {
                Some(id) => format!("<h{level} id=\"{id}\">{html}</h{level}>"),
                None => format!("<h{level}>{html}</h{level}>"),
            },
            Node::Paragraph { html } => format!("<p>{html}</p>"),
            Node::List { ordered, items } => {
                let tag = if *ordered { "ol" } else { "ul" };
                let body: String = items.iter().map(|i| format!("<li>{i}</li>")).collect();
                format!("<{tag}>{body}</{tag}>")
            }
            Node::Rule => "<hr>".to_string(),
            Node::Text(t) => t.clone(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Node::Heading { .. } => "heading",
            Node::Paragraph { .. } => "paragraph",
            Node::List { .. } => "list",
            Node::Rule => "rule",
            Node::Text(_) => "text",
        }
    }
}

/// Tokenize one rendered-HTML fragment into a flat block-node sequence.
/// Single pass, no DOM; unclosed tags degrade to consuming the remainder.
pub fn parse_fragment(html: &str) -> Vec<Node> {
    let mut nodes = Vec::new();
    let mut pos = 0;

    while pos < html.len() {
        let Some(open) = BLOCK_OPEN_RE.find_at(html, pos) else {
            push_text(&html[pos..], &mut nodes);
            break;
        };
        push_text(&html[pos..open.start()], &mut nodes);

        let caps = BLOCK_OPEN_RE.captures(&html[open.start()..open.end()]).unwrap();
        let tag = caps[1].to_lowercase();
        let attrs = caps.get(2).map(|m| m.as_str()).unwrap_or("");
        let body_start = open.end();

        match tag.as_str() {
            "hr" => {
                nodes.push(Node::Rule);
                pos = body_start;
            }
            "p" => {
                let (inner, next) = take_until(html, body_start, &CLOSE_P_RE);
                nodes.push(Node::Paragraph {
                    html: inner.trim().to_string(),
                });
                pos = next;
            }
            "ul" | "ol" => {
                let ordered = tag == "ol";
                let re = if ordered { &OL_TAG_RE } else { &UL_TAG_RE };
                let (inner, next) = take_nested(html, body_start, re);
                nodes.push(Node::List {
                    ordered,
                    items: list_items(inner),
                });
                pos = next;
            }
            _ => {
                // h1..h6
                let level = tag[1..].parse::<u8>().unwrap_or(2);
                let id = ID_ATTR_RE.captures(attrs).map(|c| c[1].to_string());
                let (inner, next) = take_until(html, body_start, &CLOSE_H_RE);
                nodes.push(Node::Heading {
                    level,
                    id,
                    html: inner.trim().to_string(),
                });
                pos = next;
            }
        }
    }

    nodes
}

/// Inner HTML up to the next close tag matching `close_re`, plus the resume
/// position. A missing close tag consumes the remainder.
fn take_until<'a>(html: &'a str, from: usize, close_re: &Regex) -> (&'a str, usize) {
    match close_re.find_at(html, from) {
        Some(close) => (&html[from..close.start()], close.end()),
        None => {
            debug!("unclosed block element, consuming remainder of fragment");
            (&html[from..], html.len())
        }
    }
}

/// Like `take_until` for tags that nest (markdown sub-lists): tracks open
/// depth via `tag_re`, whose capture 1 is "/" on close tags.
fn take_nested<'a>(html: &'a str, from: usize, tag_re: &Regex) -> (&'a str, usize) {
    let mut depth = 1;
    for caps in tag_re.captures_iter(&html[from..]) {
        let m = caps.get(0).unwrap();
        if caps[1].is_empty() {
            depth += 1;
        } else {
            depth -= 1;
            if depth == 0 {
                return (&html[from..from + m.start()], from + m.end());
            }
        }
    }
    debug!("unclosed list element, consuming remainder of fragment");
    (&html[from..], html.len())
}

/// Top-level `<li>` inner HTML, depth-aware so nested sub-list items stay
/// inside their parent item.
fn list_items(inner: &str) -> Vec<String> {
    let mut items = Vec::new();
    let mut depth = 0;
    let mut item_start = 0;

    for caps in LI_TAG_RE.captures_iter(inner) {
        let m = caps.get(0).unwrap();
        if caps[1].is_empty() {
            if depth == 0 {
                item_start = m.end();
            }
            depth += 1;
        } else if depth > 0 {
            depth -= 1;
            if depth == 0 {
                items.push(inner[item_start..m.start()].trim().to_string());
            }
        }
    }

    items
}

fn push_text(raw: &str, nodes: &mut Vec<Node>) {
    let trimmed = raw.trim();
    if !trimmed.is_empty() {
        nodes.push(Node::Text(trimmed.to_string()));
    }
}
