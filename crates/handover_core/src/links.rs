use once_cell::sync::Lazy;
use regex::Regex;

static URL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://[^\s]+").expect("valid url pattern"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Link(String),
}

/// Splits text into literal runs and `http(s)://` links, in order.
///
/// Matching is greedy up to the next whitespace, so trailing punctuation stays
/// part of the link.
pub fn annotate(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut cursor = 0;
    for found in URL_PATTERN.find_iter(text) {
        if found.start() > cursor {
            segments.push(Segment::Literal(text[cursor..found.start()].to_string()));
        }
        segments.push(Segment::Link(found.as_str().to_string()));
        cursor = found.end();
    }
    if cursor < text.len() {
        segments.push(Segment::Literal(text[cursor..].to_string()));
    }
    segments
}

/// Rewrites every link in `text` into an anchor; literal text is left verbatim.
pub fn annotate_markup(text: &str) -> String {
    if !URL_PATTERN.is_match(text) {
        return text.to_string();
    }
    annotate(text)
        .into_iter()
        .map(|segment| match segment {
            Segment::Literal(literal) => literal,
            Segment::Link(url) => anchor(&url),
        })
        .collect()
}

fn anchor(url: &str) -> String {
    format!(r#"<a target="_blank" rel="noopener noreferrer" href="{url}">{url}</a>"#)
}
