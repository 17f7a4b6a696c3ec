//! URL detection in output text.

use regex::Regex;
use std::sync::LazyLock;

static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\b(?:https?|ftp|file)://[^\s<>"'`]+|\bwww\.[^\s<>"'`]+"#).unwrap()
});

/// Punctuation that usually ends a sentence rather than a URL.
const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', '\'', '"'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(&'a str),
    Link(&'a str),
}

/// Split `content` into plain text and link segments, in order.
pub fn segments(content: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut cursor = 0;

    for m in URL_RE.find_iter(content) {
        let link = trim_link(m.as_str());
        if link.is_empty() {
            continue;
        }
        let start = m.start();
        let end = start + link.len();
        if start > cursor {
            out.push(Segment::Text(&content[cursor..start]));
        }
        out.push(Segment::Link(link));
        cursor = end;
    }

    if cursor < content.len() {
        out.push(Segment::Text(&content[cursor..]));
    }
    out
}

/// Drop trailing punctuation and closing brackets that have no opening partner in the link.
fn trim_link(link: &str) -> &str {
    let mut trimmed = link;
    loop {
        let Some(last) = trimmed.chars().last() else {
            return trimmed;
        };
        let unbalanced = match last {
            ')' => trimmed.matches('(').count() < trimmed.matches(')').count(),
            ']' => trimmed.matches('[').count() < trimmed.matches(']').count(),
            '}' => trimmed.matches('{').count() < trimmed.matches('}').count(),
            c => TRAILING_PUNCTUATION.contains(&c),
        };
        if !unbalanced {
            return trimmed;
        }
        trimmed = &trimmed[..trimmed.len() - last.len_utf8()];
    }
}
