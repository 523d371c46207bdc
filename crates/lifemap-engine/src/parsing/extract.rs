//! Splits a heading's or list item's raw text into display text, an
//! optional link target, and legacy inline tags.

use regex::Regex;
use std::sync::LazyLock;

static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("link pattern"));

static TAG_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([^{}]*)\}\s*$").expect("tag block pattern"));

/// The pieces of one raw outline entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extracted {
    pub text: String,
    pub link: Option<String>,
    pub tags: Vec<String>,
}

/// Pull apart `raw` into text, link, and inline tags.
///
/// A trailing `{a, b}` brace block is stripped first, so a tag block can
/// never end up inside a link target; then the first `[label](target)`
/// match replaces the candidate text with `label` and yields the link.
/// Markup that doesn't match either pattern is left in the text verbatim.
pub fn extract(raw: &str) -> Extracted {
    let raw = raw.trim();

    let (candidate, tags) = match TAG_BLOCK_RE.captures(raw) {
        Some(captures) => {
            let block_start = captures.get(0).map_or(raw.len(), |m| m.start());
            let tags = captures
                .get(1)
                .map_or("", |m| m.as_str())
                .split(',')
                .map(str::trim)
                .filter(|tag| !tag.is_empty())
                .map(String::from)
                .collect();
            (raw[..block_start].trim_end(), tags)
        }
        None => (raw, Vec::new()),
    };

    match LINK_RE.captures(candidate) {
        Some(captures) => Extracted {
            text: captures[1].to_string(),
            link: Some(captures[2].to_string()),
            tags,
        },
        None => Extracted {
            text: candidate.to_string(),
            link: None,
            tags,
        },
    }
}
