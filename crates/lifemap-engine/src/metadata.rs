//! Front-matter codec for the tag registry.
//!
//! A mindmap document may start with a delimited metadata block:
//!
//! ```text
//! ---
//! tags: ["personal", "work"]
//! ---
//! ```
//!
//! followed by one blank separator line. The only declaration currently
//! carried is the tag registry, stored as a JSON array.

use indexmap::IndexSet;
use regex::Regex;
use std::sync::LazyLock;

static FRONT_MATTER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A---\n((?:[^\n]*\n)*?)---\n").expect("front-matter pattern"));

/// The metadata block at the start of a mindmap document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter {
    pub tags: IndexSet<String>,
}

impl FrontMatter {
    pub fn new(tags: IndexSet<String>) -> Self {
        Self { tags }
    }

    /// Split a document into its front-matter and body.
    ///
    /// Total: a missing block yields an empty registry and the whole
    /// input as body, and an unparsable tag array degrades to the empty
    /// registry rather than failing. When the block is present, the one
    /// blank separator line after it is consumed as well, so
    /// `parse(render(tags) + body)` gives back `(tags, body)` exactly.
    pub fn parse(input: &str) -> (Self, &str) {
        let Some(captures) = FRONT_MATTER_RE.captures(input) else {
            return (Self::default(), input);
        };

        let mut tags = IndexSet::new();
        let declarations = captures.get(1).map_or("", |m| m.as_str());
        for line in declarations.lines() {
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            if key.trim() != "tags" {
                continue;
            }
            match serde_json::from_str::<Vec<String>>(value.trim()) {
                Ok(parsed) => tags.extend(parsed),
                Err(err) => {
                    tracing::warn!(%err, "unparsable tag registry in front-matter, treating as empty");
                }
            }
        }

        let block_end = captures.get(0).map_or(0, |m| m.end());
        let body = &input[block_end..];
        let body = body.strip_prefix('\n').unwrap_or(body);
        (Self { tags }, body)
    }

    /// Render the block back out: marker lines always, the `tags:` line
    /// only when the registry is non-empty, then one blank line.
    pub fn render(&self) -> String {
        let mut out = String::from("---\n");
        if !self.tags.is_empty() {
            let array =
                serde_json::to_string(&self.tags).unwrap_or_else(|_| String::from("[]"));
            out.push_str("tags: ");
            out.push_str(&array);
            out.push('\n');
        }
        out.push_str("---\n\n");
        out
    }
}
