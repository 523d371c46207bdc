//! Document parser: markdown body text to outline tree.
//!
//! Block tokens come from `pulldown-cmark`; the offset iterator supplies
//! each block's raw source slice so heading and item text reach the node
//! extractor verbatim (links and legacy brace tags intact). The tree is
//! rebuilt with an explicit ancestor stack of `(node, level)` frames: a
//! frame's node is pushed into the new stack top's child list when the
//! frame is popped, so every node has exactly one owner and no parent
//! back-references exist.
//!
//! Three tag syntaxes are accepted on load — a `tags:` line under a
//! heading or list item, trailing `{a, b}` braces inside the entry text,
//! and bullet-list nesting for the entries themselves — but only the
//! heading + `tags:` line form is ever written back.

pub mod extract;

use crate::models::{Mindmap, Node};
use pulldown_cmark::{Event, Parser, Tag, TagEnd};
use regex::Regex;
use std::sync::LazyLock;


/// Heading markers past CommonMark's ATX limit: the serializer emits `#`
/// runs for every depth, and markdown front-ends hand runs of 7+ back as
/// plain paragraphs.
static DEEP_HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{7,})[ \t]+(.*)$").expect("deep heading pattern"));

const TAG_LINE_PREFIX: &str = "tags:";

/// Parse a document body (front-matter already removed) into an outline.
///
/// Total over its input: malformed markup degrades to plain-text nodes
/// and content outside the outline structure is skipped, never an error.
pub fn parse_document(body: &str) -> Mindmap {
    let mut builder = TreeBuilder::new();

    for (event, range) in Parser::new(body).into_offset_iter() {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                builder.heading(level as usize, &body[range]);
            }
            Event::Start(Tag::Paragraph) => {
                builder.paragraph(&body[range]);
            }
            Event::Start(Tag::List(_)) => {
                builder.start_list();
            }
            Event::End(TagEnd::List(_)) => {
                builder.end_list();
            }
            Event::Start(Tag::Item) => {
                builder.item(&body[range]);
            }
            _ => {}
        }
    }

    builder.finish()
}

struct Frame {
    node: Node,
    level: usize,
}

/// Stack-driven tree assembly over the block token sequence.
struct TreeBuilder {
    /// Ancestor stack; `stack[0]` is the synthetic root at level 0.
    stack: Vec<Frame>,
    /// Current list nesting depth (0 = outside any list).
    list_depth: usize,
    /// Level assigned to items of the outermost open list.
    list_base: usize,
}

impl TreeBuilder {
    fn new() -> Self {
        Self {
            stack: vec![Frame {
                node: Node::default(),
                level: 0,
            }],
            list_depth: 0,
            list_base: 0,
        }
    }

    fn heading(&mut self, level: usize, raw: &str) {
        let text = heading_text(raw);
        self.push_node(level, text);
    }

    /// Paragraphs carry two outline constructs: `tags:` annotation lines
    /// for the most recent node, and deep headings (7+ markers). Inside a
    /// list block both are handled by the item's own line scan instead.
    fn paragraph(&mut self, raw: &str) {
        if self.list_depth > 0 {
            return;
        }
        for line in raw.trim().lines() {
            let line = line.trim();
            if let Some(rest) = line.strip_prefix(TAG_LINE_PREFIX) {
                self.annotate_last_node(rest);
            } else if let Some(captures) = DEEP_HEADING_RE.captures(line) {
                let level = captures.get(1).map_or(0, |m| m.as_str().len());
                self.push_node(level, captures.get(2).map_or("", |m| m.as_str()));
            }
        }
    }

    fn start_list(&mut self) {
        self.list_depth += 1;
        if self.list_depth == 1 {
            self.list_base = self.top_level() + 1;
        }
    }

    fn end_list(&mut self) {
        self.list_depth = self.list_depth.saturating_sub(1);
        if self.list_depth == 0 {
            self.pop_to(self.list_base);
        }
    }

    /// Legacy list path: an item sits one level below the enclosing stack
    /// top, with nested lists one level deeper again. The item's first
    /// raw line is the entry text; its continuation lines (up to the
    /// first blank or nested marker line) may carry a `tags:` annotation.
    fn item(&mut self, raw: &str) {
        if self.list_depth == 0 {
            // Item event without an open list; nothing sane to attach to.
            return;
        }
        let level = self.list_base + self.list_depth - 1;
        let mut lines = raw.lines();
        let text = strip_item_marker(lines.next().unwrap_or(""));
        self.push_node(level, text);

        for line in lines {
            let line = line.trim();
            if line.is_empty() || looks_like_list_marker(line) {
                break;
            }
            if let Some(rest) = line.strip_prefix(TAG_LINE_PREFIX) {
                self.annotate_last_node(rest);
            }
        }
    }

    fn finish(mut self) -> Mindmap {
        self.pop_to(1);
        let root = self.stack.swap_remove(0);
        Mindmap::new(root.node.children)
    }

    fn push_node(&mut self, level: usize, raw_text: &str) {
        let extracted = extract::extract(raw_text);
        let node = Node {
            text: extracted.text,
            link: extracted.link,
            tags: extracted.tags,
            children: Vec::new(),
        };
        self.pop_to(level);
        self.stack.push(Frame { node, level });
    }

    /// Pop frames with level >= `level`, attaching each popped node as the
    /// last child of the frame below it. An over-deep entry after a
    /// shallow one simply stays put (the "orphan deep heading" case: a
    /// level-4 heading following a level-1 heading becomes its child).
    fn pop_to(&mut self, level: usize) {
        while self.stack.len() > 1 && self.stack.last().is_some_and(|f| f.level >= level) {
            if let Some(frame) = self.stack.pop()
                && let Some(parent) = self.stack.last_mut()
            {
                parent.node.children.push(frame.node);
            }
        }
    }

    fn top_level(&self) -> usize {
        self.stack.last().map_or(0, |f| f.level)
    }

    /// A `tags:` annotation overwrites the tags of the most recently
    /// created node, wherever it now lives: the stack top if it is still
    /// open, or the deepest last child under the top if it was already
    /// attached by a pop.
    fn annotate_last_node(&mut self, rest: &str) {
        let tags = split_tag_line(rest);
        let at_root = self.stack.len() == 1;
        if let Some(top) = self.stack.last_mut() {
            if at_root && top.node.children.is_empty() {
                // No node yet; a tags line before any entry has no target.
                return;
            }
            last_created(&mut top.node).tags = tags;
        }
    }
}

/// Descend through last children to the most recently created node.
fn last_created(node: &mut Node) -> &mut Node {
    if node.children.is_empty() {
        return node;
    }
    let last = node.children.len() - 1;
    last_created(&mut node.children[last])
}

/// Both separator conventions are accepted: commas and whitespace runs.
fn split_tag_line(rest: &str) -> Vec<String> {
    rest.split(|c: char| c == ',' || c.is_whitespace())
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(String::from)
        .collect()
}

/// Raw heading block to its text: `#` markers stripped for ATX headings,
/// first line kept for the setext form.
fn heading_text(raw: &str) -> &str {
    let raw = raw.trim();
    if raw.starts_with('#') {
        raw.trim_start_matches('#').trim()
    } else {
        raw.lines().next().unwrap_or("").trim()
    }
}

fn strip_item_marker(line: &str) -> &str {
    let line = line.trim();
    for marker in ["- ", "* ", "+ "] {
        if let Some(rest) = line.strip_prefix(marker) {
            return rest.trim();
        }
    }
    // Ordered markers: digits followed by `.` or `)`.
    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if digits > 0
        && let Some(rest) = line[digits..]
            .strip_prefix('.')
            .or_else(|| line[digits..].strip_prefix(')'))
    {
        return rest.trim();
    }
    line
}

fn looks_like_list_marker(line: &str) -> bool {
    strip_item_marker(line) != line
}
