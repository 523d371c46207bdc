use serde::{Deserialize, Serialize};

use super::Node;

/// Text of the node synthesised when a document has no outline at all.
pub const DEFAULT_ROOT_TEXT: &str = "Root";

/// The whole outline: the children of a synthetic root that is never
/// materialised or written out. `nodes[0]` is the first top-level heading.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mindmap {
    pub nodes: Vec<Node>,
}

impl Mindmap {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    /// The degenerate outline used when a document is missing or empty.
    pub fn default_root() -> Self {
        Self::new(vec![Node::new(DEFAULT_ROOT_TEXT)])
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Serialize the outline back into its canonical markdown form.
    ///
    /// Every node becomes a heading block: `#` markers matching its depth
    /// (top-level nodes are depth 1, with no upper bound — depth is never
    /// downgraded to list syntax), the node text (wrapped as
    /// `[text](link)` when a link is set), a `tags:` line when the node
    /// has tags, and a blank separator line. Legacy inline-brace tags and
    /// bullet items are accepted on load but never emitted.
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            write_node(&mut out, node, 1);
        }
        out
    }
}

fn write_node(out: &mut String, node: &Node, depth: usize) {
    out.push_str(&"#".repeat(depth));
    out.push(' ');
    match &node.link {
        Some(link) => out.push_str(&format!("[{}]({})", node.text, link)),
        None => out.push_str(&node.text),
    }
    out.push('\n');
    if !node.tags.is_empty() {
        out.push_str("tags: ");
        out.push_str(&node.tags.join(", "));
        out.push('\n');
    }
    out.push('\n');
    for child in &node.children {
        write_node(out, child, depth + 1);
    }
}
