//! Tag registry reconciliation.
//!
//! The front-matter registry lists every tag *available* for assignment;
//! the tree carries the tags actually *assigned*. Reconciliation keeps the
//! registry a superset of the tree, so a stale or hand-damaged registry
//! heals itself on the next load.

use crate::models::{Mindmap, Node};
use indexmap::IndexSet;

/// Union of the stored registry and every tag assigned anywhere in the
/// outline. Pure; the caller persists the result.
pub fn reconcile(frontmatter_tags: &IndexSet<String>, mindmap: &Mindmap) -> IndexSet<String> {
    let mut registry = frontmatter_tags.clone();
    for node in &mindmap.nodes {
        collect(node, &mut registry);
    }
    registry
}

fn collect(node: &Node, registry: &mut IndexSet<String>) {
    for tag in &node.tags {
        if !tag.is_empty() {
            registry.insert(tag.clone());
        }
    }
    for child in &node.children {
        collect(child, registry);
    }
}
