use indexmap::IndexSet;

use crate::models::{Mindmap, Node};

/// Build an insertion-ordered tag set from literals.
pub fn tag_set(tags: &[&str]) -> IndexSet<String> {
    tags.iter().map(|tag| tag.to_string()).collect()
}

/// The two-node outline used across scenario tests.
pub fn sample_mindmap() -> Mindmap {
    Mindmap::new(vec![
        Node::new("Alpha")
            .with_tags(["personal"])
            .with_children(vec![Node::new("Beta").with_tags(["work", "urgent"])]),
    ])
}
