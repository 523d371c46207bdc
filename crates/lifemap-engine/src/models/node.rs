use serde::{Deserialize, Serialize};

/// One outline entry: display text, an optional link target, the tags
/// explicitly assigned to it, and its children in sibling order.
///
/// A node is owned by its parent's `children` vector (the outline root is
/// owned by the [`Mindmap`](crate::models::Mindmap)); there are no parent
/// back-references.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub text: String,
    pub link: Option<String>,
    pub tags: Vec<String>,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_all_fields() {
        let node = Node::new("Projects")
            .with_link("https://example.org")
            .with_tags(["work", "active"])
            .with_children(vec![Node::new("Backlog")]);

        assert_eq!(node.text, "Projects");
        assert_eq!(node.link.as_deref(), Some("https://example.org"));
        assert_eq!(node.tags, vec!["work", "active"]);
        assert_eq!(node.children.len(), 1);
    }

    #[test]
    fn new_node_is_bare() {
        let node = Node::new("Inbox");
        assert_eq!(node.link, None);
        assert!(node.tags.is_empty());
        assert!(node.children.is_empty());
    }
}
