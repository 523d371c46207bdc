//! Entry points for the UI/storage layer.
//!
//! The engine is stateless: every call takes document text or a tree and
//! returns new values. The caller owns the file and the "current" tag
//! registry between calls, and serialises access to a given path (the
//! load-time registry rewrite is a read-modify-write).

use indexmap::IndexSet;

use crate::metadata::FrontMatter;
use crate::models::Mindmap;
use crate::{parsing, tags};

/// Result of loading a document: the outline, the reconciled registry,
/// and the healed document text the store should write straight back.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedMindmap {
    pub mindmap: Mindmap,
    pub available_tags: IndexSet<String>,
    /// Reconciled front-matter plus the original body. Rewriting this on
    /// every load keeps the on-disk registry a superset of the tags in
    /// use even when the stored block was stale or corrupt.
    pub reconciled_document: String,
}

/// Parse a raw document into an outline and its reconciled tag registry.
///
/// Total over content: an empty or outline-free document yields the
/// default root, malformed front-matter yields an empty registry. Only
/// the storage layer can fail, and it isn't involved here.
pub fn load_mindmap(raw: &str) -> LoadedMindmap {
    let (front_matter, body) = FrontMatter::parse(raw);
    let mut mindmap = parsing::parse_document(body);
    if mindmap.is_empty() {
        tracing::debug!("document has no outline, starting from the default root");
        mindmap = Mindmap::default_root();
    }

    let available_tags = tags::reconcile(&front_matter.tags, &mindmap);
    let reconciled_document = format!(
        "{}{}",
        FrontMatter::new(available_tags.clone()).render(),
        body
    );

    LoadedMindmap {
        mindmap,
        available_tags,
        reconciled_document,
    }
}

/// Serialize an outline into document text, re-attaching the registry the
/// caller carried over from the previous load.
pub fn save_mindmap(mindmap: &Mindmap, preserved_tags: &IndexSet<String>) -> String {
    format!(
        "{}{}",
        FrontMatter::new(preserved_tags.clone()).render(),
        mindmap.to_markdown()
    )
}

/// Result of a registry-only update.
#[derive(Debug, Clone, PartialEq)]
pub struct TagUpdate {
    pub document: String,
    pub tags: IndexSet<String>,
}

/// Union new tags into the document's registry without touching the body.
/// Used when the UI introduces tags outside a full tree round-trip.
pub fn add_tags(raw: &str, new_tags: &[String]) -> TagUpdate {
    let (mut front_matter, body) = FrontMatter::parse(raw);
    front_matter.tags.extend(new_tags.iter().cloned());
    TagUpdate {
        document: format!("{}{}", front_matter.render(), body),
        tags: front_matter.tags,
    }
}
