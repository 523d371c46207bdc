//! Whole-file lifecycle: initialise, load, self-heal, edit, save, reload.

use lifemap_engine::models::Node;
use lifemap_engine::{io, load_mindmap, save_mindmap};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

#[test]
fn first_run_initialises_and_loads_the_default_outline() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("lifemap.md");

    let raw = io::read_or_init_document(&path).unwrap();
    let loaded = load_mindmap(&raw);

    assert_eq!(loaded.mindmap.nodes.len(), 1);
    assert_eq!(loaded.mindmap.nodes[0].text, "Root");
    assert!(loaded.available_tags.is_empty());
}

#[test]
fn load_rewrite_heals_a_stale_registry_on_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("lifemap.md");
    // Registry on disk is missing the tags assigned in the outline.
    io::write_document(&path, "---\ntags: [\"x\"]\n---\n\n# Alpha\ntags: personal\n\n").unwrap();

    let raw = io::read_document(&path).unwrap();
    let loaded = load_mindmap(&raw);
    io::write_document(&path, &loaded.reconciled_document).unwrap();

    let healed = io::read_document(&path).unwrap();
    assert!(healed.starts_with("---\ntags: [\"x\",\"personal\"]\n---\n\n"));

    // A second cycle must be a fixed point.
    let reloaded = load_mindmap(&healed);
    assert_eq!(reloaded.reconciled_document, healed);
}

#[test]
fn edit_save_reload_preserves_the_outline_and_registry() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("lifemap.md");
    let raw = io::read_or_init_document(&path).unwrap();
    let mut loaded = load_mindmap(&raw);

    // Simulate the UI adding a tagged child under the root.
    loaded.mindmap.nodes[0]
        .children
        .push(Node::new("Errands").with_tags(["personal"]));
    let registry = lifemap_engine::tags::reconcile(&loaded.available_tags, &loaded.mindmap);
    io::write_document(&path, &save_mindmap(&loaded.mindmap, &registry)).unwrap();

    let reloaded = load_mindmap(&io::read_document(&path).unwrap());
    assert_eq!(reloaded.mindmap, loaded.mindmap);
    assert_eq!(reloaded.available_tags, registry);
}

#[test]
fn repeated_load_save_cycles_reach_a_fixed_point() {
    let original = "---\ntags: [\"x\"]\n---\n\n# Alpha {personal}\n## Beta\ntags: work, urgent\n\n";

    let first = load_mindmap(original);
    let saved = save_mindmap(&first.mindmap, &first.available_tags);
    let second = load_mindmap(&saved);
    let saved_again = save_mindmap(&second.mindmap, &second.available_tags);

    assert_eq!(second.mindmap, first.mindmap);
    assert_eq!(second.available_tags, first.available_tags);
    assert_eq!(saved_again, saved);
}
