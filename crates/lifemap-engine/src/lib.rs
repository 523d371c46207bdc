pub mod api;
pub mod io;
pub mod metadata;
pub mod models;
pub mod parsing;
pub mod tags;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use api::{LoadedMindmap, TagUpdate, add_tags, load_mindmap, save_mindmap};
pub use metadata::FrontMatter;
pub use models::{Mindmap, Node};
