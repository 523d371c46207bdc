//! Document store: owns file existence, initialisation, and path
//! resolution for the mindmap file. The conversion engine itself only
//! ever sees strings.

use std::fs;
use std::path::{Path, PathBuf};

/// Content written when a mindmap file is created from scratch.
const DEFAULT_DOCUMENT: &str = "---\ntags: []\n---\n\n# Root\n";

const DEFAULT_FILE_NAME: &str = "lifemap.md";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("mindmap file not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Default location of the mindmap file: `lifemap.md` in the user's home
/// directory, falling back to the working directory when home is unknown.
pub fn default_document_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_FILE_NAME)
}

/// Read a mindmap document, distinguishing a missing file from other
/// failures so callers can decide whether to initialise.
pub fn read_document(path: &Path) -> Result<String, StoreError> {
    if !path.exists() {
        return Err(StoreError::NotFound(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(StoreError::Io)
}

/// Write a mindmap document, creating parent directories as needed.
pub fn write_document(path: &Path, content: &str) -> Result<(), StoreError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(StoreError::Io)?;
    }
    fs::write(path, content).map_err(StoreError::Io)
}

/// Read a mindmap document, creating it with the default outline first if
/// it doesn't exist yet. A present file is returned as-is; a missing
/// front-matter block is healed by the load path's reconciliation
/// rewrite, not here.
pub fn read_or_init_document(path: &Path) -> Result<String, StoreError> {
    if !path.exists() {
        tracing::info!(path = %path.display(), "initialising new mindmap file");
        write_document(path, DEFAULT_DOCUMENT)?;
        return Ok(DEFAULT_DOCUMENT.to_string());
    }
    fs::read_to_string(path).map_err(StoreError::Io)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn read_missing_file_is_a_distinct_error() {
        let dir = TempDir::new().unwrap();
        let result = read_document(&dir.path().join("absent.md"));
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[test]
    fn write_then_read_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("map.md");

        write_document(&path, "# Alpha\n").unwrap();
        assert_eq!(read_document(&path).unwrap(), "# Alpha\n");
    }

    #[test]
    fn write_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deeper").join("map.md");

        write_document(&path, "# Alpha\n").unwrap();
        assert_eq!(read_document(&path).unwrap(), "# Alpha\n");
    }

    #[test]
    fn init_creates_the_default_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("map.md");

        let content = read_or_init_document(&path).unwrap();
        assert_eq!(content, DEFAULT_DOCUMENT);
        assert_eq!(read_document(&path).unwrap(), DEFAULT_DOCUMENT);
    }

    #[test]
    fn init_leaves_an_existing_document_alone() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("map.md");
        write_document(&path, "# Mine\n").unwrap();

        assert_eq!(read_or_init_document(&path).unwrap(), "# Mine\n");
    }

    #[test]
    fn default_document_loads_into_a_single_root() {
        let loaded = crate::api::load_mindmap(DEFAULT_DOCUMENT);
        assert_eq!(loaded.mindmap.nodes.len(), 1);
        assert_eq!(loaded.mindmap.nodes[0].text, "Root");
        assert!(loaded.available_tags.is_empty());
    }

    #[test]
    fn default_path_points_at_the_lifemap_file() {
        assert_eq!(
            default_document_path().file_name().unwrap(),
            DEFAULT_FILE_NAME
        );
    }
}
