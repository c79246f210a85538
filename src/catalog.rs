//! Known source files, looked up by base name to resolve "See Also" entries.

use crate::model::DocPage;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Where a known source file lives and which page documents it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub dir: PathBuf,
    pub page: DocPage,
}

/// Index of source files by base name (case-sensitive).
#[derive(Debug, Default)]
pub struct Catalog {
    entries: HashMap<String, CatalogEntry>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a source file. The first file registered under a base name wins.
    pub fn insert(&mut self, path: &Path, page: DocPage) {
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            return;
        };
        let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        self.entries
            .entry(stem.to_string())
            .or_insert_with(|| CatalogEntry { dir, page });
    }

    pub fn find(&self, stem: &str) -> Option<&CatalogEntry> {
        self.entries.get(stem)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
