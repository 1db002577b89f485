use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, TrackerError};

/// Where configuration documents come from.
pub trait DocumentSource {
    /// Fetch a document by name.
    fn fetch(&self, name: &str) -> Result<String>;
}

/// Documents served as static files from a directory.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl DocumentSource for DirSource {
    fn fetch(&self, name: &str) -> Result<String> {
        let path = self.root.join(name);
        fs::read_to_string(&path).map_err(|e| TrackerError::ConfigLoad {
            name: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

/// Documents held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    documents: HashMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, name: &str, content: &str) -> Self {
        self.documents.insert(name.to_string(), content.to_string());
        self
    }
}

impl DocumentSource for MemorySource {
    fn fetch(&self, name: &str) -> Result<String> {
        self.documents
            .get(name)
            .cloned()
            .ok_or_else(|| TrackerError::ConfigLoad {
                name: name.to_string(),
                reason: "document not found".to_string(),
            })
    }
}
