use std::collections::BTreeSet;
use std::fs;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use super::item::{ContentError, ContentItem};
use super::metadata::Metadata;
use crate::types::identifiers::{ItemId, ItemIdError, PoolVersion};

#[derive(Debug, Error)]
pub enum PoolError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Content pool is empty")]
    Empty,
    #[error("Duplicate item ID: {0}")]
    DuplicateItemId(String),
    #[error("Invalid item ID: {0}")]
    InvalidItemId(#[from] ItemIdError),
    #[error("Invalid content for item {id}: {source}")]
    Content {
        id: String,
        #[source]
        source: ContentError,
    },
}

/// On-disk shape of a pool. Versions are not stored; they are recomputed.
#[derive(Debug, Deserialize)]
struct PoolFile {
    items: Vec<PoolEntry>,
}

#[derive(Debug, Deserialize)]
struct PoolEntry {
    id: String,
    lines: Vec<String>,
    #[serde(default)]
    metadata: Metadata,
}

/// Ordered, immutable, non-empty set of content items.
///
/// Order is kept exactly as given: the daily shuffle is positional.
#[derive(Debug, Clone)]
pub struct ContentPool {
    items: Vec<ContentItem>,
    version: PoolVersion,
}

impl ContentPool {
    pub fn new(items: Vec<ContentItem>) -> Result<Self, PoolError> {
        if items.is_empty() {
            return Err(PoolError::Empty);
        }

        let mut seen = BTreeSet::new();
        for item in &items {
            if !seen.insert(&item.id) {
                return Err(PoolError::DuplicateItemId(item.id.as_str().to_string()));
            }
        }

        let version = PoolVersion::from_items(&items);
        Ok(ContentPool { items, version })
    }

    pub fn from_json_str(json: &str) -> Result<Self, PoolError> {
        let file: PoolFile = serde_json::from_str(json)?;
        Self::from_entries(file.items)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, PoolError> {
        let file: PoolFile = serde_json::from_reader(reader)?;
        Self::from_entries(file.items)
    }

    pub fn from_path(path: &Path) -> Result<Self, PoolError> {
        let f = fs::File::open(path)?;
        let pool = Self::from_reader(std::io::BufReader::new(f))?;
        info!(
            path = %path.display(),
            items = pool.len(),
            version = pool.version.as_str(),
            "Loaded content pool"
        );
        Ok(pool)
    }

    fn from_entries(entries: Vec<PoolEntry>) -> Result<Self, PoolError> {
        let mut items = Vec::with_capacity(entries.len());
        for entry in entries {
            let id = ItemId::new(&entry.id)?;
            let item = ContentItem::ingest(id, entry.lines, entry.metadata).map_err(|source| {
                PoolError::Content {
                    id: entry.id.clone(),
                    source,
                }
            })?;
            items.push(item);
        }
        Self::new(items)
    }

    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false for a constructed pool.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &ItemId) -> Option<&ContentItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub fn version(&self) -> &PoolVersion {
        &self.version
    }
}
