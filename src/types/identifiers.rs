use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::content::ContentItem;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ItemIdError {
    #[error("Item id is empty")]
    Empty,
    #[error("Item id contains whitespace: {0:?}")]
    ContainsWhitespace(String),
}

impl ItemId {
    /// Create an ItemId from a raw identifier.
    ///
    /// Surrounding whitespace is trimmed and the id is lowercased, so
    /// `" Haiku-01 "` and `"haiku-01"` name the same item.
    pub fn new(raw: &str) -> Result<Self, ItemIdError> {
        let normalized = raw.trim().to_lowercase();

        if normalized.is_empty() {
            return Err(ItemIdError::Empty);
        }
        if normalized.chars().any(char::is_whitespace) {
            return Err(ItemIdError::ContainsWhitespace(normalized));
        }

        Ok(ItemId(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Content hash version of a single item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentVersion(String);

impl ContentVersion {
    /// Hash of the lines joined with `\n`.
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Self {
        let mut hasher = Sha256::new();
        for (idx, line) in lines.iter().enumerate() {
            if idx > 0 {
                hasher.update(b"\n");
            }
            hasher.update(line.as_ref().as_bytes());
        }

        ContentVersion(format!("sha256:{}", hex::encode(hasher.finalize())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Version of a whole pool.
///
/// Hashes `id:version` for every item in pool order. Order is part of the
/// identity: the daily shuffle runs over positions, so a reordered pool
/// yields different selections and must not share a version.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PoolVersion(String);

impl PoolVersion {
    pub fn from_items(items: &[ContentItem]) -> Self {
        let mut hasher = Sha256::new();
        for item in items {
            let line = format!("{}:{}\n", item.id.as_str(), item.version.as_str());
            hasher.update(line.as_bytes());
        }

        PoolVersion(format!("sha256:{}", hex::encode(hasher.finalize())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
