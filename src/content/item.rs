use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::metadata::Metadata;
use crate::types::identifiers::{ContentVersion, ItemId};

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("Content must be valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
    #[error("Content has no non-blank lines")]
    Empty,
}

/// A static unit of displayable text, e.g. one haiku.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: ItemId,
    pub version: ContentVersion,
    pub lines: Vec<String>,
    pub metadata: Metadata,
}

impl ContentItem {
    /// Build an item from its lines.
    ///
    /// This is the constructor every other path goes through; the version is
    /// always computed here from the lines as given.
    pub fn ingest(
        id: ItemId,
        lines: Vec<String>,
        metadata: Metadata,
    ) -> Result<Self, ContentError> {
        if lines.iter().all(|line| line.trim().is_empty()) {
            return Err(ContentError::Empty);
        }

        let version = ContentVersion::from_lines(&lines);

        Ok(ContentItem {
            id,
            version,
            lines,
            metadata,
        })
    }

    /// Ingest raw bytes, one line per `\n` (a trailing `\r` is dropped).
    pub fn ingest_text(
        id: ItemId,
        raw_content: Vec<u8>,
        metadata: Metadata,
    ) -> Result<Self, ContentError> {
        let content = String::from_utf8(raw_content)?;

        let mut lines: Vec<String> = content.lines().map(str::to_string).collect();
        while lines.last().is_some_and(|line| line.trim().is_empty()) {
            lines.pop();
        }

        Self::ingest(id, lines, metadata)
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}
