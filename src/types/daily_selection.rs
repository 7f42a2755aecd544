use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::content::ContentItem;

/// The items shown for one calendar day.
///
/// Recomputed on every request and never persisted. `count` is the drawn
/// count; `items` holds at most `count` entries and fewer when the pool is
/// smaller than the draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySelection {
    pub items: Vec<ContentItem>,
    pub count: usize,
    pub selection: SelectionMetadata,
}

impl DailySelection {
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.id.as_str())
    }
}

/// Describes how a selection was produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionMetadata {
    pub date: NaiveDate,
    pub seed: i64,

    pub pool_version: String,
    pub pool_size: usize,

    pub items_selected: usize,
    /// Drawn count minus items actually returned. Non-zero only for pools
    /// smaller than the draw.
    pub shortfall: usize,
}
