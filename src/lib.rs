//! Deterministic date-seeded daily content selection.
//!
//! `daily-core` picks a variable-size, ordered subset of a fixed content pool
//! for a calendar date. The pick is a pure function of the pool and the date:
//! every caller asking about the same day gets the same items in the same
//! order, with no shared state, storage or coordination.
//!
//! The generator behind it is deliberately weak and must not be used where
//! unpredictability matters.

pub mod content;
pub mod selection;
pub mod types;

pub use content::{haikus, ContentItem, ContentPool};
pub use selection::{select_daily, DailySelector, SelectorConfig};
pub use types::{DailySelection, DateSeed};
