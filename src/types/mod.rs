pub mod daily_selection;
pub mod date_seed;
pub mod identifiers;

pub use daily_selection::{DailySelection, SelectionMetadata};
pub use date_seed::DateSeed;
pub use identifiers::{ContentVersion, ItemId, ItemIdError, PoolVersion};
