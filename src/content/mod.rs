pub mod builtin;
pub mod item;
pub mod metadata;
pub mod pool;

pub use crate::types::identifiers::{ContentVersion, ItemId, PoolVersion};
pub use builtin::haikus;
pub use item::{ContentError, ContentItem};
pub use metadata::{Metadata, MetadataValue};
pub use pool::{ContentPool, PoolError};
