use once_cell::sync::OnceCell;
use tracing::info;

use super::pool::{ContentPool, PoolError};

const HAIKUS_JSON: &str = include_str!("../../data/haikus.json");

static HAIKUS: OnceCell<ContentPool> = OnceCell::new();

/// The fixed pool of sixty haikus shipped with the crate.
///
/// Parsed on first use and shared for the rest of the process. A parse
/// failure is returned to the caller and not cached.
pub fn haikus() -> Result<&'static ContentPool, PoolError> {
    HAIKUS.get_or_try_init(|| {
        let pool = ContentPool::from_json_str(HAIKUS_JSON)?;
        info!(
            items = pool.len(),
            version = pool.version().as_str(),
            "Loaded builtin haiku pool"
        );
        Ok(pool)
    })
}
