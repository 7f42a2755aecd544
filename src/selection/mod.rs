pub mod config;
pub mod rng;
pub mod shuffle;
pub mod trig;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use tracing::{debug, warn};

use crate::content::{ContentItem, ContentPool};
use crate::types::{DailySelection, DateSeed, PoolVersion, SelectionMetadata};
pub use config::{ConfigError, DatePolicy, SelectorConfig};
pub use rng::SineRng;
pub use shuffle::{comparator_sort, shuffle_with};

/// Select the day's items from `items` with the default configuration.
///
/// Total over its inputs: an empty slice yields an empty selection.
pub fn select_daily(items: &[ContentItem], date: NaiveDate) -> DailySelection {
	DailySelector::default().select_items(items, date)
}

/// Deterministic per-day selector.
///
/// Holds only configuration. Every call builds its own generator, so a
/// single selector can be shared freely between threads.
#[derive(Debug, Clone, Default)]
pub struct DailySelector {
	config: SelectorConfig,
}

impl DailySelector {
	pub fn new(config: SelectorConfig) -> Result<Self, ConfigError> {
		config.validate()?;
		Ok(Self { config })
	}

	pub fn config(&self) -> &SelectorConfig {
		&self.config
	}

	pub fn select(&self, pool: &ContentPool, date: NaiveDate) -> DailySelection {
		self.select_versioned(pool.items(), pool.version(), date)
	}

	pub fn select_items(&self, items: &[ContentItem], date: NaiveDate) -> DailySelection {
		let version = PoolVersion::from_items(items);
		self.select_versioned(items, &version, date)
	}

	/// Select for the calendar day `instant` falls on under the configured
	/// date policy.
	pub fn select_at<Tz: TimeZone>(
		&self,
		pool: &ContentPool,
		instant: &DateTime<Tz>,
	) -> Result<DailySelection, ConfigError> {
		let date = self.config.date_policy.calendar_date(instant)?;
		Ok(self.select(pool, date))
	}

	/// Reads the clock. Everything else in this crate takes the date as input.
	pub fn select_today(&self, pool: &ContentPool) -> Result<DailySelection, ConfigError> {
		self.select_at(pool, &Utc::now())
	}

	fn select_versioned(
		&self,
		items: &[ContentItem],
		version: &PoolVersion,
		date: NaiveDate,
	) -> DailySelection {
		let seed = DateSeed::from_date(date);
		let mut rng = SineRng::new(seed.value());

		// 1. Count comes from the first draw
		let span = self.config.count_span() as f64;
		let count = (rng.next_f64() * span).floor() as usize + self.config.min_count;

		// 2. Shuffle positions; every later draw belongs to the comparator
		let mut order: Vec<usize> = (0..items.len()).collect();
		shuffle_with(&mut order, &mut rng);

		// 3. Truncate. A short pool is returned as-is, never padded
		let selected: Vec<ContentItem> = order
			.iter()
			.take(count)
			.map(|&idx| items[idx].clone())
			.collect();

		debug_assert!(selected.len() <= count && selected.len() <= items.len());

		let items_selected = selected.len();
		let shortfall = count - items_selected;
		if shortfall > 0 {
			warn!(
				%date,
				count,
				pool_size = items.len(),
				"Pool smaller than drawn count; selection truncated"
			);
		}

		debug!(
			%date,
			seed = seed.value(),
			count,
			pool_size = items.len(),
			pool_version = version.as_str(),
			"Selected daily items"
		);

		DailySelection {
			items: selected,
			count,
			selection: SelectionMetadata {
				date,
				seed: seed.value(),
				pool_version: version.as_str().to_string(),
				pool_size: items.len(),
				items_selected,
				shortfall,
			},
		}
	}
}
