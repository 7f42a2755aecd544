use std::fs;
use std::path::Path;

use chrono::{DateTime, FixedOffset, Local, NaiveDate, TimeZone, Utc};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Invalid count range: min {min}, max {max}")]
    InvalidCountRange { min: usize, max: usize },
    #[error("Invalid UTC offset: {0} seconds")]
    InvalidOffset(i32),
}

/// Which calendar day an instant belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DatePolicy {
    /// Every caller agrees on the UTC calendar day.
    #[default]
    Utc,
    /// The day as seen by the host's local timezone.
    Local,
    /// The day at a fixed offset east of UTC.
    FixedOffset { east_seconds: i32 },
}

impl DatePolicy {
    pub fn calendar_date<Tz: TimeZone>(
        &self,
        instant: &DateTime<Tz>,
    ) -> Result<NaiveDate, ConfigError> {
        let date = match *self {
            DatePolicy::Utc => instant.with_timezone(&Utc).date_naive(),
            DatePolicy::Local => instant.with_timezone(&Local).date_naive(),
            DatePolicy::FixedOffset { east_seconds } => {
                let offset = FixedOffset::east_opt(east_seconds)
                    .ok_or(ConfigError::InvalidOffset(east_seconds))?;
                instant.with_timezone(&offset).date_naive()
            }
        };
        Ok(date)
    }
}

// Serializable, comparable, explicit defaults.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SelectorConfig {
    pub version: String,
    pub min_count: usize,
    pub max_count: usize,
    #[serde(default)]
    pub date_policy: DatePolicy,
}

impl SelectorConfig {
    /// Five to eleven items per day, UTC calendar.
    pub fn v0() -> Self {
        Self {
            version: "1".into(),
            min_count: 5,
            max_count: 11,
            date_policy: DatePolicy::Utc,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SelectorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let f = fs::File::open(path)?;
        let config: SelectorConfig = serde_json::from_reader(std::io::BufReader::new(f))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_count == 0 || self.min_count > self.max_count {
            return Err(ConfigError::InvalidCountRange {
                min: self.min_count,
                max: self.max_count,
            });
        }
        if let DatePolicy::FixedOffset { east_seconds } = self.date_policy {
            FixedOffset::east_opt(east_seconds).ok_or(ConfigError::InvalidOffset(east_seconds))?;
        }
        Ok(())
    }

    /// Number of possible counts, `max - min + 1`.
    pub fn count_span(&self) -> usize {
        self.max_count - self.min_count + 1
    }
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self::v0()
    }
}
