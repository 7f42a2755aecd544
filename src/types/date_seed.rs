use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Integer seed derived from a calendar date: `year*10000 + month*100 + day`.
///
/// No timezone handling happens here. Callers decide which calendar day an
/// instant belongs to (see `DatePolicy`) and pass the components in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateSeed(i64);

impl DateSeed {
    /// Components are not validated; `from_ymd(2025, 13, 40)` is a valid seed.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Self {
        DateSeed(i64::from(year) * 10_000 + i64::from(month) * 100 + i64::from(day))
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self::from_ymd(date.year(), date.month(), date.day())
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl From<NaiveDate> for DateSeed {
    fn from(date: NaiveDate) -> Self {
        Self::from_date(date)
    }
}

impl std::fmt::Display for DateSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
