//! Row types flowing through the leaderboard pipeline.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single row as deserialized from the source file, before normalization.
///
/// Every field is optional: nulls in the source surface as `None` here and
/// are arbitrated by the [`MissingValuePolicy`](crate::normalize::MissingValuePolicy)
/// during normalization, never silently at load time.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawObservation {
    pub name: Option<String>,
    pub value: Option<f64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub year_week: Option<String>,
    pub country: Option<String>,
    pub os_name: Option<String>,
}

/// A normalized observation: identity columns present, measure truncated to
/// an integer. The observation window dates are dropped here; nothing
/// downstream reads them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    pub name: String,
    pub value: i64,
    /// Opaque, lexicographically sortable week bucket, e.g. "2024-W07".
    pub year_week: String,
    pub country: String,
    pub os_name: String,
}

/// One output row: the entity with the maximal summed value for a week.
///
/// `year_week` is intended to be unique per row; see
/// [`aggregate_weekly_leaders`](crate::aggregate::aggregate_weekly_leaders)
/// for the documented tie case where it is not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklyLeader {
    pub year_week: String,
    pub name: String,
    pub weekly_sum: i64,
}

#[cfg(test)]
impl Observation {
    /// Shorthand for tests that only care about the aggregation key columns.
    pub fn new(name: &str, value: i64, year_week: &str) -> Self {
        Observation {
            name: name.to_string(),
            value,
            year_week: year_week.to_string(),
            country: String::new(),
            os_name: String::new(),
        }
    }
}
