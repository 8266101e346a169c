//! The weekly leaderboard core: grouped summation, per-week maximum
//! detection, winner selection, and final ordering.
//!
//! This is a pure function over an in-memory record set. It owns no state,
//! performs no I/O, and produces byte-identical output for identical input.

use std::collections::BTreeMap;

use tracing::warn;

use crate::records::{Observation, WeeklyLeader};

/// Computes the weekly leaderboard for a set of normalized observations.
///
/// For each `(name, year_week)` group the values are summed with exact
/// integer arithmetic, then within each week only the group(s) whose sum
/// equals the week's maximum survive. Output is sorted ascending by
/// `year_week`, with ties within a week in ascending `name` order.
///
/// Duplicate input rows for the same `(name, year_week)` collapse into one
/// summed group, so the output never repeats a key. If two *distinct* names
/// tie at a week's maximum, both rows are kept and a warning is emitted:
/// the upstream algorithm tolerates the broken one-leader-per-week invariant
/// and no tie-break rule is invented here.
///
/// Empty input yields empty output. Negative values sum normally.
pub fn aggregate_weekly_leaders(records: &[Observation]) -> Vec<WeeklyLeader> {
    // Grouped summation. Keying by (year_week, name) in a BTreeMap both
    // deduplicates the composite key and fixes the final sort order.
    let mut totals: BTreeMap<(&str, &str), i64> = BTreeMap::new();
    for obs in records {
        *totals
            .entry((obs.year_week.as_str(), obs.name.as_str()))
            .or_insert(0) += obs.value;
    }

    // Per-week maximum over the grouped sums.
    let mut weekly_max: BTreeMap<&str, i64> = BTreeMap::new();
    for (&(week, _), &sum) in &totals {
        weekly_max
            .entry(week)
            .and_modify(|m| *m = (*m).max(sum))
            .or_insert(sum);
    }

    // Winner selection: keep only the groups at their week's maximum.
    let leaders: Vec<WeeklyLeader> = totals
        .iter()
        .filter(|((week, _), sum)| weekly_max[*week] == **sum)
        .map(|(&(week, name), &sum)| WeeklyLeader {
            year_week: week.to_string(),
            name: name.to_string(),
            weekly_sum: sum,
        })
        .collect();

    for pair in leaders.windows(2) {
        if pair[0].year_week == pair[1].year_week {
            warn!(
                year_week = %pair[0].year_week,
                first = %pair[0].name,
                second = %pair[1].name,
                "Distinct names tied for the weekly maximum; week appears more than once"
            );
        }
    }

    leaders
}
