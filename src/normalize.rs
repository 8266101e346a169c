//! Type normalization for raw observation rows.
//!
//! Coerces the measure column to an integer by truncation and resolves the
//! identity columns, applying a [`MissingValuePolicy`] to rows with nulls in
//! the required fields.

use tracing::warn;

use crate::error::DataQualityError;
use crate::records::{Observation, RawObservation};

/// What to do with a row whose required fields (`name`, `value`, `year_week`)
/// contain nulls.
///
/// `Reject` is the default: nulls are a data-quality failure of the upstream
/// feed, not something the pipeline papers over. `DropRow` and `Impute` exist
/// so a caller can supply an explicit policy without touching the aggregation
/// core.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingValuePolicy {
    /// Fail the invocation on the first row with a missing required field.
    #[default]
    Reject,
    /// Drop incomplete rows, logging how many were dropped.
    DropRow,
    /// Substitute a constant for a missing `value`. Missing `name` or
    /// `year_week` still reject: there is no meaningful constant identity.
    Impute(i64),
}

/// Normalizes raw rows into [`Observation`]s.
///
/// `name`, `country`, `os_name` and `year_week` become plain categorical
/// identities; `value` is truncated toward zero (`7.9` → `7`, `-3.9` → `-3`),
/// matching a cast to int rather than rounding. A missing `country` or
/// `os_name` normalizes to the empty string under every policy since the
/// aggregation never requires them.
///
/// # Errors
///
/// [`DataQualityError`] for a null required field (per the policy) or a
/// non-finite `value`. The error names the first offending row; no partial
/// output is produced.
pub fn normalize(
    rows: Vec<RawObservation>,
    policy: MissingValuePolicy,
) -> Result<Vec<Observation>, DataQualityError> {
    let mut out = Vec::with_capacity(rows.len());
    let mut dropped = 0usize;

    for (row, raw) in rows.into_iter().enumerate() {
        match normalize_row(row, raw, policy)? {
            Some(obs) => out.push(obs),
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        warn!(dropped, "Dropped incomplete rows under DropRow policy");
    }

    Ok(out)
}

fn normalize_row(
    row: usize,
    raw: RawObservation,
    policy: MissingValuePolicy,
) -> Result<Option<Observation>, DataQualityError> {
    let name = match require(row, "name", raw.name, policy)? {
        Some(v) => v,
        None => return Ok(None),
    };
    let year_week = match require(row, "year_week", raw.year_week, policy)? {
        Some(v) => v,
        None => return Ok(None),
    };

    let value = match raw.value {
        Some(v) if v.is_finite() => v.trunc() as i64,
        Some(v) => {
            return Err(DataQualityError::UnparsableValue {
                row,
                raw: v.to_string(),
            });
        }
        None => match policy {
            MissingValuePolicy::Reject => {
                return Err(DataQualityError::MissingField { row, field: "value" });
            }
            MissingValuePolicy::DropRow => return Ok(None),
            MissingValuePolicy::Impute(fill) => fill,
        },
    };

    Ok(Some(Observation {
        name,
        value,
        year_week,
        country: raw.country.unwrap_or_default(),
        os_name: raw.os_name.unwrap_or_default(),
    }))
}

fn require(
    row: usize,
    field: &'static str,
    value: Option<String>,
    policy: MissingValuePolicy,
) -> Result<Option<String>, DataQualityError> {
    match value {
        Some(v) => Ok(Some(v)),
        None if policy == MissingValuePolicy::DropRow => Ok(None),
        None => Err(DataQualityError::MissingField { row, field }),
    }
}
