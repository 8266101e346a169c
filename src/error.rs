//! Error taxonomy for the leaderboard pipeline.

use thiserror::Error;

/// A malformed or missing required field in an input row.
///
/// Non-retryable: the input itself must be corrected upstream. The pipeline
/// fails the whole invocation on the first occurrence rather than emitting a
/// partial result.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DataQualityError {
    #[error("row {row}: required field `{field}` is missing")]
    MissingField { row: usize, field: &'static str },

    #[error("row {row}: value `{raw}` is not a finite number")]
    UnparsableValue { row: usize, raw: String },
}
