//! Invocation configuration.
//!
//! Input/output locations and filtering live in an explicit structure handed
//! to the run boundary, so the aggregation core stays pure and testable in
//! isolation from any file or object-store path. Values come from the
//! environment (with `.env` support via dotenvy in main); CLI flags override.

use std::env;
use std::path::PathBuf;

use crate::filter::FilterSpec;
use crate::normalize::MissingValuePolicy;

pub const DEFAULT_IN_FILE: &str = "data/observations.csv";
pub const DEFAULT_OUT_FILE: &str = "output/weekly_leaders.csv";
pub const DEFAULT_S3_KEY: &str = "leaderboards/weekly_leaders.csv";

/// Everything one pipeline invocation needs to know.
#[derive(Debug, Clone)]
pub struct JobConfig {
    pub in_file: PathBuf,
    pub out_file: PathBuf,
    pub s3_bucket: Option<String>,
    pub s3_key: String,
    pub filter: FilterSpec,
    pub policy: MissingValuePolicy,
    pub gzip: bool,
}

impl JobConfig {
    /// Builds a config from environment variables, falling back to defaults.
    ///
    /// Recognized: `IN_FILE`, `OUT_FILE`, `S3_BUCKET`, `S3_KEY`,
    /// `FILTER_COUNTRY`, `FILTER_OS`, `GZIP`.
    pub fn from_env() -> Self {
        JobConfig {
            in_file: env::var("IN_FILE")
                .unwrap_or_else(|_| DEFAULT_IN_FILE.to_string())
                .into(),
            out_file: env::var("OUT_FILE")
                .unwrap_or_else(|_| DEFAULT_OUT_FILE.to_string())
                .into(),
            s3_bucket: env::var("S3_BUCKET").ok().filter(|b| !b.is_empty()),
            s3_key: env::var("S3_KEY").unwrap_or_else(|_| DEFAULT_S3_KEY.to_string()),
            filter: FilterSpec {
                country: env::var("FILTER_COUNTRY").ok().filter(|c| !c.is_empty()),
                os_name: env::var("FILTER_OS").ok().filter(|o| !o.is_empty()),
            },
            policy: MissingValuePolicy::default(),
            gzip: env::var("GZIP").map(|v| v == "1" || v == "true").unwrap_or(false),
        }
    }
}

impl Default for JobConfig {
    fn default() -> Self {
        JobConfig {
            in_file: DEFAULT_IN_FILE.into(),
            out_file: DEFAULT_OUT_FILE.into(),
            s3_bucket: None,
            s3_key: DEFAULT_S3_KEY.to_string(),
            filter: FilterSpec::default(),
            policy: MissingValuePolicy::default(),
            gzip: false,
        }
    }
}
