//! Persistence for the weekly leaderboard.
//!
//! Supports local CSV files, pretty JSON to stdout, and CSV upload to S3
//! with optional gzip compression.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use flate2::Compression;
use flate2::write::GzEncoder;
use tracing::{debug, info};

use crate::records::WeeklyLeader;

/// Writes the leaderboard to a headered CSV file, `year_week` leading column.
///
/// Overwrites any existing file: the leaderboard is recomputed whole per
/// invocation, never appended to.
pub fn write_leaders(path: &Path, leaders: &[WeeklyLeader]) -> Result<()> {
    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
    {
        std::fs::create_dir_all(dir)?;
    }

    let file =
        File::create(path).with_context(|| format!("creating output file {}", path.display()))?;
    let mut writer = csv::Writer::from_writer(file);

    for leader in leaders {
        writer.serialize(leader)?;
    }
    writer.flush()?;

    debug!(rows = leaders.len(), path = %path.display(), "Wrote leaderboard CSV");
    Ok(())
}

/// Serializes the leaderboard to CSV bytes in memory.
pub fn leaders_to_csv(leaders: &[WeeklyLeader]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for leader in leaders {
        writer.serialize(leader)?;
    }
    Ok(writer.into_inner()?)
}

/// Logs the leaderboard as pretty-printed JSON.
pub fn print_json(leaders: &[WeeklyLeader]) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(leaders)?);
    Ok(())
}

/// Uploads the leaderboard as a CSV object to S3, optionally gzip-compressed.
pub async fn write_csv_to_s3(
    client: &aws_sdk_s3::Client,
    bucket: &str,
    key: &str,
    leaders: &[WeeklyLeader],
    gzip: bool,
) -> Result<()> {
    let csv_bytes = leaders_to_csv(leaders)?;

    let (body, key, encoding) = if gzip {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&csv_bytes)?;
        (encoder.finish()?, format!("{key}.gz"), Some("gzip"))
    } else {
        (csv_bytes, key.to_string(), None)
    };

    let mut req = client
        .put_object()
        .bucket(bucket)
        .key(&key)
        .body(body.into())
        .content_type("text/csv");
    if let Some(encoding) = encoding {
        req = req.content_encoding(encoding);
    }
    req.send().await?;

    info!(bucket, key, rows = leaders.len(), "Uploaded leaderboard to S3");
    Ok(())
}
