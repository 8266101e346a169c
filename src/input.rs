//! CSV loading for the observation record set.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::records::RawObservation;

/// Loads all observation rows from a headered CSV file.
///
/// Columns beyond the observation schema are ignored; empty cells in the
/// schema columns deserialize as `None` and are resolved during
/// normalization, not here.
pub fn load_observations(path: &Path) -> Result<Vec<RawObservation>> {
    let file = File::open(path).with_context(|| format!("opening input file {}", path.display()))?;
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(file);

    let mut rows = Vec::new();
    for result in rdr.deserialize() {
        let record: RawObservation =
            result.with_context(|| format!("reading row from {}", path.display()))?;
        rows.push(record);
    }

    debug!(rows = rows.len(), path = %path.display(), "Loaded observation rows");
    Ok(rows)
}
