//! CSV persistence with file-presence cache semantics.
//!
//! The cache is keyed on nothing but the output file existing: a present file
//! is read back verbatim and the extraction pipeline never runs, so new
//! emails are ignored until the file is deleted by hand. Sink I/O errors are
//! the one fatal error class in the tool.

use anyhow::{Context, Result};
use std::path::Path;

use crate::models::ChargeSessionRecord;

/// Read the cached result set, or `None` when no cache file exists.
pub fn load_cached(path: &Path) -> Result<Option<Vec<ChargeSessionRecord>>> {
    if !path.exists() {
        return Ok(None);
    }
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("open cached CSV {}", path.display()))?;
    let records = reader
        .deserialize()
        .collect::<Result<Vec<ChargeSessionRecord>, _>>()
        .with_context(|| format!("read cached CSV {}", path.display()))?;
    Ok(Some(records))
}

/// Write one row per record, header first. An empty batch writes nothing.
pub fn write_records(path: &Path, records: &[ChargeSessionRecord]) -> Result<()> {
    if records.is_empty() {
        return Ok(());
    }
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("create CSV {}", path.display()))?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush().context("flush CSV")?;
    Ok(())
}
