//! Output formatting and persistence for mapping summaries.
//!
//! Supports pretty-printing, JSON serialization, CSV append and gzip export.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use csv::WriterBuilder;
use flate2::Compression;
use flate2::write::GzEncoder;
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::mapping::types::MappingGroup;

/// One CSV row per group.
#[derive(Debug, Serialize)]
pub struct SummaryRow {
    pub generated_at: DateTime<Utc>,
    pub key: String,
    pub class_id: Option<String>,
    pub class_name: String,
    pub term: String,
    pub academic_year: String,
    pub total: usize,
    pub pending: usize,
    pub assigned: usize,
    pub hours_assigned: u32,
    pub hours_needed: u32,
    pub coverage_pct: f64,
    pub coverage: String,
}

impl SummaryRow {
    pub fn from_group(group: &MappingGroup, generated_at: DateTime<Utc>) -> Self {
        Self {
            generated_at,
            key: group.key.clone(),
            class_id: group.class_ref.as_ref().map(|c| c.id.to_string()),
            class_name: group.class_name().to_string(),
            term: group.term.clone(),
            academic_year: group.academic_year.clone(),
            total: group.stats.total,
            pending: group.stats.pending,
            assigned: group.stats.assigned,
            hours_assigned: group.stats.hours_assigned,
            hours_needed: group.stats.hours_needed,
            coverage_pct: group.stats.coverage_pct(),
            coverage: group.stats.coverage().to_string(),
        }
    }
}

/// Rows for `groups`, all stamped with the same time.
pub fn summary_rows(groups: &[MappingGroup]) -> Vec<SummaryRow> {
    let now = Utc::now();
    groups.iter().map(|g| SummaryRow::from_group(g, now)).collect()
}

/// Logs groups using Rust's debug pretty-print format.
pub fn print_pretty(groups: &[MappingGroup]) {
    debug!("{:#?}", groups);
}

/// Writes `value` as pretty-printed JSON followed by a newline.
pub fn write_json<W: Write>(mut writer: W, value: &impl Serialize) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Writes `value` as JSON to stdout.
pub fn print_json(value: &impl Serialize) -> Result<()> {
    write_json(io::stdout().lock(), value)
}

/// Appends summary rows to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_summaries(path: &Path, rows: &[SummaryRow]) -> Result<()> {
    let file_exists = path.exists();
    debug!(path = %path.display(), file_exists, rows = rows.len(), "Appending CSV rows");

    let file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .with_context(|| format!("cannot open {}", path.display()))?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}

/// Gzip-compresses `path` into `<path>.gz` and returns the new path.
pub fn gzip_file(path: &Path) -> Result<PathBuf> {
    let contents = std::fs::read(path).with_context(|| format!("cannot read {}", path.display()))?;

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&contents)?;
    let compressed = encoder.finish()?;

    let mut gz_path = path.as_os_str().to_owned();
    gz_path.push(".gz");
    let gz_path = PathBuf::from(gz_path);
    File::create(&gz_path)?.write_all(&compressed)?;

    debug!(path = %gz_path.display(), bytes = compressed.len(), "Wrote gzip file");
    Ok(gz_path)
}
