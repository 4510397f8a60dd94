// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use csv::{ReaderBuilder, Trim, WriterBuilder};
use directories::ProjectDirs;
use log::{debug, warn};
use once_cell::sync::Lazy;
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::{ExpenseRecord, HEADERS};

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Spendlog", "spendlog"));

pub const DEFAULT_FILE_NAME: &str = "expenses.csv";

pub fn data_dir() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    Ok(proj.data_dir().to_path_buf())
}

pub fn default_file_path() -> Result<PathBuf> {
    Ok(data_dir()?.join(DEFAULT_FILE_NAME))
}

/// Rows as loaded, plus the file lines whose field count differs from the
/// header. Extra fields on those lines are not kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub records: Vec<ExpenseRecord>,
    pub ragged_lines: Vec<u64>,
}

pub fn read_table(path: &Path) -> Result<Table> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_path(path)
        .with_context(|| format!("Open CSV {}", path.display()))?;
    let headers = rdr
        .headers()
        .with_context(|| format!("Read header of {}", path.display()))?
        .clone();
    let mut table = Table::default();
    for (i, result) in rdr.records().enumerate() {
        let mut row = result.with_context(|| format!("Read row {} of {}", i + 1, path.display()))?;
        if row.len() != headers.len() {
            // header is line 1
            let line = row.position().map_or(i as u64 + 2, |p| p.line());
            warn!(
                "{} line {}: expected {} fields, found {}",
                path.display(),
                line,
                headers.len(),
                row.len()
            );
            table.ragged_lines.push(line);
            while row.len() < headers.len() {
                row.push_field("");
            }
        }
        let rec: ExpenseRecord = row
            .deserialize(Some(&headers))
            .with_context(|| format!("Read row {} of {}", i + 1, path.display()))?;
        table.records.push(rec);
    }
    debug!("read {} rows from {}", table.records.len(), path.display());
    Ok(table)
}

/// Overwrites `path` with the header and every record, creating the
/// parent directory when needed.
pub fn write_records(path: &Path, records: &[ExpenseRecord]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("Write CSV {}", path.display()))?;
    wtr.write_record(HEADERS)?;
    for rec in records {
        wtr.write_record(rec.to_row())?;
    }
    wtr.flush()?;
    debug!("wrote {} rows to {}", records.len(), path.display());
    Ok(())
}
