// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::tracker::ExpenseTracker;
use anyhow::Result;
use log::warn;
use std::io::Write;

pub fn clean(tracker: &mut ExpenseTracker, out: &mut impl Write) -> Result<()> {
    let removed = tracker.clean_data()?;
    writeln!(out, "Removed {} invalid entries.", removed)?;
    Ok(())
}

/// Reload failures are reported, never returned; the table in memory
/// stays as it was.
pub fn reload(tracker: &mut ExpenseTracker, out: &mut impl Write) -> Result<()> {
    match tracker.load_data() {
        Ok(n) => {
            writeln!(out, "Data loaded successfully! ({} rows)", n)?;
            report_ragged(tracker, out)?;
        }
        Err(err) => {
            warn!("reload of {} failed: {:#}", tracker.path().display(), err);
            writeln!(out, "Error loading data: {:#}", err)?;
        }
    }
    Ok(())
}

pub fn report_ragged(tracker: &ExpenseTracker, out: &mut impl Write) -> Result<()> {
    let lines = tracker.ragged_lines();
    if !lines.is_empty() {
        let list: Vec<String> = lines.iter().map(u64::to_string).collect();
        writeln!(
            out,
            "Warning: line(s) {} of {} have an unexpected number of fields; the next save keeps only the first 4.",
            list.join(", "),
            tracker.path().display()
        )?;
    }
    Ok(())
}
