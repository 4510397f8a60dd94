// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::charts::render_all;
use crate::tracker::ExpenseTracker;
use anyhow::Result;
use std::io::Write;
use std::path::{Path, PathBuf};

pub fn handle(
    tracker: &ExpenseTracker,
    default_dir: &Path,
    sub: &clap::ArgMatches,
    out: &mut impl Write,
) -> Result<()> {
    let dir = sub
        .get_one::<String>("out")
        .map(|s| PathBuf::from(s.trim()))
        .unwrap_or_else(|| default_dir.to_path_buf());
    visualize(tracker, &dir, out)
}

pub fn visualize(tracker: &ExpenseTracker, dir: &Path, out: &mut impl Write) -> Result<()> {
    if tracker.is_empty() {
        writeln!(out, "No data available for visualization.")?;
        return Ok(());
    }
    let expenses = tracker.valid_expenses();
    if expenses.is_empty() {
        writeln!(out, "No valid data to visualize.")?;
        return Ok(());
    }
    let report = render_all(&expenses, dir)?;
    if report.pie_skipped {
        writeln!(out, "No data to plot pie chart.")?;
    }
    for path in &report.written {
        writeln!(out, "Saved chart {}", path.display())?;
    }
    Ok(())
}
