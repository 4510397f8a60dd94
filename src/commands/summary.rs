// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::tracker::{ExpenseTracker, Summary};
use crate::utils::{fmt_money, maybe_json, pretty_table};
use anyhow::Result;
use std::io::Write;

pub fn handle(
    tracker: &ExpenseTracker,
    currency: &str,
    sub: &clap::ArgMatches,
    out: &mut impl Write,
) -> Result<()> {
    // Empty table: `null`
    let summary = tracker.summary()?;
    if let Some(json) = maybe_json(sub.get_flag("json"), sub.get_flag("jsonl"), &summary)? {
        writeln!(out, "{}", json)?;
        return Ok(());
    }
    write_summary(summary.as_ref(), currency, out)
}

pub fn print_summary(tracker: &ExpenseTracker, currency: &str, out: &mut impl Write) -> Result<()> {
    write_summary(tracker.summary()?.as_ref(), currency, out)
}

fn write_summary(summary: Option<&Summary>, currency: &str, out: &mut impl Write) -> Result<()> {
    match summary {
        None => writeln!(out, "No data to summarize.")?,
        Some(s) => write!(out, "{}", render(s, currency))?,
    }
    Ok(())
}

pub fn render(s: &Summary, currency: &str) -> String {
    let rows: Vec<Vec<String>> = s
        .by_category
        .iter()
        .map(|(cat, amt)| vec![cat.clone(), format!("{:.2}", amt.round_dp(2))])
        .collect();
    format!(
        "\n----- Expense Summary -----\n\
         Total Expenses: {}\n\
         Average Expense: {}\n\
         \nCategory-wise Spending:\n{}\n\
         ---------------------------\n",
        fmt_money(&s.total, currency),
        fmt_money(&s.average, currency),
        pretty_table(&["Category", "Amount"], rows)
    )
}
