// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{ExpenseRecord, HEADERS};
use crate::tracker::{ExpenseTracker, Filter};
use crate::utils::{coerce_date, maybe_json, pretty_table};
use anyhow::{Result, anyhow};
use std::io::Write;

pub fn add(tracker: &mut ExpenseTracker, sub: &clap::ArgMatches, out: &mut impl Write) -> Result<()> {
    let date = sub.get_one::<String>("date").map(String::as_str).unwrap_or("");
    let amount = sub.get_one::<String>("amount").map(String::as_str).unwrap_or("");
    let category = sub.get_one::<String>("category").map(String::as_str).unwrap_or("");
    let description = sub
        .get_one::<String>("description")
        .map(String::as_str)
        .unwrap_or("");
    let rec = tracker.log_expense(date, amount, category, description)?;
    writeln!(
        out,
        "Expense added successfully! {} | {} | {} | {}",
        rec.date, rec.amount, rec.category, rec.description
    )?;
    Ok(())
}

pub fn filter(tracker: &ExpenseTracker, sub: &clap::ArgMatches, out: &mut impl Write) -> Result<()> {
    let text = |name: &str| sub.get_one::<String>(name).map(String::as_str).unwrap_or("");
    let filter = build_filter(text("category"), text("from"), text("to"))?;
    let rows = tracker.filter_expenses(&filter);
    if let Some(json) = maybe_json(sub.get_flag("json"), sub.get_flag("jsonl"), &rows)? {
        writeln!(out, "{}", json)?;
        return Ok(());
    }
    print_filtered(tracker, &rows, out)
}

/// Interactive "Log New Expense": reports the outcome instead of failing.
pub fn log_interactive(
    tracker: &mut ExpenseTracker,
    date: &str,
    amount: &str,
    category: &str,
    description: &str,
    out: &mut impl Write,
) -> Result<()> {
    match tracker.log_expense(date, amount, category, description) {
        Ok(_) => writeln!(out, "Expense added successfully!")?,
        Err(err) => writeln!(out, "{:#}", err)?,
    }
    Ok(())
}

/// Turns free-text answers into a filter; blank answers mean "no filter".
pub fn build_filter(category: &str, start: &str, end: &str) -> Result<Filter> {
    let bound = |s: &str| -> Result<Option<_>> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(None);
        }
        coerce_date(s)
            .map(Some)
            .ok_or_else(|| anyhow!("Invalid date '{}', expected YYYY-MM-DD", s))
    };
    let category = Some(category.trim())
        .filter(|c| !c.is_empty())
        .map(str::to_string);
    Ok(Filter {
        category,
        start: bound(start)?,
        end: bound(end)?,
    })
}

pub fn print_filtered(
    tracker: &ExpenseTracker,
    rows: &[ExpenseRecord],
    out: &mut impl Write,
) -> Result<()> {
    if tracker.is_empty() {
        writeln!(out, "No data to filter.")?;
    } else if rows.is_empty() {
        writeln!(out, "No expenses match the filter criteria.")?;
    } else {
        let data: Vec<Vec<String>> = rows.iter().map(ExpenseRecord::to_row).collect();
        writeln!(out, "{}", pretty_table(&HEADERS, data))?;
    }
    Ok(())
}
