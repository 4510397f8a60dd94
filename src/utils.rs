// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rust_decimal::Decimal;

use crate::error::ExpenseError;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d-%m-%Y", "%d/%m/%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

pub fn parse_date(s: &str) -> Result<NaiveDate, ExpenseError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| ExpenseError::InvalidDate(s.trim().to_string()))
}

/// Lenient date coercion used by cleaning, filtering and charts.
/// Anything that is not recognisable as a calendar date is `None`.
pub fn coerce_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
}

pub fn parse_decimal(s: &str) -> Result<Decimal, ExpenseError> {
    let s = s.trim();
    s.parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(s))
        .map_err(|_| ExpenseError::InvalidAmount(s.to_string()))
}

pub fn parse_amount(s: &str) -> Result<Decimal, ExpenseError> {
    let amount = parse_decimal(s)?;
    if amount <= Decimal::ZERO {
        return Err(ExpenseError::NonPositiveAmount(amount));
    }
    Ok(amount)
}

/// Adds `amount` to `total`, failing instead of panicking on overflow.
pub fn add_amount(total: &mut Decimal, amount: Decimal) -> Result<(), ExpenseError> {
    *total = total
        .checked_add(amount)
        .ok_or(ExpenseError::TotalOverflow)?;
    Ok(())
}

pub fn fmt_money(d: &Decimal, symbol: &str) -> String {
    format!("{}{:.2}", symbol, d.round_dp(2))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

/// Renders `v` as JSON when one of the flags is set. Returns the rendered
/// text, or `None` when neither flag asks for JSON.
pub fn maybe_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<Option<String>> {
    if json_flag {
        return Ok(Some(serde_json::to_string_pretty(v)?));
    }
    if jsonl_flag {
        // Arrays stream one element per line
        let val = serde_json::to_value(v)?;
        let lines = if let Some(arr) = val.as_array() {
            arr.iter()
                .map(serde_json::to_string)
                .collect::<Result<Vec<_>, _>>()?
        } else {
            vec![serde_json::to_string(&val)?]
        };
        return Ok(Some(lines.join("\n")));
    }
    Ok(None)
}
