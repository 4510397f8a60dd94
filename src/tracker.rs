// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use log::{debug, info};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::models::{Expense, ExpenseRecord, NewExpense};
use crate::store;
use crate::utils::add_amount;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Loaded,
    Created,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: Decimal,
    pub average: Decimal,
    pub count: usize,
    pub by_category: BTreeMap<String, Decimal>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    pub category: Option<String>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl Filter {
    fn matches(&self, rec: &ExpenseRecord) -> bool {
        if let Some(cat) = &self.category {
            if &rec.category != cat {
                return false;
            }
        }
        if self.start.is_none() && self.end.is_none() {
            return true;
        }
        let Some(date) = rec.date_value() else {
            return false;
        };
        self.start.is_none_or(|s| date >= s) && self.end.is_none_or(|e| date <= e)
    }
}

/// The expense table and the CSV file that mirrors it.
#[derive(Debug)]
pub struct ExpenseTracker {
    path: PathBuf,
    records: Vec<ExpenseRecord>,
    ragged_lines: Vec<u64>,
    origin: Origin,
}

impl ExpenseTracker {
    /// Loads the table from `path`, or writes an empty one there when the
    /// file does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        match store::read_table(&path) {
            Ok(table) => {
                info!("loaded {} expenses from {}", table.records.len(), path.display());
                Ok(Self {
                    path,
                    records: table.records,
                    ragged_lines: table.ragged_lines,
                    origin: Origin::Loaded,
                })
            }
            Err(err) if is_not_found(&err) => {
                info!("{} missing, initialising empty table", path.display());
                store::write_records(&path, &[])?;
                Ok(Self {
                    path,
                    records: Vec::new(),
                    ragged_lines: Vec::new(),
                    origin: Origin::Created,
                })
            }
            Err(err) => Err(err),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    /// File lines from the last load with too few or too many fields.
    pub fn ragged_lines(&self) -> &[u64] {
        &self.ragged_lines
    }

    pub fn records(&self) -> &[ExpenseRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Validates and appends one expense, then rewrites the file. Nothing
    /// changes in memory or on disk when validation or the write fails.
    pub fn log_expense(
        &mut self,
        date: &str,
        amount: &str,
        category: &str,
        description: &str,
    ) -> Result<&ExpenseRecord> {
        let entry = NewExpense::parse(date, amount, category, description)?;
        self.append(entry)
    }

    pub fn append(&mut self, entry: NewExpense) -> Result<&ExpenseRecord> {
        self.records.push(entry.into_record());
        if let Err(err) = self.save() {
            self.records.pop();
            return Err(err);
        }
        info!("logged expense #{}", self.records.len());
        self.records
            .last()
            .ok_or_else(|| anyhow!("expense table is empty after append"))
    }

    /// Replaces the in-memory table with the file contents. On error the
    /// current table is left untouched.
    pub fn load_data(&mut self) -> Result<usize> {
        let table = store::read_table(&self.path)?;
        self.records = table.records;
        self.ragged_lines = table.ragged_lines;
        Ok(self.records.len())
    }

    /// Drops every row without a usable date, a positive numeric amount and
    /// a known category, normalises the survivors and persists them.
    /// Returns how many rows were removed.
    pub fn clean_data(&mut self) -> Result<usize> {
        let before = self.records.len();
        let cleaned: Vec<ExpenseRecord> = self
            .records
            .iter()
            .filter_map(ExpenseRecord::validated)
            .map(|e| ExpenseRecord::from(&e))
            .collect();
        let removed = before - cleaned.len();
        store::write_records(&self.path, &cleaned)?;
        self.records = cleaned;
        info!("clean_data removed {} of {} rows", removed, before);
        Ok(removed)
    }

    /// `None` for an empty table. Fails when the amounts do not fit in a
    /// single total.
    pub fn summary(&self) -> Result<Option<Summary>> {
        if self.records.is_empty() {
            return Ok(None);
        }
        let mut total = Decimal::ZERO;
        let mut count = 0usize;
        let mut by_category: BTreeMap<String, Decimal> = BTreeMap::new();
        for rec in &self.records {
            let Some(amount) = rec.amount_value() else {
                debug!("summary skips non-numeric amount '{}'", rec.amount);
                continue;
            };
            add_amount(&mut total, amount)?;
            count += 1;
            add_amount(
                by_category.entry(rec.category.clone()).or_insert(Decimal::ZERO),
                amount,
            )?;
        }
        let average = if count == 0 {
            Decimal::ZERO
        } else {
            total / Decimal::from(count)
        };
        Ok(Some(Summary {
            total,
            average,
            count,
            by_category,
        }))
    }

    pub fn filter_expenses(&self, filter: &Filter) -> Vec<ExpenseRecord> {
        if self.records.is_empty() {
            return Vec::new();
        }
        self.records
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect()
    }

    /// Coerced copies of the usable rows, in table order. The stored table
    /// is not modified.
    pub fn valid_expenses(&self) -> Vec<Expense> {
        self.records
            .iter()
            .filter_map(ExpenseRecord::validated)
            .collect()
    }

    fn save(&self) -> Result<()> {
        store::write_records(&self.path, &self.records)
    }
}

fn is_not_found(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        if let Some(io) = cause.downcast_ref::<std::io::Error>() {
            return io.kind() == ErrorKind::NotFound;
        }
        if let Some(csv_err) = cause.downcast_ref::<csv::Error>() {
            if let csv::ErrorKind::Io(io) = csv_err.kind() {
                return io.kind() == ErrorKind::NotFound;
            }
        }
        false
    })
}
