// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ExpenseError;
use crate::utils::{coerce_date, parse_amount, parse_date};

pub const HEADERS: [&str; 4] = ["Date", "Amount", "Category", "Description"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Category {
    Food,
    Transport,
    Shopping,
    Bills,
    Other,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Food,
        Category::Transport,
        Category::Shopping,
        Category::Bills,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Shopping => "Shopping",
            Category::Bills => "Bills",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ExpenseError;

    /// Case-insensitive, so "food" and "FOOD" both land on `Food`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ExpenseError::InvalidCategory(wanted.to_string()))
    }
}

/// One row of the table, exactly as it sits in the CSV file.
///
/// Fields stay textual so rows with a bad amount or an unknown category
/// survive loading and can be dropped later by `clean_data`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExpenseRecord {
    #[serde(rename = "Date", default)]
    pub date: String,
    #[serde(rename = "Amount", default)]
    pub amount: String,
    #[serde(rename = "Category", default)]
    pub category: String,
    #[serde(rename = "Description", default)]
    pub description: String,
}

impl ExpenseRecord {
    pub fn date_value(&self) -> Option<NaiveDate> {
        coerce_date(&self.date)
    }

    pub fn amount_value(&self) -> Option<Decimal> {
        self.amount.trim().parse::<Decimal>().ok()
    }

    pub fn category_value(&self) -> Option<Category> {
        self.category.parse().ok()
    }

    /// The typed form of this row, or `None` when any of date, amount
    /// (numeric and positive) or category is unusable.
    pub fn validated(&self) -> Option<Expense> {
        let date = self.date_value()?;
        let amount = self.amount_value().filter(|a| *a > Decimal::ZERO)?;
        let category = self.category_value()?;
        Some(Expense {
            date,
            amount,
            category,
            description: self.description.clone(),
        })
    }

    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.date.clone(),
            self.amount.clone(),
            self.category.clone(),
            self.description.clone(),
        ]
    }
}

/// A fully coerced expense, used by cleaning and charting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Expense {
    pub date: NaiveDate,
    pub amount: Decimal,
    pub category: Category,
    pub description: String,
}

impl From<&Expense> for ExpenseRecord {
    fn from(e: &Expense) -> Self {
        ExpenseRecord {
            date: e.date.to_string(),
            amount: e.amount.to_string(),
            category: e.category.to_string(),
            description: e.description.clone(),
        }
    }
}

/// User input for a new expense, validated once for every entry path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExpense {
    pub date: String,
    pub amount: Decimal,
    pub category: Category,
    pub description: String,
}

impl NewExpense {
    pub fn parse(
        date: &str,
        amount: &str,
        category: &str,
        description: &str,
    ) -> Result<Self, ExpenseError> {
        let amount = parse_amount(amount)?;
        let category = category.parse::<Category>()?;
        let date = date.trim();
        parse_date(date)?;
        Ok(NewExpense {
            date: date.to_string(),
            amount,
            category,
            description: description.trim().to_string(),
        })
    }

    pub fn into_record(self) -> ExpenseRecord {
        ExpenseRecord {
            date: self.date,
            amount: self.amount.to_string(),
            category: self.category.to_string(),
            description: self.description,
        }
    }
}
