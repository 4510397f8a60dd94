// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use thiserror::Error;

/// Validation failures for a single expense entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpenseError {
    #[error("Invalid input! Amount must be a number (got '{0}').")]
    InvalidAmount(String),
    #[error("Amount must be positive (got {0}).")]
    NonPositiveAmount(Decimal),
    #[error("Invalid category '{0}'. Choose from: Food, Transport, Shopping, Bills, Other.")]
    InvalidCategory(String),
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("Total overflows the supported amount range")]
    TotalOverflow,
}
