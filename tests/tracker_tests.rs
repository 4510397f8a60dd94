// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use spendlog::error::ExpenseError;
use spendlog::tracker::{ExpenseTracker, Filter, Origin};
use std::path::PathBuf;
use std::str::FromStr;
use tempfile::{TempDir, tempdir};

const HEADER: &str = "Date,Amount,Category,Description\n";

fn seeded(rows: &str) -> (TempDir, PathBuf) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("expenses.csv");
    std::fs::write(&path, format!("{}{}", HEADER, rows)).unwrap();
    (dir, path)
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn day(s: &str) -> Option<NaiveDate> {
    Some(NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap())
}

#[test]
fn open_creates_missing_file_with_header() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("expenses.csv");
    let tracker = ExpenseTracker::open(path.clone()).unwrap();
    assert_eq!(tracker.origin(), Origin::Created);
    assert!(tracker.is_empty());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), HEADER);
}

#[test]
fn open_loads_existing_rows_in_order() {
    let (_dir, path) = seeded("2024-01-01,100,Food,lunch\n2024-01-01,100,Food,lunch\n");
    let tracker = ExpenseTracker::open(path).unwrap();
    assert_eq!(tracker.origin(), Origin::Loaded);
    assert_eq!(tracker.len(), 2);
    assert_eq!(tracker.records()[0], tracker.records()[1]);
}

#[test]
fn valid_expense_round_trips_through_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("expenses.csv");
    let mut tracker = ExpenseTracker::open(path.clone()).unwrap();
    tracker
        .log_expense("2024-03-05", "12.50", "Food", "coffee, cake")
        .unwrap();
    tracker.log_expense("2024-03-06", "3", "transport", "bus").unwrap();

    let reloaded = ExpenseTracker::open(path).unwrap();
    assert_eq!(reloaded.records(), tracker.records());
    let first = &reloaded.records()[0];
    assert_eq!(first.date, "2024-03-05");
    assert_eq!(first.amount, "12.50");
    assert_eq!(first.category, "Food");
    assert_eq!(first.description, "coffee, cake");
    // category spelling is normalised on entry
    assert_eq!(reloaded.records()[1].category, "Transport");
}

#[test]
fn non_numeric_amount_changes_nothing() {
    let (_dir, path) = seeded("2024-01-01,100,Food,lunch\n");
    let before = std::fs::read_to_string(&path).unwrap();
    let mut tracker = ExpenseTracker::open(path.clone()).unwrap();

    let err = tracker
        .log_expense("2024-01-02", "ten", "Food", "dinner")
        .unwrap_err();
    assert_eq!(
        err.downcast_ref::<ExpenseError>(),
        Some(&ExpenseError::InvalidAmount("ten".into()))
    );
    assert_eq!(tracker.len(), 1);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn log_rejects_non_positive_amount_and_unknown_category() {
    let (_dir, path) = seeded("");
    let mut tracker = ExpenseTracker::open(path).unwrap();

    let err = tracker.log_expense("2024-01-02", "0", "Food", "").unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ExpenseError>(),
        Some(ExpenseError::NonPositiveAmount(_))
    ));
    let err = tracker.log_expense("2024-01-02", "5", "Rent", "").unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ExpenseError>(),
        Some(ExpenseError::InvalidCategory(_))
    ));
    let err = tracker.log_expense("yesterday", "5", "Food", "").unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ExpenseError>(),
        Some(ExpenseError::InvalidDate(_))
    ));
    assert!(tracker.is_empty());
}

#[test]
fn clean_drops_invalid_category_row() {
    let (_dir, path) = seeded("2024-01-01,100,Food,lunch\n2024-01-02,50,Bad,x\n");
    let mut tracker = ExpenseTracker::open(path.clone()).unwrap();
    assert_eq!(tracker.clean_data().unwrap(), 1);
    assert_eq!(tracker.summary().unwrap().unwrap().total, dec("100"));

    let on_disk = ExpenseTracker::open(path).unwrap();
    assert_eq!(on_disk.len(), 1);
}

#[test]
fn clean_removes_exactly_the_invalid_rows() {
    let (_dir, path) = seeded(
        "2024-01-01,10,Food,ok\n\
         not a date,10,Food,bad date\n\
         2024-01-03,abc,Bills,bad amount\n\
         2024-01-04,,Other,missing amount\n\
         2024-01-05,-4,Other,negative\n\
         2024-01-06,7,,missing category\n\
         2024/01/07,5,shopping,ok\n",
    );
    let mut tracker = ExpenseTracker::open(path).unwrap();
    assert_eq!(tracker.clean_data().unwrap(), 5);
    let rows = tracker.records();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].date, "2024-01-07");
    assert_eq!(rows[1].category, "Shopping");
}

#[test]
fn summary_of_empty_table_is_none() {
    let (_dir, path) = seeded("");
    let tracker = ExpenseTracker::open(path).unwrap();
    assert!(tracker.summary().unwrap().is_none());
}

#[test]
fn summary_groups_by_category_in_name_order() {
    let (_dir, path) = seeded(
        "2024-01-01,100,Food,a\n2024-01-02,50.5,Bills,b\n2024-01-03,20,Food,c\n",
    );
    let tracker = ExpenseTracker::open(path).unwrap();
    let s = tracker.summary().unwrap().unwrap();
    assert_eq!(s.total, dec("170.5"));
    assert_eq!(s.count, 3);
    assert_eq!(s.average.round_dp(2), dec("56.83"));
    let keys: Vec<&str> = s.by_category.keys().map(String::as_str).collect();
    assert_eq!(keys, ["Bills", "Food"]);
    assert_eq!(s.by_category["Food"], dec("120"));
}

#[test]
fn filter_without_criteria_returns_everything() {
    let (_dir, path) = seeded("2024-01-01,1,Food,a\n2024-01-02,2,Bills,b\n");
    let tracker = ExpenseTracker::open(path).unwrap();
    assert_eq!(tracker.filter_expenses(&Filter::default()), tracker.records());
}

#[test]
fn filter_by_category_and_inclusive_range() {
    let (_dir, path) = seeded(
        "2024-01-01,1,Food,a\n\
         2024-01-15,2,Bills,b\n\
         2024-02-01,3,Food,c\n\
         garbage,4,Food,d\n",
    );
    let tracker = ExpenseTracker::open(path).unwrap();

    let food = tracker.filter_expenses(&Filter {
        category: Some("Food".into()),
        ..Filter::default()
    });
    assert_eq!(food.len(), 3);
    assert!(food.iter().all(|r| r.category == "Food"));

    let january = tracker.filter_expenses(&Filter {
        category: None,
        start: day("2024-01-01"),
        end: day("2024-01-15"),
    });
    let descs: Vec<&str> = january.iter().map(|r| r.description.as_str()).collect();
    assert_eq!(descs, ["a", "b"]);

    let none = tracker.filter_expenses(&Filter {
        category: Some("Transport".into()),
        ..Filter::default()
    });
    assert!(none.is_empty());
}

#[test]
fn failed_reload_keeps_current_table() {
    let (_dir, path) = seeded("2024-01-01,1,Food,a\n");
    let mut tracker = ExpenseTracker::open(path.clone()).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert!(tracker.load_data().is_err());
    assert_eq!(tracker.len(), 1);
}

#[test]
fn reload_picks_up_external_edits() {
    let (_dir, path) = seeded("2024-01-01,1,Food,a\n");
    let mut tracker = ExpenseTracker::open(path.clone()).unwrap();
    std::fs::write(
        &path,
        format!("{}2024-01-01,1,Food,a\n2024-01-02,2,Other,b\n", HEADER),
    )
    .unwrap();
    assert_eq!(tracker.load_data().unwrap(), 2);
}

#[test]
fn failed_write_rolls_back_the_new_row() {
    let (_dir, path) = seeded("2024-01-01,1,Food,a\n");
    let mut tracker = ExpenseTracker::open(path.clone()).unwrap();
    std::fs::remove_file(&path).unwrap();
    std::fs::create_dir(&path).unwrap();

    assert!(tracker.log_expense("2024-01-02", "5", "Food", "b").is_err());
    assert_eq!(tracker.len(), 1);
    assert_eq!(tracker.records()[0].description, "a");
}

const HUGE: &str = "79228162514264337593543950335";

#[test]
fn summary_reports_overflowing_total() {
    let (_dir, path) = seeded(&format!(
        "2024-01-01,{HUGE},Food,a\n2024-01-02,{HUGE},Food,b\n"
    ));
    let tracker = ExpenseTracker::open(path).unwrap();
    let err = tracker.summary().unwrap_err();
    assert_eq!(
        err.downcast_ref::<ExpenseError>(),
        Some(&ExpenseError::TotalOverflow)
    );

    // a single maximal amount still sums fine
    let (_dir2, path2) = seeded(&format!("2024-01-01,{HUGE},Food,a\n"));
    let single = ExpenseTracker::open(path2).unwrap();
    assert_eq!(single.summary().unwrap().unwrap().total, dec(HUGE));
}

#[test]
fn rows_with_wrong_field_count_are_flagged() {
    let (_dir, path) = seeded(
        "2024-01-01,5,Food,a,extra\n2024-01-02,6,Food\n2024-01-03,7,Bills,c\n",
    );
    let mut tracker = ExpenseTracker::open(path.clone()).unwrap();
    assert_eq!(tracker.ragged_lines(), [2, 3]);
    assert_eq!(tracker.len(), 3);
    assert_eq!(tracker.records()[0].description, "a");
    assert_eq!(tracker.records()[1].description, "");

    std::fs::write(&path, format!("{}2024-01-03,7,Bills,c\n", HEADER)).unwrap();
    tracker.load_data().unwrap();
    assert!(tracker.ragged_lines().is_empty());
}
