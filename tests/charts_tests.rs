// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use spendlog::charts::{
    self, BAR_FILE, HISTOGRAM_BINS, HISTOGRAM_FILE, LINE_FILE, PIE_FILE, category_totals,
    daily_totals, histogram, kde_curve,
};
use spendlog::models::{Category, Expense};
use tempfile::tempdir;

fn expense(date: &str, amount: i64, category: Category) -> Expense {
    Expense {
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        amount: Decimal::from(amount),
        category,
        description: String::new(),
    }
}

fn sample() -> Vec<Expense> {
    vec![
        expense("2024-01-02", 30, Category::Transport),
        expense("2024-01-01", 100, Category::Food),
        expense("2024-01-02", 20, Category::Food),
        expense("2024-01-05", 60, Category::Bills),
    ]
}

#[test]
fn category_totals_are_ordered_by_name() {
    let totals = category_totals(&sample()).unwrap();
    assert_eq!(
        totals,
        vec![
            (Category::Bills, Decimal::from(60)),
            (Category::Food, Decimal::from(120)),
            (Category::Transport, Decimal::from(30)),
        ]
    );
}

#[test]
fn daily_totals_are_time_ordered() {
    let daily = daily_totals(&sample()).unwrap();
    let days: Vec<String> = daily.iter().map(|(d, _)| d.to_string()).collect();
    assert_eq!(days, ["2024-01-01", "2024-01-02", "2024-01-05"]);
    assert_eq!(daily[1].1, Decimal::from(50));
}

#[test]
fn histogram_spreads_values_over_ten_bins() {
    let values: Vec<f64> = (1..=10).map(f64::from).collect();
    let hist = histogram(&values, HISTOGRAM_BINS).unwrap();
    assert_eq!(hist.edges.len(), 11);
    assert_eq!(hist.counts, vec![1; 10]);
}

#[test]
fn histogram_widens_a_single_value() {
    let hist = histogram(&[5.0, 5.0, 5.0], HISTOGRAM_BINS).unwrap();
    assert_eq!(hist.counts.iter().sum::<usize>(), 3);
    assert!((hist.edges[0] - 4.5).abs() < 1e-9);
    assert!((hist.edges[10] - 5.5).abs() < 1e-9);
    assert!(histogram(&[], HISTOGRAM_BINS).is_none());
}

#[test]
fn kde_integrates_to_roughly_one() {
    let values = [1.0, 2.0, 3.0, 4.0, 10.0];
    let curve = kde_curve(&values, -30.0, 45.0, 3000).unwrap();
    let area: f64 = curve
        .windows(2)
        .map(|w| (w[1].0 - w[0].0) * (w[0].1 + w[1].1) / 2.0)
        .sum();
    assert!((area - 1.0).abs() < 0.01, "area was {}", area);
}

#[test]
fn kde_needs_spread() {
    assert!(kde_curve(&[3.0], 0.0, 6.0, 50).is_none());
    assert!(kde_curve(&[3.0, 3.0], 0.0, 6.0, 50).is_none());
}

#[test]
fn pie_is_skipped_without_spending() {
    assert!(charts::pie_chart(&[]).is_none());
    assert!(charts::pie_chart(&[(Category::Food, Decimal::ZERO)]).is_none());
}

#[test]
fn render_all_writes_four_svgs() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("charts");
    let report = charts::render_all(&sample(), &out).unwrap();
    assert!(!report.pie_skipped);
    assert_eq!(report.written.len(), 4);
    for name in [BAR_FILE, LINE_FILE, PIE_FILE, HISTOGRAM_FILE] {
        let body = std::fs::read_to_string(out.join(name)).unwrap();
        assert!(body.contains("<svg"), "{} is not an svg", name);
    }
    let bar = std::fs::read_to_string(out.join(BAR_FILE)).unwrap();
    assert!(bar.contains("Total Expenses by Category"));
    assert!(bar.contains("Transport"));
}

#[test]
fn overflowing_totals_are_an_error_not_a_panic() {
    let huge = Decimal::MAX;
    let rows = vec![
        Expense {
            amount: huge,
            ..expense("2024-01-01", 1, Category::Food)
        },
        Expense {
            amount: huge,
            ..expense("2024-01-01", 1, Category::Food)
        },
    ];
    assert!(category_totals(&rows).is_err());
    assert!(daily_totals(&rows).is_err());
    let dir = tempdir().unwrap();
    assert!(charts::render_all(&rows, &dir.path().join("charts")).is_err());
    assert!(!dir.path().join("charts").exists());
}

#[test]
fn histogram_of_one_huge_value_has_real_bins() {
    let v = Decimal::MAX.to_string().parse::<f64>().unwrap();
    let hist = histogram(&[v, v], HISTOGRAM_BINS).unwrap();
    assert!(hist.bin_width() > 0.0);
    assert_eq!(hist.counts.iter().sum::<usize>(), 2);
}
