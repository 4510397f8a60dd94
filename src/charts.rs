// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! SVG charts over the cleaned expense rows.
//!
//! Four documents are produced: category totals (bar), daily totals
//! (line), category share (pie) and the amount distribution (histogram
//! with a kernel density overlay).

use anyhow::{Context, Result};
use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::collections::BTreeMap;
use std::f64::consts::PI;
use std::fs;
use std::path::{Path, PathBuf};
use svg::Document;
use svg::node::Text as TextNode;
use svg::node::element::{Circle, Line, Path as SvgPath, Polyline, Rectangle, Text, path::Data};

use crate::models::{Category, Expense};
use crate::utils::add_amount;

pub const BAR_FILE: &str = "category_totals.svg";
pub const LINE_FILE: &str = "daily_trend.svg";
pub const PIE_FILE: &str = "category_share.svg";
pub const HISTOGRAM_FILE: &str = "amount_histogram.svg";
pub const HISTOGRAM_BINS: usize = 10;

const WIDTH: f64 = 1000.0;
const HEIGHT: f64 = 600.0;
const MARGIN_LEFT: f64 = 90.0;
const MARGIN_RIGHT: f64 = 40.0;
const MARGIN_TOP: f64 = 60.0;
const MARGIN_BOTTOM: f64 = 80.0;
const Y_TICKS: usize = 5;
const KDE_POINTS: usize = 200;

const COLORS: &[&str] = &[
    "#4c72b0", "#dd8452", "#55a868", "#c44e52", "#8172b3", "#937860",
];

#[derive(Debug, Clone, Default)]
pub struct ChartReport {
    pub written: Vec<PathBuf>,
    pub pie_skipped: bool,
}

/// Per-category totals, ordered by category name.
pub fn category_totals(expenses: &[Expense]) -> Result<Vec<(Category, Decimal)>> {
    let mut map: BTreeMap<&'static str, (Category, Decimal)> = BTreeMap::new();
    for e in expenses {
        let entry = map
            .entry(e.category.as_str())
            .or_insert((e.category, Decimal::ZERO));
        add_amount(&mut entry.1, e.amount)?;
    }
    Ok(map.into_values().collect())
}

/// Daily totals, ordered by date.
pub fn daily_totals(expenses: &[Expense]) -> Result<Vec<(NaiveDate, Decimal)>> {
    let mut map: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for e in expenses {
        add_amount(map.entry(e.date).or_insert(Decimal::ZERO), e.amount)?;
    }
    Ok(map.into_iter().collect())
}

#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    pub fn bin_width(&self) -> f64 {
        match (self.edges.first(), self.edges.last()) {
            (Some(lo), Some(hi)) if !self.counts.is_empty() => (hi - lo) / self.counts.len() as f64,
            _ => 0.0,
        }
    }
}

/// Equal-width bins over `[min, max]`; the last bin is closed on the right.
/// A degenerate range is widened by half a unit on each side (more for
/// values too large for that to register).
pub fn histogram(values: &[f64], bins: usize) -> Option<Histogram> {
    if values.is_empty() || bins == 0 {
        return None;
    }
    let mut lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let mut hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if lo == hi {
        let pad = 0.5_f64.max(lo.abs() * 1e-9);
        lo -= pad;
        hi += pad;
    }
    let width = (hi - lo) / bins as f64;
    let edges: Vec<f64> = (0..=bins).map(|i| lo + width * i as f64).collect();
    let mut counts = vec![0usize; bins];
    for v in values {
        let idx = (((v - lo) / width).floor() as usize).min(bins - 1);
        counts[idx] += 1;
    }
    Some(Histogram { edges, counts })
}

/// Gaussian kernel density estimate sampled at `points` positions across
/// `[lo, hi]`, using Scott's rule for the bandwidth. `None` when the
/// sample has no spread.
pub fn kde_curve(values: &[f64], lo: f64, hi: f64, points: usize) -> Option<Vec<(f64, f64)>> {
    let n = values.len();
    if n < 2 || points < 2 {
        return None;
    }
    let mean = values.iter().sum::<f64>() / n as f64;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    let std = var.sqrt();
    if std <= 0.0 || !std.is_finite() {
        return None;
    }
    let bw = std * (n as f64).powf(-0.2);
    let norm = 1.0 / (n as f64 * bw * (2.0 * PI).sqrt());
    let step = (hi - lo) / (points - 1) as f64;
    let curve = (0..points)
        .map(|i| {
            let x = lo + step * i as f64;
            let y = values
                .iter()
                .map(|v| (-0.5 * ((x - v) / bw).powi(2)).exp())
                .sum::<f64>()
                * norm;
            (x, y)
        })
        .collect();
    Some(curve)
}

/// Writes every chart into `out_dir` and reports what was produced.
/// Totals are computed before anything touches the disk.
pub fn render_all(expenses: &[Expense], out_dir: &Path) -> Result<ChartReport> {
    let totals = category_totals(expenses)?;
    let daily = daily_totals(expenses)?;
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create chart dir {}", out_dir.display()))?;
    let mut report = ChartReport::default();

    save(&bar_chart(&totals), out_dir, BAR_FILE, &mut report)?;
    save(&line_chart(&daily), out_dir, LINE_FILE, &mut report)?;
    match pie_chart(&totals) {
        Some(doc) => save(&doc, out_dir, PIE_FILE, &mut report)?,
        None => report.pie_skipped = true,
    }
    let amounts: Vec<f64> = expenses.iter().map(|e| to_f64(e.amount)).collect();
    if let Some(doc) = histogram_chart(&amounts) {
        save(&doc, out_dir, HISTOGRAM_FILE, &mut report)?;
    }
    Ok(report)
}

pub fn bar_chart(totals: &[(Category, Decimal)]) -> Document {
    let frame = Frame::new(0.0, max_of(totals.iter().map(|(_, d)| to_f64(*d))));
    let mut doc = frame.document("Total Expenses by Category", "Category", "Total Amount");
    let slot = frame.plot_width() / totals.len().max(1) as f64;
    for (i, (cat, total)) in totals.iter().enumerate() {
        let v = to_f64(*total);
        let x = MARGIN_LEFT + slot * i as f64 + slot * 0.15;
        let y = frame.y(v);
        doc = doc
            .add(
                Rectangle::new()
                    .set("x", x)
                    .set("y", y)
                    .set("width", slot * 0.7)
                    .set("height", frame.y(0.0) - y)
                    .set("fill", COLORS[i % COLORS.len()]),
            )
            .add(label(cat.as_str(), x + slot * 0.35, HEIGHT - MARGIN_BOTTOM + 20.0, "middle"))
            .add(label(&format!("{:.2}", v), x + slot * 0.35, y - 6.0, "middle"));
    }
    doc
}

pub fn line_chart(daily: &[(NaiveDate, Decimal)]) -> Document {
    let frame = Frame::new(0.0, max_of(daily.iter().map(|(_, d)| to_f64(*d))));
    let mut doc = frame.document("Spending Trends Over Time", "Date", "Amount");
    let (first, last) = match (daily.first(), daily.last()) {
        (Some(f), Some(l)) => (f.0, l.0),
        _ => return doc,
    };
    let span = (last - first).num_days().max(1) as f64;
    let x_of = |d: NaiveDate| {
        if first == last {
            MARGIN_LEFT + frame.plot_width() / 2.0
        } else {
            MARGIN_LEFT + (d - first).num_days() as f64 / span * frame.plot_width()
        }
    };
    let points: Vec<String> = daily
        .iter()
        .map(|(d, v)| format!("{:.2},{:.2}", x_of(*d), frame.y(to_f64(*v))))
        .collect();
    doc = doc.add(
        Polyline::new()
            .set("points", points.join(" "))
            .set("fill", "none")
            .set("stroke", COLORS[0])
            .set("stroke-width", 2.0),
    );
    for (d, v) in daily {
        doc = doc.add(
            Circle::new()
                .set("cx", x_of(*d))
                .set("cy", frame.y(to_f64(*v)))
                .set("r", 4.0)
                .set("fill", COLORS[0]),
        );
    }
    doc.add(label(&first.to_string(), x_of(first), HEIGHT - MARGIN_BOTTOM + 20.0, "start"))
        .add(label(&last.to_string(), x_of(last), HEIGHT - MARGIN_BOTTOM + 20.0, "end"))
}

/// `None` when there is nothing to apportion.
pub fn pie_chart(totals: &[(Category, Decimal)]) -> Option<Document> {
    let sum: f64 = totals.iter().map(|(_, d)| to_f64(*d)).sum();
    if sum <= 0.0 {
        return None;
    }
    let (cx, cy, r) = (WIDTH / 2.0, HEIGHT / 2.0 + 20.0, 220.0);
    let mut doc = blank_document().add(label(
        "Proportional Spending by Category",
        WIDTH / 2.0,
        MARGIN_TOP / 2.0,
        "middle",
    ));
    let mut start = -PI / 2.0;
    for (i, (cat, total)) in totals.iter().enumerate() {
        let share = to_f64(*total) / sum;
        if share <= 0.0 {
            continue;
        }
        let end = start + share * 2.0 * PI;
        // Arc approximated with one vertex per degree
        let steps = ((end - start).to_degrees().ceil() as usize).max(1);
        let mut data = Data::new().move_to((cx, cy));
        for s in 0..=steps {
            let a = start + (end - start) * s as f64 / steps as f64;
            data = data.line_to((cx + r * a.cos(), cy + r * a.sin()));
        }
        doc = doc.add(
            SvgPath::new()
                .set("d", data.close())
                .set("fill", COLORS[i % COLORS.len()])
                .set("stroke", "white"),
        );
        let mid = (start + end) / 2.0;
        doc = doc
            .add(label(
                &format!("{:.1}%", share * 100.0),
                cx + r * 0.6 * mid.cos(),
                cy + r * 0.6 * mid.sin(),
                "middle",
            ))
            .add(label(
                cat.as_str(),
                cx + (r + 24.0) * mid.cos(),
                cy + (r + 24.0) * mid.sin(),
                "middle",
            ));
        start = end;
    }
    Some(doc)
}

pub fn histogram_chart(amounts: &[f64]) -> Option<Document> {
    let hist = histogram(amounts, HISTOGRAM_BINS)?;
    let lo = hist.edges[0];
    let hi = hist.edges[hist.edges.len() - 1];
    let bw = hist.bin_width();
    // Density scaled to counts so it shares the frequency axis
    let curve: Vec<(f64, f64)> = kde_curve(amounts, lo, hi, KDE_POINTS)
        .map(|c| {
            c.into_iter()
                .map(|(x, y)| (x, y * amounts.len() as f64 * bw))
                .collect()
        })
        .unwrap_or_default();
    let ymax = max_of(
        hist.counts
            .iter()
            .map(|c| *c as f64)
            .chain(curve.iter().map(|(_, y)| *y)),
    );
    let frame = Frame::new(0.0, ymax);
    let mut doc = frame.document("Frequency of Expense Amounts", "Amount", "Frequency");
    let x_of = |x: f64| MARGIN_LEFT + (x - lo) / (hi - lo) * frame.plot_width();
    for (i, count) in hist.counts.iter().enumerate() {
        let x0 = x_of(hist.edges[i]);
        let x1 = x_of(hist.edges[i + 1]);
        let y = frame.y(*count as f64);
        doc = doc.add(
            Rectangle::new()
                .set("x", x0)
                .set("y", y)
                .set("width", x1 - x0)
                .set("height", frame.y(0.0) - y)
                .set("fill", COLORS[0])
                .set("fill-opacity", 0.6)
                .set("stroke", "white"),
        );
    }
    if !curve.is_empty() {
        let points: Vec<String> = curve
            .iter()
            .map(|(x, y)| format!("{:.2},{:.2}", x_of(*x), frame.y(*y)))
            .collect();
        doc = doc.add(
            Polyline::new()
                .set("points", points.join(" "))
                .set("fill", "none")
                .set("stroke", COLORS[3])
                .set("stroke-width", 2.0),
        );
    }
    let doc = doc
        .add(label(&format!("{:.2}", lo), x_of(lo), HEIGHT - MARGIN_BOTTOM + 20.0, "start"))
        .add(label(&format!("{:.2}", hi), x_of(hi), HEIGHT - MARGIN_BOTTOM + 20.0, "end"));
    Some(doc)
}

/// Plot area with a linear y scale from `ymin` to `ymax`.
struct Frame {
    ymin: f64,
    ymax: f64,
}

impl Frame {
    fn new(ymin: f64, ymax: f64) -> Self {
        let ymax = if ymax > ymin { ymax * 1.1 } else { ymin + 1.0 };
        Self { ymin, ymax }
    }

    fn plot_width(&self) -> f64 {
        WIDTH - MARGIN_LEFT - MARGIN_RIGHT
    }

    fn plot_height(&self) -> f64 {
        HEIGHT - MARGIN_TOP - MARGIN_BOTTOM
    }

    fn y(&self, v: f64) -> f64 {
        MARGIN_TOP + (self.ymax - v) / (self.ymax - self.ymin) * self.plot_height()
    }

    fn document(&self, title: &str, xlabel: &str, ylabel: &str) -> Document {
        let base = HEIGHT - MARGIN_BOTTOM;
        let mut doc = blank_document()
            .add(label(title, WIDTH / 2.0, MARGIN_TOP / 2.0, "middle"))
            .add(axis(MARGIN_LEFT, MARGIN_TOP, MARGIN_LEFT, base))
            .add(axis(MARGIN_LEFT, base, WIDTH - MARGIN_RIGHT, base))
            .add(label(xlabel, MARGIN_LEFT + self.plot_width() / 2.0, HEIGHT - 25.0, "middle"))
            .add(
                label(ylabel, 20.0, MARGIN_TOP + self.plot_height() / 2.0, "middle").set(
                    "transform",
                    format!("rotate(-90 20 {})", MARGIN_TOP + self.plot_height() / 2.0),
                ),
            );
        for i in 0..=Y_TICKS {
            let v = self.ymin + (self.ymax - self.ymin) * i as f64 / Y_TICKS as f64;
            let y = self.y(v);
            doc = doc
                .add(axis(MARGIN_LEFT - 5.0, y, MARGIN_LEFT, y))
                .add(label(&format!("{:.1}", v), MARGIN_LEFT - 8.0, y + 4.0, "end"));
        }
        doc
    }
}

fn blank_document() -> Document {
    Document::new()
        .set("viewBox", (0.0, 0.0, WIDTH, HEIGHT))
        .set("width", WIDTH)
        .set("height", HEIGHT)
        .add(
            Rectangle::new()
                .set("width", WIDTH)
                .set("height", HEIGHT)
                .set("fill", "white"),
        )
}

fn axis(x1: f64, y1: f64, x2: f64, y2: f64) -> Line {
    Line::new()
        .set("x1", x1)
        .set("y1", y1)
        .set("x2", x2)
        .set("y2", y2)
        .set("stroke", "black")
        .set("stroke-width", 1.5)
}

fn label(s: &str, x: f64, y: f64, anchor: &str) -> Text {
    Text::new()
        .add(TextNode::new(s))
        .set("x", x)
        .set("y", y)
        .set("text-anchor", anchor)
        .set("font-family", "sans-serif")
        .set("font-size", 14)
}

fn save(doc: &Document, dir: &Path, name: &str, report: &mut ChartReport) -> Result<()> {
    let path = dir.join(name);
    svg::save(&path, doc).with_context(|| format!("Write chart {}", path.display()))?;
    debug!("wrote chart {}", path.display());
    report.written.push(path);
    Ok(())
}

fn max_of(values: impl Iterator<Item = f64>) -> f64 {
    values.fold(0.0, f64::max)
}

fn to_f64(d: Decimal) -> f64 {
    d.to_f64().unwrap_or(0.0)
}
