// CrowdSec Monitor - Breakdown Models
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Chart-ready data structures for ranking breakdowns.

/// Chart colours assigned by rank.
pub const PALETTE: [&str; 8] = [
    "#3584e4", // blue
    "#e66100", // orange
    "#2ec27e", // green
    "#c01c28", // red
    "#9141ac", // purple
    "#f5c211", // yellow
    "#1c71d8", // dark blue
    "#865e3c", // brown
];

/// Colour of the synthetic "Other" slice.
pub const OTHER_COLOR: &str = "#9a9996";

/// Label of the synthetic slice holding everything past the palette.
pub const OTHER_LABEL: &str = "Other";

/// One slice of a pie/donut chart.
#[derive(Debug, Clone, PartialEq)]
pub struct BreakdownItem {
    pub label: String,
    pub amount: u64,
    /// Share of the total, 0.0 to 1.0.
    pub percentage: f64,
    pub color: &'static str,
    /// True for the folded "Other" slice.
    pub is_other: bool,
}

impl BreakdownItem {
    /// Percentage rounded for display, e.g. "42%".
    pub fn percent_label(&self) -> String {
        format!("{}%", (self.percentage * 100.0).round() as i64)
    }
}
