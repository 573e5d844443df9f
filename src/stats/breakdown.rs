// CrowdSec Monitor - Percentage Breakdown
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Percentage breakdown of a ranking for pie-chart display.

use super::models::{BreakdownItem, OTHER_COLOR, OTHER_LABEL, PALETTE};
use crate::models::RankedItem;

/// Breakdown using the default palette.
pub fn breakdown(items: &[RankedItem]) -> Vec<BreakdownItem> {
    breakdown_with_palette(items, &PALETTE)
}

/// Split `items` into coloured slices.
///
/// Items are ranked by count (ties keep input order). The first
/// `palette.len()` items get a palette colour, the rest fold into one
/// "Other" slice carrying their summed count and percentage. All
/// percentages are 0 when the total is 0.
pub fn breakdown_with_palette(items: &[RankedItem], palette: &[&'static str]) -> Vec<BreakdownItem> {
    let total: u64 = items.iter().map(|i| i.amount).sum();
    let share = |amount: u64| {
        if total == 0 {
            0.0
        } else {
            amount as f64 / total as f64
        }
    };

    let mut ranked: Vec<&RankedItem> = items.iter().collect();
    ranked.sort_by(|a, b| b.amount.cmp(&a.amount));

    let visible = ranked.len().min(palette.len());
    let mut result: Vec<BreakdownItem> = ranked[..visible]
        .iter()
        .zip(palette.iter())
        .map(|(item, &color)| BreakdownItem {
            label: item.label.clone(),
            amount: item.amount,
            percentage: share(item.amount),
            color,
            is_other: false,
        })
        .collect();

    let overflow = &ranked[visible..];
    if !overflow.is_empty() {
        let amount: u64 = overflow.iter().map(|i| i.amount).sum();
        result.push(BreakdownItem {
            label: OTHER_LABEL.to_string(),
            amount,
            percentage: overflow.iter().map(|i| share(i.amount)).sum(),
            color: OTHER_COLOR,
            is_other: true,
        });
    }

    result
}
