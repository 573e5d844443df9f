// CrowdSec Monitor - Date Formatting
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Display helpers for dates and times.

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone};

/// `yyyy-MM-dd`, the format the statistics endpoint expects.
pub fn yyyy_mm_dd(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parse `yyyy-MM-dd`.
pub fn parse_yyyy_mm_dd(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// `MMM dd`, e.g. "Feb 09". Used for chart axes.
pub fn short_date(date: NaiveDate) -> String {
    date.format("%b %d").to_string()
}

/// `HH:mm:ss` in the timestamp's own zone.
pub fn time_of_day<Tz: TimeZone>(dt: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    dt.format("%H:%M:%S").to_string()
}

/// "today", "yesterday" or `dd-MM-yyyy`, relative to `today`.
pub fn relative_day(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        "today".to_string()
    } else if today.pred_opt() == Some(date) {
        "yesterday".to_string()
    } else {
        format!("{:02}-{:02}-{:04}", date.day(), date.month(), date.year())
    }
}

/// "5m ago" / "3h ago" / "2d ago" style age of a timestamp.
pub fn ago<Tz: TimeZone>(dt: &DateTime<Tz>, now: &DateTime<Tz>) -> String {
    let elapsed = now.clone().signed_duration_since(dt.clone());
    if elapsed < Duration::minutes(1) {
        "just now".to_string()
    } else if elapsed < Duration::hours(1) {
        format!("{}m ago", elapsed.num_minutes())
    } else if elapsed < Duration::days(1) {
        format!("{}h ago", elapsed.num_hours())
    } else {
        format!("{}d ago", elapsed.num_days())
    }
}
