// CrowdSec Monitor - Date Decoding
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Permissive timestamp decoding for API payloads.
//!
//! The server emits RFC 3339 timestamps, but older LAPI versions and some
//! proxies produce variants. Formats are tried in order and decoding only
//! fails when none of them match.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Fallback layouts carrying an explicit offset.
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f %z",
];

/// Fallback layouts without offset, read as UTC.
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a timestamp string using the supported formats.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    let offset_value = strip_zone_suffix(value);
    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(offset_value, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }

    None
}

/// Drop a trailing zone token chrono cannot consume: a zone name as in Go's
/// `time.String()` (`+0000 UTC`), or the offset printed twice
/// (`+0100 +0100`).
fn strip_zone_suffix(value: &str) -> &str {
    let Some((head, tail)) = value.rsplit_once(' ') else {
        return value;
    };

    if !tail.is_empty() && tail.chars().all(|c| c.is_ascii_alphabetic()) {
        return head;
    }

    let repeated_offset = is_numeric_offset(tail)
        && head.rsplit_once(' ').is_some_and(|(_, previous)| previous == tail);
    if repeated_offset {
        head
    } else {
        value
    }
}

/// `+hhmm` or `-hhmm`.
fn is_numeric_offset(token: &str) -> bool {
    let bytes = token.as_bytes();
    bytes.len() == 5
        && matches!(bytes[0], b'+' | b'-')
        && bytes[1..].iter().all(u8::is_ascii_digit)
}

/// `#[serde(with = "timestamp")]` for required timestamps.
pub mod timestamp {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_timestamp(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("unsupported timestamp: {}", raw)))
    }

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339())
    }
}

/// `#[serde(with = "optional_timestamp")]` for nullable or empty timestamps.
pub mod optional_timestamp {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(raw) if raw.trim().is_empty() => Ok(None),
            Some(raw) => parse_timestamp(&raw)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("unsupported timestamp: {}", raw))),
        }
    }

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => serializer.serialize_some(&dt.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }
}
