// CrowdSec Monitor - Alert Model
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Alerts raised by CrowdSec scenarios.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::decision::Decision;
use super::source::Source;
use crate::api::dates::timestamp;

/// Key/value metadata attached to an alert or an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    pub key: String,
    #[serde(deserialize_with = "one_or_many")]
    pub value: Vec<String>,
}

/// One event that contributed to an alert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub meta: Vec<Meta>,
    #[serde(with = "timestamp")]
    pub timestamp: DateTime<Utc>,
}

impl Event {
    /// First value recorded for `key`, if any.
    pub fn meta_value(&self, key: &str) -> Option<&str> {
        self.meta
            .iter()
            .find(|m| m.key == key)
            .and_then(|m| m.value.first())
            .map(String::as_str)
    }
}

/// An alert as returned by the list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: i64,
    #[serde(default)]
    pub uuid: String,
    pub scenario: String,
    #[serde(default)]
    pub scenario_version: String,
    #[serde(default)]
    pub scenario_hash: String,
    pub message: String,
    pub capacity: i64,
    pub leakspeed: String,
    pub simulated: bool,
    pub remediation: bool,
    pub events_count: i64,
    pub machine_id: String,
    pub source: Source,
    #[serde(default)]
    pub meta: Vec<Meta>,
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(with = "timestamp")]
    pub crowdsec_created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub start_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub stop_at: DateTime<Utc>,
}

impl Alert {
    pub fn scenario(&self) -> Scenario {
        Scenario::parse(&self.scenario)
    }

    /// Values recorded for a meta key (e.g. "target_uri").
    pub fn meta_values(&self, key: &str) -> &[String] {
        self.meta
            .iter()
            .find(|m| m.key == key)
            .map(|m| m.value.as_slice())
            .unwrap_or(&[])
    }
}

/// An alert with the decisions it produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertDetails {
    #[serde(flatten)]
    pub alert: Alert,
    #[serde(default)]
    pub decisions: Vec<Decision>,
}

/// Filter values available on the alerts list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AlertsFiltering {
    #[serde(default)]
    pub countries: Vec<String>,
    #[serde(default)]
    pub scenarios: Vec<String>,
    #[serde(default)]
    pub ip_owners: Vec<String>,
    #[serde(default)]
    pub targets: Vec<String>,
}

/// Page metadata for list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Pagination {
    /// 1-based index of the page just returned.
    pub page: u32,
    /// Items on this page.
    pub amount: u32,
    /// Items matching the query across all pages.
    pub total: u32,
}

/// Body of `GET /api/v1/alerts`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertsList {
    #[serde(default)]
    pub filtering: AlertsFiltering,
    pub items: Vec<Alert>,
    pub pagination: Pagination,
}

/// A scenario identifier of the form `author/name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    pub author: Option<String>,
    pub name: String,
}

const HUB_BASE_URL: &str = "https://app.crowdsec.net/hub/author";

impl Scenario {
    pub fn parse(raw: &str) -> Self {
        match raw.split_once('/') {
            Some((author, name)) if !author.is_empty() && !name.is_empty() => Self {
                author: Some(author.to_string()),
                name: name.to_string(),
            },
            _ => Self {
                author: None,
                name: raw.to_string(),
            },
        }
    }

    /// CrowdSec Hub page for this scenario. Local scenarios have no author and no page.
    pub fn hub_url(&self) -> Option<String> {
        self.author
            .as_ref()
            .map(|author| format!("{}/{}/scenarios/{}", HUB_BASE_URL, author, self.name))
    }
}

/// Accept `"x"` as well as `["x", "y"]`. Detail and list payloads disagree.
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(v) => vec![v],
        OneOrMany::Many(v) => v,
    })
}
