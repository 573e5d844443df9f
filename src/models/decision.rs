// CrowdSec Monitor - Decision Model
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Decisions (bans, captchas, ...) enforced against an IP or range.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::alert::{Alert, Pagination};
use super::source::Source;
use crate::api::dates::timestamp;

/// Remediation type of a decision.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum DecisionType {
    #[default]
    Ban,
    Captcha,
    Other(String),
}

impl From<String> for DecisionType {
    fn from(value: String) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "ban" => DecisionType::Ban,
            "captcha" => DecisionType::Captcha,
            _ => DecisionType::Other(value),
        }
    }
}

impl From<DecisionType> for String {
    fn from(value: DecisionType) -> Self {
        value.to_string()
    }
}

impl fmt::Display for DecisionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecisionType::Ban => write!(f, "ban"),
            DecisionType::Captcha => write!(f, "captcha"),
            DecisionType::Other(other) => write!(f, "{}", other),
        }
    }
}

/// A decision as returned by the list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub id: i64,
    pub alert_id: i64,
    pub origin: String,
    #[serde(rename = "type")]
    pub decision_type: DecisionType,
    pub scope: String,
    pub value: String,
    #[serde(with = "timestamp")]
    pub expiration: DateTime<Utc>,
    pub scenario: String,
    pub simulated: bool,
    pub source: Source,
    #[serde(with = "timestamp")]
    pub crowdsec_created_at: DateTime<Utc>,
}

impl Decision {
    /// Whether the expiration has passed. Independent of any server action.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expiration <= now
    }
}

/// A decision with its parent alert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionDetails {
    #[serde(flatten)]
    pub decision: Decision,
    pub alert: Alert,
}

/// Filter values available on the decisions list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DecisionsFiltering {
    #[serde(default)]
    pub countries: Vec<String>,
    #[serde(default)]
    pub ip_owners: Vec<String>,
}

/// Body of `GET /api/v1/decisions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionsList {
    #[serde(default)]
    pub filtering: DecisionsFiltering,
    pub items: Vec<Decision>,
    pub pagination: Pagination,
}

/// Body of `POST /api/v1/decisions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateDecisionRequest {
    pub ip: String,
    /// Compact duration such as "4h" or "1d2h30m".
    pub duration: String,
    #[serde(rename = "type")]
    pub decision_type: DecisionType,
    pub reason: String,
}
