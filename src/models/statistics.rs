// CrowdSec Monitor - Statistics Model
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Aggregate statistics shown on the dashboard.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Alerts and decisions recorded on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityHistory {
    pub date: NaiveDate,
    pub amount_alerts: u64,
    pub amount_decisions: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopCountry {
    pub country_code: String,
    pub amount: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopScenario {
    pub scenario: String,
    pub amount: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopIpOwner {
    pub ip_owner: String,
    pub amount: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopTarget {
    pub target: String,
    pub amount: u64,
}

/// Body of `GET /api/v1/statistics`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub alerts_last_24_hours: u64,
    pub active_decisions: u64,
    #[serde(default)]
    pub activity_history: Vec<ActivityHistory>,
    #[serde(default)]
    pub top_countries: Vec<TopCountry>,
    #[serde(default)]
    pub top_scenarios: Vec<TopScenario>,
    #[serde(default)]
    pub top_ip_owners: Vec<TopIpOwner>,
    #[serde(default)]
    pub top_targets: Vec<TopTarget>,
}

/// A (label, count) pair from any ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedItem {
    pub label: String,
    pub amount: u64,
}

impl RankedItem {
    pub fn new(label: impl Into<String>, amount: u64) -> Self {
        Self { label: label.into(), amount }
    }
}

impl From<TopCountry> for RankedItem {
    fn from(v: TopCountry) -> Self {
        RankedItem::new(v.country_code, v.amount)
    }
}

impl From<TopScenario> for RankedItem {
    fn from(v: TopScenario) -> Self {
        RankedItem::new(v.scenario, v.amount)
    }
}

impl From<TopIpOwner> for RankedItem {
    fn from(v: TopIpOwner) -> Self {
        RankedItem::new(v.ip_owner, v.amount)
    }
}

impl From<TopTarget> for RankedItem {
    fn from(v: TopTarget) -> Self {
        RankedItem::new(v.target, v.amount)
    }
}

/// The four ranking dimensions exposed by the statistics endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatisticsDimension {
    Countries,
    IpOwners,
    Scenarios,
    Targets,
}

impl StatisticsDimension {
    pub const ALL: [StatisticsDimension; 4] = [
        StatisticsDimension::Countries,
        StatisticsDimension::IpOwners,
        StatisticsDimension::Scenarios,
        StatisticsDimension::Targets,
    ];

    /// Path segment under `/api/v1/statistics/`.
    pub fn path_segment(&self) -> &'static str {
        match self {
            StatisticsDimension::Countries => "countries",
            StatisticsDimension::IpOwners => "ip-owners",
            StatisticsDimension::Scenarios => "scenarios",
            StatisticsDimension::Targets => "targets",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            StatisticsDimension::Countries => "Countries",
            StatisticsDimension::IpOwners => "IP owners",
            StatisticsDimension::Scenarios => "Scenarios",
            StatisticsDimension::Targets => "Targets",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "countries" | "country" => Some(StatisticsDimension::Countries),
            "ip-owners" | "ipowners" | "ip-owner" => Some(StatisticsDimension::IpOwners),
            "scenarios" | "scenario" => Some(StatisticsDimension::Scenarios),
            "targets" | "target" => Some(StatisticsDimension::Targets),
            _ => None,
        }
    }
}

impl fmt::Display for StatisticsDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path_segment())
    }
}

impl Statistics {
    /// Ranking for one dimension, projected to (label, count).
    pub fn ranking(&self, dimension: StatisticsDimension) -> Vec<RankedItem> {
        match dimension {
            StatisticsDimension::Countries => {
                self.top_countries.iter().cloned().map(RankedItem::from).collect()
            }
            StatisticsDimension::IpOwners => {
                self.top_ip_owners.iter().cloned().map(RankedItem::from).collect()
            }
            StatisticsDimension::Scenarios => {
                self.top_scenarios.iter().cloned().map(RankedItem::from).collect()
            }
            StatisticsDimension::Targets => {
                self.top_targets.iter().cloned().map(RankedItem::from).collect()
            }
        }
    }

    /// Keep only the first `n` entries of every ranking.
    pub fn truncate_rankings(&mut self, n: usize) {
        self.top_countries.truncate(n);
        self.top_scenarios.truncate(n);
        self.top_ip_owners.truncate(n);
        self.top_targets.truncate(n);
    }
}
