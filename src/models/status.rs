// CrowdSec Monitor - Status Model
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Health of the monitor API and of the CrowdSec LAPI behind it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::dates::optional_timestamp;

/// Connectivity between the monitor API and the CrowdSec LAPI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LapiStatus {
    pub lapi_connected: bool,
    #[serde(default, with = "optional_timestamp")]
    pub last_successful_sync: Option<DateTime<Utc>>,
    #[serde(default, with = "optional_timestamp")]
    pub timestamp: Option<DateTime<Utc>>,
}

/// Monitor API build information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorApiStatus {
    pub version: String,
    #[serde(default)]
    pub new_version_available: Option<String>,
}

/// Body of `GET /api/v1/status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiStatus {
    pub cs_lapi: LapiStatus,
    pub cs_monitor_api: MonitorApiStatus,
}

impl ApiStatus {
    /// Newer monitor API release, if the server reports one.
    pub fn update_available(&self) -> Option<&str> {
        self.cs_monitor_api
            .new_version_available
            .as_deref()
            .filter(|v| !v.is_empty())
    }
}
