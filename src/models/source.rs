// CrowdSec Monitor - Source Model
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Origin of an alert or decision (IP or range plus enrichment).

use serde::{Deserialize, Serialize};

/// Where an alert or decision came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Source {
    /// IP or range the scope applies to.
    pub value: String,
    /// "Ip", "Range", ...
    pub scope: String,
    #[serde(default)]
    pub ip: String,
    #[serde(default)]
    pub range: Option<String>,
    #[serde(default)]
    pub as_name: Option<String>,
    #[serde(default)]
    pub as_number: Option<String>,
    /// ISO country code.
    #[serde(default)]
    pub cn: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl Source {
    /// Country code, ignoring empty strings the server sends for unknown origins.
    pub fn country(&self) -> Option<&str> {
        self.cn.as_deref().filter(|c| !c.is_empty())
    }

    /// "AS1234 Some Owner" style label, if enrichment is available.
    pub fn owner_label(&self) -> Option<String> {
        let name = self.as_name.as_deref().filter(|n| !n.is_empty());
        let number = self.as_number.as_deref().filter(|n| !n.is_empty() && *n != "0");
        match (number, name) {
            (Some(number), Some(name)) => Some(format!("AS{} {}", number, name)),
            (None, Some(name)) => Some(name.to_string()),
            (Some(number), None) => Some(format!("AS{}", number)),
            (None, None) => None,
        }
    }

    /// Latitude/longitude pair, when both are present and not the (0,0) placeholder.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) if !(lat == 0.0 && lon == 0.0) => Some((lat, lon)),
            _ => None,
        }
    }
}
