// CrowdSec Monitor - Request Models
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Filter and pagination parameters for list requests.

use serde::{Deserialize, Serialize};

/// Number of items requested per page.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Offset/limit cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub offset: u32,
    pub limit: u32,
}

impl PageRequest {
    /// First page with the given size.
    pub fn first(limit: u32) -> Self {
        Self { offset: 0, limit }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first(DEFAULT_PAGE_SIZE)
    }
}

/// Multi-select filters for the alerts list. Empty sets are not sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AlertsFilters {
    pub countries: Vec<String>,
    pub scenarios: Vec<String>,
    pub ip_owners: Vec<String>,
    pub targets: Vec<String>,
}

impl AlertsFilters {
    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
            && self.scenarios.is_empty()
            && self.ip_owners.is_empty()
            && self.targets.is_empty()
    }

    /// Number of selected values across all sets.
    pub fn active_count(&self) -> usize {
        self.countries.len() + self.scenarios.len() + self.ip_owners.len() + self.targets.len()
    }
}

/// Filters for the decisions list. `None` leaves the server default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DecisionsFilters {
    pub only_active: Option<bool>,
    pub hide_active_duplicated: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AlertsRequest {
    pub filters: AlertsFilters,
    pub page: PageRequest,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DecisionsRequest {
    pub filters: DecisionsFilters,
    pub page: PageRequest,
}
