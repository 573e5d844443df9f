// CrowdSec Monitor - Models
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Data models for CrowdSec entities and API payloads.

pub mod alert;
pub mod decision;
pub mod request;
pub mod server;
pub mod source;
pub mod statistics;
pub mod status;

pub use alert::{Alert, AlertDetails, AlertsFiltering, AlertsList, Event, Meta, Pagination, Scenario};
pub use decision::{
    CreateDecisionRequest, Decision, DecisionDetails, DecisionType, DecisionsFiltering, DecisionsList,
};
pub use request::{
    AlertsFilters, AlertsRequest, DecisionsFilters, DecisionsRequest, PageRequest, DEFAULT_PAGE_SIZE,
};
pub use server::{AuthMethod, ConnectionError, ConnectionMethod, ServerConnection};
pub use source::Source;
pub use statistics::{ActivityHistory, RankedItem, Statistics, StatisticsDimension};
pub use status::{ApiStatus, LapiStatus, MonitorApiStatus};
