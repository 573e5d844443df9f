// CrowdSec Monitor - Paging
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Offset pagination shared by the alerts and decisions lists.

use std::collections::HashSet;

use crate::models::{Alert, Decision, Pagination};

/// Items with a server-assigned id.
pub trait Identified {
    fn id(&self) -> i64;
}

impl Identified for Alert {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Identified for Decision {
    fn id(&self) -> i64 {
        self.id
    }
}

/// Whether another page exists after the one described by `pagination`.
pub fn has_more(pagination: &Pagination, limit: u32) -> bool {
    u64::from(pagination.page) * u64::from(limit) < u64::from(pagination.total)
}

/// Offset of the page following `pagination`.
pub fn next_offset(pagination: &Pagination, limit: u32) -> u32 {
    pagination.page.saturating_mul(limit)
}

/// Append the items of `incoming` whose id is not yet in `items`.
///
/// Order is kept. Ids repeated within `incoming` are kept once.
pub fn merge_unique<T: Identified>(items: &mut Vec<T>, incoming: Vec<T>) {
    let mut seen: HashSet<i64> = items.iter().map(Identified::id).collect();
    items.extend(incoming.into_iter().filter(|item| seen.insert(item.id())));
}
