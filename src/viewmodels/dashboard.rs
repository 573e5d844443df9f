// CrowdSec Monitor - Dashboard
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Dashboard statistics, with every ranking cut to the configured size.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::warn;

use crate::api::CrowdSecClient;
use crate::models::Statistics;
use crate::state::{LoadingState, Observable};

pub struct DashboardViewModel {
    client: Arc<CrowdSecClient>,
    top_items: usize,
    state: Observable<LoadingState<Statistics>>,
}

impl DashboardViewModel {
    pub fn new(client: Arc<CrowdSecClient>, top_items: u32) -> Self {
        Self {
            client,
            top_items: top_items.max(1) as usize,
            state: Observable::default(),
        }
    }

    pub fn state(&self) -> watch::Ref<'_, LoadingState<Statistics>> {
        self.state.get()
    }

    pub fn subscribe(&self) -> watch::Receiver<LoadingState<Statistics>> {
        self.state.subscribe()
    }

    pub async fn fetch(&mut self) {
        let top_items = self.top_items;
        let result = self
            .client
            .statistics()
            .overview(None, None)
            .await
            .map(|r| {
                let mut statistics = r.body;
                statistics.truncate_rankings(top_items);
                statistics
            });
        if let Err(e) = &result {
            warn!("Failed to fetch statistics: {}", e);
        }
        self.state.set(LoadingState::from_result(result));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::statistics::tests::statistics_json;
    use crate::testing::MockServer;

    #[tokio::test]
    async fn test_rankings_are_trimmed() {
        let server = MockServer::start(|_| (200, statistics_json().to_string())).await;
        let client = Arc::new(CrowdSecClient::new(&server.connection).unwrap());

        let mut vm = DashboardViewModel::new(client, 1);
        vm.fetch().await;

        let state = vm.state();
        let statistics = state.data().unwrap();
        assert_eq!(statistics.top_countries.len(), 1);
        assert_eq!(statistics.top_countries[0].country_code, "CN");
        assert!(statistics.top_scenarios.len() <= 1);
        assert!(statistics.top_ip_owners.len() <= 1);
        assert!(statistics.top_targets.len() <= 1);
        assert!(!statistics.activity_history.is_empty());
    }

    #[tokio::test]
    async fn test_unauthorized_is_reported() {
        let server = MockServer::start(|_| (401, String::new())).await;
        let client = Arc::new(CrowdSecClient::new(&server.connection).unwrap());

        let mut vm = DashboardViewModel::new(client, 5);
        vm.fetch().await;
        assert!(vm.state().error().unwrap().is_unauthorized());
    }
}
