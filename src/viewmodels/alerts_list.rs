// CrowdSec Monitor - Alerts List
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Paginated, filterable alerts list.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::paging::{has_more, merge_unique, next_offset};
use crate::api::CrowdSecClient;
use crate::models::{AlertsFilters, AlertsList, AlertsRequest, PageRequest, DEFAULT_PAGE_SIZE};
use crate::state::{LoadingState, Observable};

/// Alerts list state.
///
/// Filters exist twice: the applied set, used for every request, and a draft
/// edited by the filter panel until it is applied or discarded.
pub struct AlertsListViewModel {
    client: Arc<CrowdSecClient>,
    request: AlertsRequest,
    draft: AlertsFilters,
    state: Observable<LoadingState<AlertsList>>,
    deleting: Observable<bool>,
}

impl AlertsListViewModel {
    pub fn new(client: Arc<CrowdSecClient>) -> Self {
        Self {
            client,
            request: AlertsRequest::default(),
            draft: AlertsFilters::default(),
            state: Observable::default(),
            deleting: Observable::new(false),
        }
    }

    pub fn state(&self) -> watch::Ref<'_, LoadingState<AlertsList>> {
        self.state.get()
    }

    pub fn subscribe(&self) -> watch::Receiver<LoadingState<AlertsList>> {
        self.state.subscribe()
    }

    pub fn is_deleting(&self) -> bool {
        *self.deleting.get()
    }

    pub fn subscribe_deleting(&self) -> watch::Receiver<bool> {
        self.deleting.subscribe()
    }

    /// Parameters of the latest request.
    pub fn request(&self) -> &AlertsRequest {
        &self.request
    }

    pub fn applied_filters(&self) -> &AlertsFilters {
        &self.request.filters
    }

    pub fn draft(&self) -> &AlertsFilters {
        &self.draft
    }

    async fn load(&mut self, show_loading: bool) {
        if show_loading {
            self.state.set(LoadingState::Loading);
        }

        debug!(
            "Fetching alerts at offset {} ({} filters)",
            self.request.page.offset,
            self.request.filters.active_count()
        );
        let result = self.client.alerts().list(&self.request).await.map(|r| r.body);
        if let Err(e) = &result {
            warn!("Failed to fetch alerts: {}", e);
        }
        self.state.set(LoadingState::from_result(result));
    }

    /// First load. Does nothing once data is present.
    pub async fn initial_fetch(&mut self) {
        let has_data = self.state.get().data().is_some();
        if !has_data {
            self.load(true).await;
        }
    }

    /// Reload from the first page with the applied filters.
    pub async fn refresh(&mut self) {
        self.request.page = PageRequest::first(self.request.page.limit);
        self.load(false).await;
    }

    /// Append the next page. Returns whether a request was made.
    pub async fn fetch_more(&mut self) -> bool {
        let limit = self.request.page.limit;
        let pagination = match self.state.get().data() {
            Some(list) => list.pagination,
            None => return false,
        };
        if !has_more(&pagination, limit) {
            return false;
        }

        self.request.page.offset = next_offset(&pagination, limit);
        debug!("Fetching more alerts at offset {}", self.request.page.offset);

        match self.client.alerts().list(&self.request).await {
            Ok(response) => {
                let page = response.body;
                self.state.update(|state| {
                    if let LoadingState::Success(list) = state {
                        merge_unique(&mut list.items, page.items);
                        list.filtering = page.filtering;
                        list.pagination = page.pagination;
                    }
                });
            }
            Err(e) => {
                warn!("Failed to fetch more alerts: {}", e);
                self.state.set(LoadingState::Failure(Arc::new(e)));
            }
        }
        true
    }

    /// Replace the draft filters.
    pub fn update_draft(&mut self, filters: AlertsFilters) {
        self.draft = filters;
    }

    /// Drop unapplied edits.
    pub fn discard_draft(&mut self) {
        self.draft = self.request.filters.clone();
    }

    /// Apply the draft and reload from the first page.
    pub async fn apply_filters(&mut self) {
        self.request.filters = self.draft.clone();
        self.request.page = PageRequest::first(self.request.page.limit);
        self.load(true).await;
    }

    /// Clear every filter and reload from the first page.
    pub async fn reset_filters(&mut self) {
        self.draft = AlertsFilters::default();
        self.request = AlertsRequest {
            filters: AlertsFilters::default(),
            page: PageRequest::first(DEFAULT_PAGE_SIZE),
        };
        self.load(true).await;
    }

    /// Delete one alert, then refresh the list.
    pub async fn delete_alert(&mut self, id: i64) -> bool {
        self.deleting.set(true);
        let deleted = match self.client.alerts().delete(id).await {
            Ok(_) => {
                info!("Deleted alert {}", id);
                self.refresh().await;
                true
            }
            Err(e) => {
                warn!("Failed to delete alert {}: {}", id, e);
                false
            }
        };
        self.deleting.set(false);
        deleted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    use crate::models::alert::tests::alert_json;
    use crate::testing::{page_of, MockServer};

    fn alerts(count: i64) -> Vec<serde_json::Value> {
        (1..=count).map(alert_json).collect()
    }

    fn ids(vm: &AlertsListViewModel) -> Vec<i64> {
        vm.state().data().unwrap().items.iter().map(|a| a.id).collect()
    }

    async fn view_model(server: &MockServer) -> AlertsListViewModel {
        let client = CrowdSecClient::new(&server.connection).unwrap();
        AlertsListViewModel::new(Arc::new(client))
    }

    #[tokio::test]
    async fn test_initial_fetch_loads_once() {
        let items = alerts(5);
        let server = MockServer::start(move |req| (200, page_of(&items, req))).await;
        let mut vm = view_model(&server).await;

        assert!(vm.state().is_loading());
        vm.initial_fetch().await;
        assert_eq!(ids(&vm), vec![1, 2, 3, 4, 5]);

        vm.initial_fetch().await;
        assert_eq!(server.hits(), 1);
    }

    #[tokio::test]
    async fn test_fetch_more_skips_overlapping_items() {
        // Each page after the first starts two items early.
        let items = alerts(30);
        let server = MockServer::start(move |req| {
            let offset = req.param_u32("offset") as usize;
            let limit = req.param_u32("limit") as usize;
            let start = offset.saturating_sub(2);
            let page: Vec<_> = items.iter().skip(start).take(limit).cloned().collect();
            let body = serde_json::json!({
                "items": page,
                "pagination": {"page": offset / limit + 1, "amount": page.len(), "total": items.len()}
            });
            (200, body.to_string())
        })
        .await;
        let mut vm = view_model(&server).await;

        vm.initial_fetch().await;
        assert!(vm.fetch_more().await);

        let loaded = ids(&vm);
        assert_eq!(loaded, (1..=30).collect::<Vec<_>>());
        assert_eq!(server.requests()[1].param("offset"), Some("20"));
        assert_eq!(vm.state().data().unwrap().pagination.page, 2);
    }

    #[tokio::test]
    async fn test_fetch_more_stops_at_end() {
        let items = alerts(20);
        let server = MockServer::start(move |req| (200, page_of(&items, req))).await;
        let mut vm = view_model(&server).await;

        assert!(!vm.fetch_more().await);
        assert_eq!(server.hits(), 0);

        vm.initial_fetch().await;
        assert!(!vm.fetch_more().await);
        assert_eq!(server.hits(), 1);
    }

    #[tokio::test]
    async fn test_refresh_restarts_from_first_page() {
        let items = alerts(45);
        let server = MockServer::start(move |req| (200, page_of(&items, req))).await;
        let mut vm = view_model(&server).await;

        vm.initial_fetch().await;
        vm.fetch_more().await;
        assert_eq!(ids(&vm).len(), 40);

        vm.refresh().await;
        assert_eq!(vm.request().page.offset, 0);
        assert_eq!(ids(&vm), (1..=20).collect::<Vec<_>>());
        assert_eq!(server.requests().last().unwrap().param("offset"), Some("0"));
    }

    #[tokio::test]
    async fn test_failure_replaces_data() {
        let failing = Arc::new(AtomicBool::new(false));
        let flag = failing.clone();
        let items = alerts(3);
        let server = MockServer::start(move |req| {
            if flag.load(Ordering::SeqCst) {
                (500, "{}".to_string())
            } else {
                (200, page_of(&items, req))
            }
        })
        .await;
        let mut vm = view_model(&server).await;

        vm.initial_fetch().await;
        assert!(vm.state().data().is_some());

        failing.store(true, Ordering::SeqCst);
        vm.refresh().await;
        assert!(vm.state().data().is_none());
        assert_eq!(vm.state().error().and_then(|e| e.status()), Some(500));
    }

    #[tokio::test]
    async fn test_failed_page_replaces_accumulated_list() {
        let failing = Arc::new(AtomicBool::new(false));
        let flag = failing.clone();
        let items = alerts(45);
        let server = MockServer::start(move |req| {
            if flag.load(Ordering::SeqCst) {
                (500, "{}".to_string())
            } else {
                (200, page_of(&items, req))
            }
        })
        .await;
        let mut vm = view_model(&server).await;

        vm.initial_fetch().await;
        assert_eq!(ids(&vm).len(), 20);

        failing.store(true, Ordering::SeqCst);
        assert!(vm.fetch_more().await);
        assert!(vm.state().data().is_none());
        assert_eq!(vm.state().error().and_then(|e| e.status()), Some(500));
        assert_eq!(server.requests().last().unwrap().param("offset"), Some("20"));
    }

    #[tokio::test]
    async fn test_draft_apply_and_discard() {
        let server = MockServer::start(|req| (200, page_of(&[], req))).await;
        let mut vm = view_model(&server).await;

        vm.update_draft(AlertsFilters {
            countries: vec!["FR".into(), "DE".into()],
            ..Default::default()
        });
        vm.discard_draft();
        assert!(vm.draft().is_empty());

        vm.update_draft(AlertsFilters {
            scenarios: vec!["crowdsecurity/ssh-bf".into()],
            ..Default::default()
        });
        assert!(vm.applied_filters().is_empty());
        vm.apply_filters().await;

        let request = server.requests().pop().unwrap();
        assert_eq!(request.params("scenario"), vec!["crowdsecurity/ssh-bf"]);
        assert_eq!(vm.applied_filters().scenarios.len(), 1);

        vm.reset_filters().await;
        let request = server.requests().pop().unwrap();
        assert!(request.param("scenario").is_none());
        assert!(vm.draft().is_empty());
    }

    #[tokio::test]
    async fn test_delete_alert_refreshes() {
        let items = alerts(2);
        let server = MockServer::start(move |req| match (req.method.as_str(), req.path.as_str()) {
            ("DELETE", "/api/v1/alerts/1") => (200, r#"{"message":"ok"}"#.to_string()),
            ("DELETE", _) => (404, "{}".to_string()),
            _ => (200, page_of(&items, req)),
        })
        .await;
        let mut vm = view_model(&server).await;
        vm.initial_fetch().await;

        assert!(vm.delete_alert(1).await);
        assert!(!vm.is_deleting());
        assert_eq!(server.requests().last().unwrap().method, "GET");

        let hits = server.hits();
        assert!(!vm.delete_alert(9).await);
        assert!(!vm.is_deleting());
        assert_eq!(server.hits(), hits + 1);
    }
}
