// CrowdSec Monitor - Decisions List
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Paginated decisions list with active/duplicate filtering.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::paging::{has_more, merge_unique, next_offset};
use crate::api::CrowdSecClient;
use crate::config::AppSettings;
use crate::models::{DecisionsFilters, DecisionsList, DecisionsRequest, PageRequest, DEFAULT_PAGE_SIZE};
use crate::state::{LoadingState, Observable};

/// Decisions list state.
///
/// The default filters come from the user preferences at construction.
pub struct DecisionsListViewModel {
    client: Arc<CrowdSecClient>,
    defaults: DecisionsFilters,
    request: DecisionsRequest,
    draft: DecisionsFilters,
    state: Observable<LoadingState<DecisionsList>>,
    expiring: Observable<bool>,
}

impl DecisionsListViewModel {
    pub fn new(client: Arc<CrowdSecClient>, settings: &AppSettings) -> Self {
        let defaults = DecisionsFilters {
            only_active: Some(settings.show_active_decisions_only),
            hide_active_duplicated: Some(settings.hide_duplicated_decisions),
        };
        Self {
            client,
            defaults,
            request: DecisionsRequest {
                filters: defaults,
                page: PageRequest::first(DEFAULT_PAGE_SIZE),
            },
            draft: defaults,
            state: Observable::default(),
            expiring: Observable::new(false),
        }
    }

    pub fn state(&self) -> watch::Ref<'_, LoadingState<DecisionsList>> {
        self.state.get()
    }

    pub fn subscribe(&self) -> watch::Receiver<LoadingState<DecisionsList>> {
        self.state.subscribe()
    }

    pub fn is_expiring(&self) -> bool {
        *self.expiring.get()
    }

    pub fn subscribe_expiring(&self) -> watch::Receiver<bool> {
        self.expiring.subscribe()
    }

    pub fn request(&self) -> &DecisionsRequest {
        &self.request
    }

    pub fn applied_filters(&self) -> DecisionsFilters {
        self.request.filters
    }

    pub fn draft(&self) -> DecisionsFilters {
        self.draft
    }

    async fn load(&mut self, show_loading: bool) {
        if show_loading {
            self.state.set(LoadingState::Loading);
        }

        debug!("Fetching decisions at offset {}", self.request.page.offset);
        let result = self.client.decisions().list(&self.request).await.map(|r| r.body);
        if let Err(e) = &result {
            warn!("Failed to fetch decisions: {}", e);
        }
        self.state.set(LoadingState::from_result(result));
    }

    pub async fn initial_fetch(&mut self) {
        let has_data = self.state.get().data().is_some();
        if !has_data {
            self.load(true).await;
        }
    }

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
        debug!("Fetching more decisions at offset {}", self.request.page.offset);

        match self.client.decisions().list(&self.request).await {
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
                warn!("Failed to fetch more decisions: {}", e);
                self.state.set(LoadingState::Failure(Arc::new(e)));
            }
        }
        true
    }

    pub fn update_draft(&mut self, filters: DecisionsFilters) {
        self.draft = filters;
    }

    pub fn discard_draft(&mut self) {
        self.draft = self.request.filters;
    }

    pub async fn apply_filters(&mut self) {
        self.request.filters = self.draft;
        self.request.page = PageRequest::first(self.request.page.limit);
        self.load(true).await;
    }

    /// Back to the preference defaults.
    pub async fn reset_filters(&mut self) {
        self.draft = self.defaults;
        self.request = DecisionsRequest {
            filters: self.defaults,
            page: PageRequest::first(DEFAULT_PAGE_SIZE),
        };
        self.load(true).await;
    }

    /// Expire (delete) one decision, then refresh the list.
    pub async fn expire_decision(&mut self, id: i64) -> bool {
        self.expiring.set(true);
        let expired = match self.client.decisions().delete(id).await {
            Ok(_) => {
                info!("Expired decision {}", id);
                self.refresh().await;
                true
            }
            Err(e) => {
                warn!("Failed to expire decision {}: {}", id, e);
                false
            }
        };
        self.expiring.set(false);
        expired
    }
}
