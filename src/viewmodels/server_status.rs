// CrowdSec Monitor - Server Status
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Health of the Monitor API and its LAPI link.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::warn;

use crate::api::CrowdSecClient;
use crate::models::ApiStatus;
use crate::state::{LoadingState, Observable};

pub struct ServerStatusViewModel {
    client: Arc<CrowdSecClient>,
    state: Observable<LoadingState<ApiStatus>>,
}

impl ServerStatusViewModel {
    pub fn new(client: Arc<CrowdSecClient>) -> Self {
        Self {
            client,
            state: Observable::default(),
        }
    }

    pub fn state(&self) -> watch::Ref<'_, LoadingState<ApiStatus>> {
        self.state.get()
    }

    pub fn subscribe(&self) -> watch::Receiver<LoadingState<ApiStatus>> {
        self.state.subscribe()
    }

    pub async fn fetch(&mut self) {
        let result = self.client.api_status().await.map(|r| r.body);
        if let Err(e) = &result {
            warn!("Failed to fetch server status: {}", e);
        }
        self.state.set(LoadingState::from_result(result));
    }
}
