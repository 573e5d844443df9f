// CrowdSec Monitor - Decision Details
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Single decision with its originating alert, and manual expiry.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};

use crate::api::CrowdSecClient;
use crate::models::DecisionDetails;
use crate::state::{LoadingState, Observable};

pub struct DecisionDetailsViewModel {
    client: Arc<CrowdSecClient>,
    decision_id: i64,
    state: Observable<LoadingState<DecisionDetails>>,
    expiring: Observable<bool>,
}

impl DecisionDetailsViewModel {
    pub fn new(client: Arc<CrowdSecClient>, decision_id: i64) -> Self {
        Self {
            client,
            decision_id,
            state: Observable::default(),
            expiring: Observable::new(false),
        }
    }

    pub fn decision_id(&self) -> i64 {
        self.decision_id
    }

    pub fn state(&self) -> watch::Ref<'_, LoadingState<DecisionDetails>> {
        self.state.get()
    }

    pub fn subscribe(&self) -> watch::Receiver<LoadingState<DecisionDetails>> {
        self.state.subscribe()
    }

    pub fn is_expiring(&self) -> bool {
        *self.expiring.get()
    }

    /// Load the decision. With `show_loading` the previous data is cleared first.
    pub async fn fetch(&mut self, show_loading: bool) {
        if show_loading {
            self.state.set(LoadingState::Loading);
        }
        let result = self
            .client
            .decisions()
            .get(self.decision_id)
            .await
            .map(|r| r.body);
        if let Err(e) = &result {
            warn!("Failed to fetch decision {}: {}", self.decision_id, e);
        }
        self.state.set(LoadingState::from_result(result));
    }

    /// Switch to another decision and load it.
    pub async fn set_decision(&mut self, decision_id: i64) {
        self.decision_id = decision_id;
        self.fetch(true).await;
    }

    /// Expire the decision and reload it. Returns whether the expiry succeeded.
    pub async fn expire(&mut self) -> bool {
        self.expiring.set(true);
        let expired = match self.client.decisions().delete(self.decision_id).await {
            Ok(_) => {
                info!("Expired decision {}", self.decision_id);
                true
            }
            Err(e) => {
                warn!("Failed to expire decision {}: {}", self.decision_id, e);
                false
            }
        };
        self.fetch(false).await;
        self.expiring.set(false);
        expired
    }
}
