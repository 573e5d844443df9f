// CrowdSec Monitor - Full Ranking
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Complete ranking for one statistics dimension, as chart slices.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::warn;

use crate::api::CrowdSecClient;
use crate::models::{RankedItem, StatisticsDimension};
use crate::state::{LoadingState, Observable};
use crate::stats::{breakdown, BreakdownItem};

/// Raw ranking plus its breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranking {
    pub items: Vec<RankedItem>,
    pub slices: Vec<BreakdownItem>,
}

pub struct RankingViewModel {
    client: Arc<CrowdSecClient>,
    dimension: StatisticsDimension,
    state: Observable<LoadingState<Ranking>>,
}

impl RankingViewModel {
    pub fn new(client: Arc<CrowdSecClient>, dimension: StatisticsDimension) -> Self {
        Self {
            client,
            dimension,
            state: Observable::default(),
        }
    }

    pub fn dimension(&self) -> StatisticsDimension {
        self.dimension
    }

    pub fn state(&self) -> watch::Ref<'_, LoadingState<Ranking>> {
        self.state.get()
    }

    pub fn subscribe(&self) -> watch::Receiver<LoadingState<Ranking>> {
        self.state.subscribe()
    }

    pub async fn fetch(&mut self) {
        let result = self.client.statistics().dimension(self.dimension).await;
        let state = match result {
            Ok(response) => {
                let items = response.body;
                let slices = breakdown(&items);
                LoadingState::Success(Ranking { items, slices })
            }
            Err(e) => {
                warn!("Failed to fetch {} ranking: {}", self.dimension, e);
                LoadingState::Failure(Arc::new(e))
            }
        };
        self.state.set(state);
    }
}
