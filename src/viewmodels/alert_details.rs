// CrowdSec Monitor - Alert Details
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Single alert with its decisions.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::warn;

use crate::api::CrowdSecClient;
use crate::models::AlertDetails;
use crate::state::{LoadingState, Observable};

pub struct AlertDetailsViewModel {
    client: Arc<CrowdSecClient>,
    alert_id: i64,
    state: Observable<LoadingState<AlertDetails>>,
}

impl AlertDetailsViewModel {
    pub fn new(client: Arc<CrowdSecClient>, alert_id: i64) -> Self {
        Self {
            client,
            alert_id,
            state: Observable::default(),
        }
    }

    pub fn alert_id(&self) -> i64 {
        self.alert_id
    }

    pub fn state(&self) -> watch::Ref<'_, LoadingState<AlertDetails>> {
        self.state.get()
    }

    pub fn subscribe(&self) -> watch::Receiver<LoadingState<AlertDetails>> {
        self.state.subscribe()
    }

    pub async fn fetch(&mut self) {
        let result = self.client.alerts().get(self.alert_id).await.map(|r| r.body);
        if let Err(e) = &result {
            warn!("Failed to fetch alert {}: {}", self.alert_id, e);
        }
        self.state.set(LoadingState::from_result(result));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::alert::tests::alert_json;
    use crate::models::decision::tests::decision_json;
    use crate::testing::MockServer;

    #[tokio::test]
    async fn test_fetch_details() {
        let server = MockServer::start(|req| {
            if req.path == "/api/v1/alerts/7" {
                let mut body = alert_json(7);
                body["decisions"] = serde_json::json!([decision_json(1, "2030-01-01T00:00:00Z")]);
                (200, body.to_string())
            } else {
                (404, "{}".to_string())
            }
        })
        .await;
        let client = Arc::new(CrowdSecClient::new(&server.connection).unwrap());

        let mut vm = AlertDetailsViewModel::new(client.clone(), 7);
        vm.fetch().await;
        let state = vm.state();
        let details = state.data().unwrap();
        assert_eq!(details.alert.id, 7);
        assert_eq!(details.decisions.len(), 1);
        drop(state);

        let mut missing = AlertDetailsViewModel::new(client, 8);
        missing.fetch().await;
        assert_eq!(missing.state().error().and_then(|e| e.status()), Some(404));
    }
}
