// CrowdSec Monitor - API Module
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! REST client for the CrowdSec Monitor API.
//!
//! ```text
//! View-models → CrowdSecClient → {Alerts,Decisions,Statistics}Api → HttpClient → server
//! ```

pub mod alerts;
pub mod dates;
pub mod decisions;
mod error;
mod http;
pub mod statistics;

pub use alerts::AlertsApi;
pub use decisions::DecisionsApi;
pub use error::HttpClientError;
pub use http::{HttpClient, HttpResponse, Query, REQUEST_TIMEOUT, RESOURCE_TIMEOUT};
pub use statistics::StatisticsApi;

use crate::models::{ApiStatus, LapiStatus, ServerConnection};

/// Endpoint paths, relative to the server base URL.
pub mod endpoints {
    use crate::models::StatisticsDimension;

    pub const LAPI_STATUS: &str = "/api/v1/lapi-status";
    pub const STATUS: &str = "/api/v1/status";
    pub const ALERTS: &str = "/api/v1/alerts";
    pub const DECISIONS: &str = "/api/v1/decisions";
    pub const STATISTICS: &str = "/api/v1/statistics";

    pub fn alert(id: i64) -> String {
        format!("{}/{}", ALERTS, id)
    }

    pub fn decision(id: i64) -> String {
        format!("{}/{}", DECISIONS, id)
    }

    pub fn statistics_dimension(dimension: StatisticsDimension) -> String {
        format!("{}/{}", STATISTICS, dimension.path_segment())
    }
}

/// Entry point for every resource of one server.
#[derive(Debug, Clone)]
pub struct CrowdSecClient {
    http: HttpClient,
}

impl CrowdSecClient {
    pub fn new(server: &ServerConnection) -> Result<Self, HttpClientError> {
        Ok(Self {
            http: HttpClient::new(server)?,
        })
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    pub fn alerts(&self) -> AlertsApi<'_> {
        AlertsApi::new(&self.http)
    }

    pub fn decisions(&self) -> DecisionsApi<'_> {
        DecisionsApi::new(&self.http)
    }

    pub fn statistics(&self) -> StatisticsApi<'_> {
        StatisticsApi::new(&self.http)
    }

    /// `GET /api/v1/lapi-status`.
    pub async fn lapi_status(&self) -> Result<HttpResponse<LapiStatus>, HttpClientError> {
        self.http.get(endpoints::LAPI_STATUS, &[]).await
    }

    /// `GET /api/v1/status`.
    pub async fn api_status(&self) -> Result<HttpResponse<ApiStatus>, HttpClientError> {
        self.http.get(endpoints::STATUS, &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::status::tests::status_json;
    use crate::testing::MockServer;

    #[test]
    fn test_endpoint_paths() {
        assert_eq!(endpoints::alert(12), "/api/v1/alerts/12");
        assert_eq!(endpoints::decision(3), "/api/v1/decisions/3");
        assert_eq!(
            endpoints::statistics_dimension(crate::models::StatisticsDimension::IpOwners),
            "/api/v1/statistics/ip-owners"
        );
    }

    #[tokio::test]
    async fn test_status_endpoints() {
        let server = MockServer::start(|req| match req.path.as_str() {
            "/api/v1/status" => (200, status_json().to_string()),
            "/api/v1/lapi-status" => (200, status_json()["csLapi"].to_string()),
            _ => (404, "{}".to_string()),
        })
        .await;
        let client = CrowdSecClient::new(&server.connection).unwrap();

        let status = client.api_status().await.unwrap();
        assert_eq!(status.body.cs_monitor_api.version, "1.3.0");

        let lapi = client.lapi_status().await.unwrap();
        assert!(lapi.body.lapi_connected);
    }
}
