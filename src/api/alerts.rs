// CrowdSec Monitor - Alerts API
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Alerts endpoints.

use super::endpoints;
use super::error::HttpClientError;
use super::http::{HttpClient, HttpResponse, Query};
use crate::models::{AlertDetails, AlertsList, AlertsRequest};

/// Typed access to `/api/v1/alerts`.
#[derive(Debug, Clone, Copy)]
pub struct AlertsApi<'a> {
    http: &'a HttpClient,
}

impl<'a> AlertsApi<'a> {
    pub fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// One page of alerts matching the filters.
    pub async fn list(
        &self,
        request: &AlertsRequest,
    ) -> Result<HttpResponse<AlertsList>, HttpClientError> {
        self.http.get(endpoints::ALERTS, &list_query(request)).await
    }

    pub async fn get(&self, id: i64) -> Result<HttpResponse<AlertDetails>, HttpClientError> {
        self.http.get(&endpoints::alert(id), &[]).await
    }

    pub async fn delete(&self, id: i64) -> Result<HttpResponse<serde_json::Value>, HttpClientError> {
        self.http.delete(&endpoints::alert(id)).await
    }
}

/// One parameter per selected value, then the pagination cursor.
pub(crate) fn list_query(request: &AlertsRequest) -> Query {
    let filters = &request.filters;
    let mut query: Query = Vec::with_capacity(filters.active_count() + 2);

    query.extend(filters.countries.iter().map(|v| ("country", v.clone())));
    query.extend(filters.scenarios.iter().map(|v| ("scenario", v.clone())));
    query.extend(filters.ip_owners.iter().map(|v| ("ipOwner", v.clone())));
    query.extend(filters.targets.iter().map(|v| ("target", v.clone())));

    query.push(("offset", request.page.offset.to_string()));
    query.push(("limit", request.page.limit.to_string()));
    query
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::alert::tests::alert_json;
    use crate::models::{AlertsFilters, PageRequest};
    use crate::testing::MockServer;

    #[test]
    fn test_query_without_filters_is_only_pagination() {
        let query = list_query(&AlertsRequest::default());
        assert_eq!(query, vec![("offset", "0".to_string()), ("limit", "20".to_string())]);
    }

    #[test]
    fn test_query_repeats_each_selected_value() {
        let request = AlertsRequest {
            filters: AlertsFilters {
                countries: vec!["FR".into(), "DE".into()],
                scenarios: vec!["crowdsecurity/ssh-bf".into()],
                ip_owners: vec![],
                targets: vec!["example.com".into()],
            },
            page: PageRequest { offset: 40, limit: 20 },
        };
        let keys: Vec<&str> = list_query(&request).iter().map(|(k, _)| *k).collect();
        assert_eq!(
            keys,
            vec!["country", "country", "scenario", "target", "offset", "limit"]
        );
    }

    #[tokio::test]
    async fn test_list_and_detail_paths() {
        let server = MockServer::start(|req| {
            if req.path == "/api/v1/alerts" {
                let body = serde_json::json!({
                    "filtering": {"countries": ["FR"], "scenarios": [], "ipOwners": [], "targets": []},
                    "items": [alert_json(1)],
                    "pagination": {"page": 1, "amount": 1, "total": 1}
                });
                (200, body.to_string())
            } else {
                let mut body = alert_json(9);
                body["decisions"] = serde_json::json!([]);
                (200, body.to_string())
            }
        })
        .await;
        let http = HttpClient::new(&server.connection).unwrap();
        let api = AlertsApi::new(&http);

        let request = AlertsRequest {
            filters: AlertsFilters {
                scenarios: vec!["crowdsecurity/http-probing".into()],
                ..Default::default()
            },
            ..Default::default()
        };
        let list = api.list(&request).await.unwrap();
        assert_eq!(list.body.items.len(), 1);
        assert_eq!(list.body.filtering.countries, vec!["FR"]);

        let details = api.get(9).await.unwrap();
        assert_eq!(details.body.alert.id, 9);

        let recorded = server.requests();
        assert_eq!(recorded[0].params("scenario"), vec!["crowdsecurity/http-probing"]);
        assert_eq!(recorded[1].path, "/api/v1/alerts/9");
        assert!(recorded[1].query.is_empty());
    }

    #[tokio::test]
    async fn test_delete_uses_delete_method() {
        let server = MockServer::start(|_| (200, "{}".to_string())).await;
        let http = HttpClient::new(&server.connection).unwrap();

        AlertsApi::new(&http).delete(4).await.unwrap();
        let recorded = server.requests();
        assert_eq!(recorded[0].method, "DELETE");
        assert_eq!(recorded[0].path, "/api/v1/alerts/4");
    }
}
