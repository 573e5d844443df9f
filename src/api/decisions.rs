// CrowdSec Monitor - Decisions API
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Decisions endpoints.

use super::endpoints;
use super::error::HttpClientError;
use super::http::{HttpClient, HttpResponse, Query};
use crate::models::{CreateDecisionRequest, DecisionDetails, DecisionsList, DecisionsRequest};

/// Typed access to `/api/v1/decisions`.
#[derive(Debug, Clone, Copy)]
pub struct DecisionsApi<'a> {
    http: &'a HttpClient,
}

impl<'a> DecisionsApi<'a> {
    pub fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    pub async fn list(
        &self,
        request: &DecisionsRequest,
    ) -> Result<HttpResponse<DecisionsList>, HttpClientError> {
        self.http.get(endpoints::DECISIONS, &list_query(request)).await
    }

    pub async fn get(&self, id: i64) -> Result<HttpResponse<DecisionDetails>, HttpClientError> {
        self.http.get(&endpoints::decision(id), &[]).await
    }

    /// Create a manual decision.
    pub async fn create(
        &self,
        body: &CreateDecisionRequest,
    ) -> Result<HttpResponse<serde_json::Value>, HttpClientError> {
        self.http.post(endpoints::DECISIONS, body).await
    }

    /// Expire a decision before its expiration time.
    pub async fn delete(&self, id: i64) -> Result<HttpResponse<serde_json::Value>, HttpClientError> {
        self.http.delete(&endpoints::decision(id)).await
    }
}

pub(crate) fn list_query(request: &DecisionsRequest) -> Query {
    let mut query: Query = Vec::with_capacity(4);

    if let Some(only_active) = request.filters.only_active {
        query.push(("only_active", only_active.to_string()));
    }
    if let Some(hide) = request.filters.hide_active_duplicated {
        query.push(("hide_active_duplicated", hide.to_string()));
    }

    query.push(("offset", request.page.offset.to_string()));
    query.push(("limit", request.page.limit.to_string()));
    query
}
