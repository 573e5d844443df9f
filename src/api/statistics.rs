// CrowdSec Monitor - Statistics API
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Statistics endpoints: the dashboard overview and the per-dimension rankings.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;

use super::endpoints;
use super::error::HttpClientError;
use super::http::{HttpClient, HttpResponse, Query};
use crate::format;
use crate::models::statistics::{TopCountry, TopIpOwner, TopScenario, TopTarget};
use crate::models::{RankedItem, Statistics, StatisticsDimension};

/// Typed access to `/api/v1/statistics`.
#[derive(Debug, Clone, Copy)]
pub struct StatisticsApi<'a> {
    http: &'a HttpClient,
}

impl<'a> StatisticsApi<'a> {
    pub fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// Dashboard statistics. `amount` caps the rankings, `since` bounds the history.
    pub async fn overview(
        &self,
        amount: Option<u32>,
        since: Option<NaiveDate>,
    ) -> Result<HttpResponse<Statistics>, HttpClientError> {
        let mut query: Query = Vec::new();
        if let Some(amount) = amount {
            query.push(("amount", amount.to_string()));
        }
        if let Some(since) = since {
            query.push(("since", format::yyyy_mm_dd(since)));
        }
        self.http.get(endpoints::STATISTICS, &query).await
    }

    /// Full ranking for one dimension.
    pub async fn dimension(
        &self,
        dimension: StatisticsDimension,
    ) -> Result<HttpResponse<Vec<RankedItem>>, HttpClientError> {
        match dimension {
            StatisticsDimension::Countries => self.ranking::<TopCountry>(dimension).await,
            StatisticsDimension::IpOwners => self.ranking::<TopIpOwner>(dimension).await,
            StatisticsDimension::Scenarios => self.ranking::<TopScenario>(dimension).await,
            StatisticsDimension::Targets => self.ranking::<TopTarget>(dimension).await,
        }
    }

    async fn ranking<T>(
        &self,
        dimension: StatisticsDimension,
    ) -> Result<HttpResponse<Vec<RankedItem>>, HttpClientError>
    where
        T: DeserializeOwned + Into<RankedItem>,
    {
        let response: HttpResponse<Vec<T>> =
            self.http.get(&endpoints::statistics_dimension(dimension), &[]).await?;
        Ok(HttpResponse {
            successful: response.successful,
            status_code: response.status_code,
            body: response.body.into_iter().map(Into::into).collect(),
        })
    }
}
