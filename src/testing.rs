// CrowdSec Monitor - Test Support
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! In-process HTTP server used by the unit tests.

use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::Router;

use crate::models::{ConnectionMethod, ServerConnection};

/// A request as seen by the mock server.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub authorization: Option<String>,
    pub body: String,
}

impl RecordedRequest {
    /// First value for `key`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// All values for `key`, in order.
    pub fn params(&self, key: &str) -> Vec<&str> {
        self.query
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    pub fn param_u32(&self, key: &str) -> u32 {
        self.param(key).and_then(|v| v.parse().ok()).unwrap_or(0)
    }
}

type Responder = dyn Fn(&RecordedRequest) -> (u16, String) + Send + Sync;

struct MockState {
    responder: Box<Responder>,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// HTTP server on 127.0.0.1 that answers every request through a closure.
pub struct MockServer {
    pub connection: ServerConnection,
    state: Arc<MockState>,
}

impl MockServer {
    pub async fn start<F>(responder: F) -> Self
    where
        F: Fn(&RecordedRequest) -> (u16, String) + Send + Sync + 'static,
    {
        let state = Arc::new(MockState {
            responder: Box::new(responder),
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new().fallback(handle).with_state(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let mut connection = ServerConnection::new(ConnectionMethod::Http, "127.0.0.1");
        connection.port = Some(port);

        Self { connection, state }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn hits(&self) -> usize {
        self.state.requests.lock().unwrap().len()
    }
}

async fn handle(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    let parsed = reqwest::Url::parse(&format!("http://mock{}", uri)).unwrap();
    let request = RecordedRequest {
        method: method.to_string(),
        path: parsed.path().to_string(),
        query: parsed.query_pairs().into_owned().collect(),
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body,
    };

    let (status, payload) = (state.responder)(&request);
    state.requests.lock().unwrap().push(request);

    (
        StatusCode::from_u16(status).unwrap(),
        [(header::CONTENT_TYPE, "application/json")],
        payload,
    )
}

/// Serve `items` as `offset`/`limit` pages in the list envelope.
pub fn page_of(items: &[serde_json::Value], request: &RecordedRequest) -> String {
    let offset = request.param_u32("offset") as usize;
    let limit = request.param_u32("limit").max(1) as usize;
    let page_items: Vec<_> = items.iter().skip(offset).take(limit).cloned().collect();

    serde_json::json!({
        "filtering": {},
        "items": page_items,
        "pagination": {
            "page": offset / limit + 1,
            "amount": page_items.len(),
            "total": items.len()
        }
    })
    .to_string()
}
