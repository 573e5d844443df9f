// CrowdSec Monitor - HTTP Transport
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! JSON-over-HTTP transport bound to one configured server.

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::error::HttpClientError;
use crate::models::{AuthMethod, ServerConnection};

/// Idle timeout for connecting and between reads.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
/// Upper bound for a whole exchange, body included.
pub const RESOURCE_TIMEOUT: Duration = Duration::from_secs(60);

/// Decoded response with the status it arrived with.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse<T> {
    /// True for 2xx.
    pub successful: bool,
    pub status_code: u16,
    pub body: T,
}

/// Query parameters in send order. Keys may repeat.
pub type Query = Vec<(&'static str, String)>;

/// HTTP client for one server.
///
/// Built once from a [`ServerConnection`] and never mutated. A new client is
/// built when the connection settings change.
#[derive(Debug, Clone)]
pub struct HttpClient {
    base_url: String,
    auth: AuthMethod,
    client: reqwest::Client,
}

impl HttpClient {
    /// Create a client for `server`.
    ///
    /// Certificate validation is disabled when the profile asks for it. That
    /// exposes the session to interception; it exists for self-signed
    /// deployments and is logged every time.
    pub fn new(server: &ServerConnection) -> Result<Self, HttpClientError> {
        let base_url = server.base_url();
        Url::parse(&base_url)
            .map_err(|e| HttpClientError::InvalidRequest(format!("{}: {}", base_url, e)))?;

        let mut builder = reqwest::Client::builder()
            .connect_timeout(REQUEST_TIMEOUT)
            .read_timeout(REQUEST_TIMEOUT)
            .timeout(RESOURCE_TIMEOUT);

        if server.accept_invalid_certs {
            warn!("TLS certificate validation disabled for {}", base_url);
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder.build()?;

        Ok(Self {
            base_url,
            auth: server.auth.clone(),
            client,
        })
    }

    /// Base URL all endpoints are appended to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for an endpoint plus query parameters.
    pub fn url(&self, endpoint: &str, query: &[(&str, String)]) -> Result<Url, HttpClientError> {
        let joined = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        );
        let mut url = Url::parse(&joined)
            .map_err(|e| HttpClientError::InvalidRequest(format!("{}: {}", joined, e)))?;

        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }

    /// Build a request with headers, auth and optional JSON body.
    pub fn build_request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        endpoint: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<reqwest::Request, HttpClientError> {
        let url = self.url(endpoint, query)?;

        let mut builder = self
            .client
            .request(method, url)
            .header(CONTENT_TYPE, "application/json")
            .header(USER_AGENT, concat!("crowdsec-monitor/", env!("CARGO_PKG_VERSION")));

        builder = match &self.auth {
            AuthMethod::None => builder,
            AuthMethod::Basic { user, password } => builder.basic_auth(user, Some(password)),
            AuthMethod::Bearer { token } => builder.bearer_auth(token),
        };

        if let Some(body) = body {
            let bytes = serde_json::to_vec(body)
                .map_err(|e| HttpClientError::InvalidRequest(e.to_string()))?;
            builder = builder.body(bytes);
        }

        builder.build().map_err(HttpClientError::from)
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<HttpResponse<T>, HttpClientError> {
        let request = self.build_request::<()>(Method::GET, endpoint, query, None)?;
        self.execute(request).await
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<HttpResponse<T>, HttpClientError> {
        let request = self.build_request(Method::POST, endpoint, &[], Some(body))?;
        self.execute(request).await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        endpoint: &str,
    ) -> Result<HttpResponse<T>, HttpClientError> {
        let request = self.build_request::<()>(Method::DELETE, endpoint, &[], None)?;
        self.execute(request).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::Request,
    ) -> Result<HttpResponse<T>, HttpClientError> {
        debug!("{} {}", request.method(), request.url());

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| HttpClientError::Network(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            warn!("Server rejected credentials (401)");
            return Err(HttpClientError::Unauthorized);
        }
        if !status.is_success() {
            warn!("Server answered HTTP {}", status.as_u16());
            return Err(HttpClientError::Http {
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                HttpClientError::Network(e.to_string())
            } else {
                HttpClientError::InvalidResponse
            }
        })?;

        let body = decode_body(&bytes).map_err(|e| {
            warn!("Failed to decode response body: {}", e);
            e
        })?;

        Ok(HttpResponse {
            successful: status.is_success(),
            status_code: status.as_u16(),
            body,
        })
    }
}

/// Decode a JSON body. An empty body reads as `null` so mutations can decode to `()`.
fn decode_body<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, HttpClientError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(serde_json::from_slice(b"null")?);
    }
    Ok(serde_json::from_slice(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ConnectionMethod;
    use crate::testing::MockServer;
    use reqwest::header::AUTHORIZATION;

    fn client_with(auth: AuthMethod) -> HttpClient {
        let mut server = ServerConnection::new(ConnectionMethod::Https, "crowdsec.lan");
        server.port = Some(8443);
        server.path = Some("monitor".into());
        server.auth = auth;
        HttpClient::new(&server).unwrap()
    }

    fn auth_header(client: &HttpClient) -> Option<String> {
        let request = client
            .build_request::<()>(Method::GET, "/api/v1/status", &[], None)
            .unwrap();
        request
            .headers()
            .get(AUTHORIZATION)
            .map(|v| v.to_str().unwrap().to_string())
    }

    #[test]
    fn test_no_auth_header() {
        assert_eq!(auth_header(&client_with(AuthMethod::None)), None);
    }

    #[test]
    fn test_basic_auth_header() {
        let client = client_with(AuthMethod::Basic {
            user: "a".into(),
            password: "b".into(),
        });
        assert_eq!(auth_header(&client).as_deref(), Some("Basic YTpi"));
    }

    #[test]
    fn test_bearer_auth_header() {
        let client = client_with(AuthMethod::Bearer { token: "T".into() });
        assert_eq!(auth_header(&client).as_deref(), Some("Bearer T"));
    }

    #[test]
    fn test_content_type_and_body() {
        let client = client_with(AuthMethod::None);
        let body = serde_json::json!({"ip": "1.2.3.4"});
        let request = client
            .build_request(Method::POST, "/api/v1/decisions", &[], Some(&body))
            .unwrap();
        assert_eq!(request.headers().get(CONTENT_TYPE).unwrap(), "application/json");
        let sent = request.body().and_then(|b| b.as_bytes()).unwrap();
        assert_eq!(serde_json::from_slice::<serde_json::Value>(sent).unwrap(), body);
    }

    #[test]
    fn test_url_keeps_path_prefix_and_repeats_keys() {
        let client = client_with(AuthMethod::None);
        let url = client
            .url(
                "/api/v1/alerts",
                &[("country", "FR".into()), ("country", "DE".into()), ("offset", "0".into())],
            )
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://crowdsec.lan:8443/monitor/api/v1/alerts?country=FR&country=DE&offset=0"
        );
    }

    #[test]
    fn test_url_without_query_has_no_question_mark() {
        let client = client_with(AuthMethod::None);
        let url = client.url("/api/v1/alerts/5", &[]).unwrap();
        assert_eq!(url.as_str(), "https://crowdsec.lan:8443/monitor/api/v1/alerts/5");
    }

    #[test]
    fn test_invalid_host_is_rejected() {
        let server = ServerConnection::new(ConnectionMethod::Http, "bad host");
        assert!(matches!(
            HttpClient::new(&server),
            Err(HttpClientError::InvalidRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_success_envelope() {
        let server = MockServer::start(|_| (200, r#"{"value": 3}"#.to_string())).await;
        let client = HttpClient::new(&server.connection).unwrap();

        let response: HttpResponse<serde_json::Value> = client.get("/api/v1/x", &[]).await.unwrap();
        assert!(response.successful);
        assert_eq!(response.status_code, 200);
        assert_eq!(response.body["value"], 3);
    }

    #[tokio::test]
    async fn test_401_is_unauthorized() {
        let server = MockServer::start(|_| (401, "{}".to_string())).await;
        let client = HttpClient::new(&server.connection).unwrap();

        let err = client.get::<serde_json::Value>("/api/v1/x", &[]).await.unwrap_err();
        assert!(err.is_unauthorized());
    }

    #[tokio::test]
    async fn test_other_statuses_are_http_errors() {
        for status in [403u16, 404, 500, 503] {
            let server = MockServer::start(move |_| (status, "{}".to_string())).await;
            let client = HttpClient::new(&server.connection).unwrap();

            let err = client.get::<serde_json::Value>("/api/v1/x", &[]).await.unwrap_err();
            assert!(matches!(err, HttpClientError::Http { status: s } if s == status));
        }
    }

    #[tokio::test]
    async fn test_shape_mismatch_is_decoding_error() {
        let server = MockServer::start(|_| (200, r#"{"unexpected": true}"#.to_string())).await;
        let client = HttpClient::new(&server.connection).unwrap();

        let err = client
            .get::<crate::models::Statistics>("/api/v1/statistics", &[])
            .await
            .unwrap_err();
        assert!(matches!(err, HttpClientError::Decoding(_)));
    }

    #[tokio::test]
    async fn test_empty_body_decodes_as_unit() {
        let server = MockServer::start(|_| (200, String::new())).await;
        let client = HttpClient::new(&server.connection).unwrap();

        let response: HttpResponse<()> = client.delete("/api/v1/alerts/1").await.unwrap();
        assert!(response.successful);
    }

    #[tokio::test]
    async fn test_refused_connection_is_network_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let mut server = ServerConnection::new(ConnectionMethod::Http, "127.0.0.1");
        server.port = Some(port);
        let client = HttpClient::new(&server).unwrap();

        let err = client.get::<serde_json::Value>("/api/v1/x", &[]).await.unwrap_err();
        assert!(matches!(err, HttpClientError::Network(_)));
    }

    #[tokio::test]
    async fn test_credentials_reach_server() {
        let mut server = MockServer::start(|_| (200, "null".to_string())).await;
        server.connection.auth = AuthMethod::Bearer { token: "secret".into() };
        let client = HttpClient::new(&server.connection).unwrap();

        client.get::<()>("/api/v1/status", &[]).await.unwrap();
        let recorded = server.requests();
        assert_eq!(recorded[0].authorization.as_deref(), Some("Bearer secret"));
        assert_eq!(recorded[0].path, "/api/v1/status");
    }
}
