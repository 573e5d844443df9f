// CrowdSec Monitor - Onboarding
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Server connection form and connectivity check.

use tokio::sync::watch;
use tracing::{info, warn};

use crate::api::{endpoints, HttpClient, HttpClientError};
use crate::models::server::parse_port;
use crate::models::{ApiStatus, AuthMethod, ConnectionError, ConnectionMethod, ServerConnection};
use crate::state::Observable;

/// Authentication choice on the form. Credentials live in separate fields
/// so switching back and forth keeps what was typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthKind {
    #[default]
    None,
    Basic,
    Bearer,
}

impl AuthKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Some(AuthKind::None),
            "basic" => Some(AuthKind::Basic),
            "bearer" => Some(AuthKind::Bearer),
            _ => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum OnboardingError {
    #[error(transparent)]
    Invalid(#[from] ConnectionError),
    #[error("Connection was not successful")]
    NotSuccessful,
    #[error("{}", .0.user_message())]
    Request(#[from] HttpClientError),
}

/// Text fields for a new server, as typed by the user.
#[derive(Debug)]
pub struct OnboardingForm {
    pub method: ConnectionMethod,
    pub host: String,
    pub port: String,
    pub path: String,
    pub auth: AuthKind,
    pub basic_user: String,
    pub basic_password: String,
    pub bearer_token: String,
    pub accept_invalid_certs: bool,
    connecting: Observable<bool>,
}

impl Default for OnboardingForm {
    fn default() -> Self {
        Self {
            method: ConnectionMethod::Http,
            host: String::new(),
            port: String::new(),
            path: String::new(),
            auth: AuthKind::None,
            basic_user: String::new(),
            basic_password: String::new(),
            bearer_token: String::new(),
            accept_invalid_certs: true,
            connecting: Observable::new(false),
        }
    }
}

impl OnboardingForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_connecting(&self) -> bool {
        *self.connecting.get()
    }

    pub fn subscribe_connecting(&self) -> watch::Receiver<bool> {
        self.connecting.subscribe()
    }

    /// Build the connection profile, or say which field is wrong.
    pub fn validate(&self) -> Result<ServerConnection, ConnectionError> {
        let host = self.host.trim();
        if host.is_empty() {
            return Err(ConnectionError::MissingHost);
        }

        let mut connection = ServerConnection::new(self.method, host);
        connection.port = parse_port(&self.port)?;
        connection.path = Some(self.path.trim())
            .filter(|p| !p.is_empty())
            .map(str::to_string);
        connection.accept_invalid_certs = self.accept_invalid_certs;
        connection.auth = match self.auth {
            AuthKind::None => AuthMethod::None,
            AuthKind::Basic => AuthMethod::Basic {
                user: self.basic_user.clone(),
                password: self.basic_password.clone(),
            },
            AuthKind::Bearer => AuthMethod::Bearer {
                token: self.bearer_token.clone(),
            },
        };

        connection.validate()?;
        Ok(connection)
    }

    /// Validate, then check the server answers `/api/v1/status` with these settings.
    pub async fn connect(&self) -> Result<ServerConnection, OnboardingError> {
        let connection = self.validate()?;

        self.connecting.set(true);
        let result = check_status(&connection).await;
        self.connecting.set(false);

        match result {
            Ok(()) => {
                info!("Connected to {}", connection.base_url());
                Ok(connection)
            }
            Err(e) => {
                warn!("Connection to {} failed: {}", connection.base_url(), e);
                Err(e)
            }
        }
    }
}

async fn check_status(connection: &ServerConnection) -> Result<(), OnboardingError> {
    let client = HttpClient::new(connection)?;
    let response = client.get::<ApiStatus>(endpoints::STATUS, &[]).await?;
    if !response.successful {
        return Err(OnboardingError::NotSuccessful);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::status::tests::status_json;
    use crate::testing::MockServer;

    fn form_for(server: &MockServer) -> OnboardingForm {
        OnboardingForm {
            host: server.connection.host.clone(),
            port: server.connection.port.unwrap().to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_builds_connection() {
        let form = OnboardingForm {
            method: ConnectionMethod::Https,
            host: " monitor.example.com ".into(),
            port: "8443".into(),
            path: "crowdsec".into(),
            auth: AuthKind::Bearer,
            bearer_token: "T".into(),
            basic_user: "ignored".into(),
            ..Default::default()
        };

        let connection = form.validate().unwrap();
        assert_eq!(connection.base_url(), "https://monitor.example.com:8443/crowdsec");
        assert_eq!(connection.auth, AuthMethod::Bearer { token: "T".into() });
    }

    #[test]
    fn test_validate_reports_first_problem() {
        let mut form = OnboardingForm::new();
        assert_eq!(form.validate().unwrap_err(), ConnectionError::MissingHost);

        form.host = "bad host!".into();
        assert_eq!(form.validate().unwrap_err(), ConnectionError::InvalidHost);

        form.host = "10.0.0.5".into();
        form.port = "http".into();
        assert_eq!(form.validate().unwrap_err(), ConnectionError::PortNotNumeric);

        form.port = "70000".into();
        assert_eq!(form.validate().unwrap_err(), ConnectionError::PortOutOfRange);

        form.port.clear();
        form.auth = AuthKind::Basic;
        form.basic_user = "admin".into();
        assert_eq!(form.validate().unwrap_err(), ConnectionError::MissingPassword);
    }

    #[tokio::test]
    async fn test_connect_checks_status() {
        let server = MockServer::start(|_| (200, status_json().to_string())).await;
        let form = form_for(&server);

        let connection = form.connect().await.unwrap();
        assert_eq!(connection, server.connection);
        assert!(!form.is_connecting());
        assert_eq!(server.requests()[0].path, "/api/v1/status");
    }

    #[tokio::test]
    async fn test_connect_error_messages() {
        let server = MockServer::start(|_| (401, String::new())).await;
        let err = form_for(&server).connect().await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid credentials. Please verify your username, password, or token."
        );

        let server = MockServer::start(|_| (503, String::new())).await;
        let err = form_for(&server).connect().await.unwrap_err();
        assert_eq!(err.to_string(), "Server error: code 503");
    }
}
