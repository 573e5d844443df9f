// CrowdSec Monitor - Server Connection Model
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Connection profile for the CrowdSec Monitor API server.

use std::fmt;
use std::net::IpAddr;

use serde::{Deserialize, Serialize};

/// URL scheme used to reach the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionMethod {
    #[default]
    Http,
    Https,
}

impl ConnectionMethod {
    pub fn scheme(&self) -> &'static str {
        match self {
            ConnectionMethod::Http => "http",
            ConnectionMethod::Https => "https",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "http" => Some(ConnectionMethod::Http),
            "https" => Some(ConnectionMethod::Https),
            _ => None,
        }
    }
}

/// Authentication scheme and credentials.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "method", rename_all = "lowercase")]
pub enum AuthMethod {
    #[default]
    None,
    Basic { user: String, password: String },
    Bearer { token: String },
}

impl AuthMethod {
    pub fn name(&self) -> &'static str {
        match self {
            AuthMethod::None => "none",
            AuthMethod::Basic { .. } => "basic",
            AuthMethod::Bearer { .. } => "bearer",
        }
    }
}

// Credentials never reach logs.
impl fmt::Debug for AuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthMethod::None => write!(f, "None"),
            AuthMethod::Basic { user, .. } => write!(f, "Basic {{ user: {:?}, password: *** }}", user),
            AuthMethod::Bearer { .. } => write!(f, "Bearer {{ token: *** }}"),
        }
    }
}

/// Reasons a connection profile is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConnectionError {
    #[error("IP/Domain field is required")]
    MissingHost,
    #[error("IP/Domain value is not valid")]
    InvalidHost,
    #[error("Port must be a valid number")]
    PortNotNumeric,
    #[error("Port must be between 1 and 65535")]
    PortOutOfRange,
    #[error("Username is required for basic authentication")]
    MissingUser,
    #[error("Password is required for basic authentication")]
    MissingPassword,
    #[error("Token is required for Bearer authentication")]
    MissingToken,
}

/// A configured CrowdSec Monitor API server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConnection {
    pub method: ConnectionMethod,
    pub host: String,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub auth: AuthMethod,
    /// Skip TLS certificate validation. Self-hosted deployments usually run
    /// with self-signed certificates, so this is on unless turned off.
    #[serde(default = "default_accept_invalid_certs")]
    pub accept_invalid_certs: bool,
}

fn default_accept_invalid_certs() -> bool {
    true
}

impl ServerConnection {
    pub fn new(method: ConnectionMethod, host: &str) -> Self {
        Self {
            method,
            host: host.to_string(),
            port: None,
            path: None,
            auth: AuthMethod::None,
            accept_invalid_certs: default_accept_invalid_certs(),
        }
    }

    /// Base URL: `scheme://host[:port][/path]`.
    pub fn base_url(&self) -> String {
        let mut url = format!("{}://{}", self.method.scheme(), self.host_for_url());

        if let Some(port) = self.port.filter(|p| *p > 0) {
            url.push_str(&format!(":{}", port));
        }

        if let Some(path) = self.path.as_deref().filter(|p| !p.is_empty()) {
            if !path.starts_with('/') {
                url.push('/');
            }
            url.push_str(path.trim_end_matches('/'));
        }

        url
    }

    /// IPv6 literals need brackets inside a URL.
    fn host_for_url(&self) -> String {
        match self.host.parse::<IpAddr>() {
            Ok(IpAddr::V6(v6)) => format!("[{}]", v6),
            _ => self.host.clone(),
        }
    }

    /// Check the profile before it is saved.
    pub fn validate(&self) -> Result<(), ConnectionError> {
        if self.host.is_empty() {
            return Err(ConnectionError::MissingHost);
        }
        if self.host.parse::<IpAddr>().is_err() && !is_valid_domain(&self.host) {
            return Err(ConnectionError::InvalidHost);
        }
        if self.port == Some(0) {
            return Err(ConnectionError::PortOutOfRange);
        }
        match &self.auth {
            AuthMethod::Basic { user, password } => {
                if user.is_empty() {
                    return Err(ConnectionError::MissingUser);
                }
                if password.is_empty() {
                    return Err(ConnectionError::MissingPassword);
                }
            }
            AuthMethod::Bearer { token } if token.is_empty() => {
                return Err(ConnectionError::MissingToken);
            }
            _ => {}
        }
        Ok(())
    }
}

/// Parse a user-entered port. Empty means "no port".
pub fn parse_port(input: &str) -> Result<Option<u16>, ConnectionError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    let value: i64 = input.parse().map_err(|_| ConnectionError::PortNotNumeric)?;
    if !(1..=65535).contains(&value) {
        return Err(ConnectionError::PortOutOfRange);
    }
    Ok(Some(value as u16))
}

/// Hostname check: dot-separated labels of letters, digits and inner hyphens.
fn is_valid_domain(host: &str) -> bool {
    if host.len() > 253 {
        return false;
    }
    host.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_variants() {
        let mut server = ServerConnection::new(ConnectionMethod::Https, "crowdsec.lan");
        assert_eq!(server.base_url(), "https://crowdsec.lan");

        server.port = Some(8443);
        assert_eq!(server.base_url(), "https://crowdsec.lan:8443");

        server.path = Some("monitor".to_string());
        assert_eq!(server.base_url(), "https://crowdsec.lan:8443/monitor");

        server.path = Some("/monitor/".to_string());
        assert_eq!(server.base_url(), "https://crowdsec.lan:8443/monitor");
    }

    #[test]
    fn test_base_url_ipv6() {
        let mut server = ServerConnection::new(ConnectionMethod::Http, "::1");
        server.port = Some(3000);
        assert_eq!(server.base_url(), "http://[::1]:3000");
    }

    #[test]
    fn test_validate_host() {
        assert_eq!(
            ServerConnection::new(ConnectionMethod::Http, "").validate(),
            Err(ConnectionError::MissingHost)
        );
        assert_eq!(
            ServerConnection::new(ConnectionMethod::Http, "bad host!").validate(),
            Err(ConnectionError::InvalidHost)
        );
        assert!(ServerConnection::new(ConnectionMethod::Http, "192.168.1.10").validate().is_ok());
        assert!(ServerConnection::new(ConnectionMethod::Http, "localhost").validate().is_ok());
    }

    #[test]
    fn test_validate_credentials() {
        let mut server = ServerConnection::new(ConnectionMethod::Https, "example.com");
        server.auth = AuthMethod::Basic { user: "admin".into(), password: String::new() };
        assert_eq!(server.validate(), Err(ConnectionError::MissingPassword));

        server.auth = AuthMethod::Bearer { token: String::new() };
        assert_eq!(server.validate(), Err(ConnectionError::MissingToken));

        server.auth = AuthMethod::Bearer { token: "abc".into() };
        assert!(server.validate().is_ok());
    }

    #[test]
    fn test_parse_port() {
        assert_eq!(parse_port(""), Ok(None));
        assert_eq!(parse_port("8080"), Ok(Some(8080)));
        assert_eq!(parse_port("0"), Err(ConnectionError::PortOutOfRange));
        assert_eq!(parse_port("70000"), Err(ConnectionError::PortOutOfRange));
        assert_eq!(parse_port("http"), Err(ConnectionError::PortNotNumeric));
    }

    #[test]
    fn test_debug_hides_secrets() {
        let auth = AuthMethod::Basic { user: "a".into(), password: "hunter2".into() };
        assert!(!format!("{:?}", auth).contains("hunter2"));
    }
}
