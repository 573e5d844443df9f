// CrowdSec Monitor - HTTP Errors
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Error taxonomy for requests against the CrowdSec Monitor API.

use thiserror::Error;

/// Errors produced by the HTTP transport.
///
/// The variants are mutually exclusive. `Unauthorized` is kept apart from
/// other HTTP statuses so callers can drop stale credentials.
#[derive(Error, Debug)]
pub enum HttpClientError {
    /// Transport-level failure (DNS, refused connection, timeout).
    #[error("network error: {0}")]
    Network(String),

    /// The exchange completed but no usable HTTP response came back.
    #[error("invalid server response")]
    InvalidResponse,

    /// HTTP 401.
    #[error("unauthorized - invalid credentials")]
    Unauthorized,

    /// Any other non-2xx status.
    #[error("HTTP error: {status}")]
    Http { status: u16 },

    /// The body did not match the expected JSON shape.
    #[error("failed to decode response: {0}")]
    Decoding(#[from] serde_json::Error),

    /// The request could not be built (bad base URL, unserializable body).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl HttpClientError {
    /// Whether this error means the stored credentials are no longer valid.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, HttpClientError::Unauthorized)
    }

    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            HttpClientError::Unauthorized => Some(401),
            HttpClientError::Http { status } => Some(*status),
            _ => None,
        }
    }

    /// Short message suitable for an error alert.
    pub fn user_message(&self) -> String {
        match self {
            HttpClientError::Unauthorized => {
                "Invalid credentials. Please verify your username, password, or token.".to_string()
            }
            HttpClientError::Http { status } => format!("Server error: code {}", status),
            HttpClientError::InvalidResponse => "Invalid server response".to_string(),
            HttpClientError::Decoding(_) => "Error interpreting server response".to_string(),
            HttpClientError::Network(e) => format!("Network error: {}", e),
            HttpClientError::InvalidRequest(e) => format!("Could not connect to server: {}", e),
        }
    }
}

impl From<reqwest::Error> for HttpClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            HttpClientError::InvalidRequest(err.to_string())
        } else if err.is_decode() {
            HttpClientError::InvalidResponse
        } else {
            HttpClientError::Network(err.to_string())
        }
    }
}
