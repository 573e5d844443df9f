// CrowdSec Monitor - Create Decision Form
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Form backing manual decision creation.

use std::net::IpAddr;

use tokio::sync::watch;
use tracing::{info, warn};

use crate::api::{CrowdSecClient, HttpClientError};
use crate::models::{CreateDecisionRequest, DecisionType};
use crate::state::Observable;

/// Reasons the form cannot be submitted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("IP Address is required")]
    MissingIp,
    #[error("IP Address is invalid")]
    InvalidIp,
    #[error("Duration must be greater than 0")]
    ZeroDuration,
    #[error("Reason is required")]
    MissingReason,
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] FormError),
    #[error("Failed to create decision: {0}")]
    Request(#[from] HttpClientError),
}

#[derive(Debug)]
pub struct CreateDecisionForm {
    pub ip: String,
    pub days: u32,
    pub hours: u32,
    pub minutes: u32,
    pub decision_type: DecisionType,
    pub reason: String,
    creating: Observable<bool>,
}

impl Default for CreateDecisionForm {
    fn default() -> Self {
        Self {
            ip: String::new(),
            days: 0,
            hours: 4,
            minutes: 0,
            decision_type: DecisionType::Ban,
            reason: String::new(),
            creating: Observable::new(false),
        }
    }
}

impl CreateDecisionForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_creating(&self) -> bool {
        *self.creating.get()
    }

    pub fn subscribe_creating(&self) -> watch::Receiver<bool> {
        self.creating.subscribe()
    }

    /// Duration in the server's compact form, e.g. `1d2h30m`. Empty when zero.
    pub fn duration_string(&self) -> String {
        let mut duration = String::new();
        for (value, unit) in [(self.days, 'd'), (self.hours, 'h'), (self.minutes, 'm')] {
            if value > 0 {
                duration.push_str(&format!("{}{}", value, unit));
            }
        }
        duration
    }

    pub fn validate(&self) -> Result<(), FormError> {
        let ip = self.ip.trim();
        if ip.is_empty() {
            return Err(FormError::MissingIp);
        }
        if ip.parse::<IpAddr>().is_err() {
            return Err(FormError::InvalidIp);
        }
        if self.days == 0 && self.hours == 0 && self.minutes == 0 {
            return Err(FormError::ZeroDuration);
        }
        if self.reason.trim().is_empty() {
            return Err(FormError::MissingReason);
        }
        Ok(())
    }

    pub fn to_request(&self) -> CreateDecisionRequest {
        CreateDecisionRequest {
            ip: self.ip.trim().to_string(),
            duration: self.duration_string(),
            decision_type: self.decision_type.clone(),
            reason: self.reason.trim().to_string(),
        }
    }

    /// Validate and create the decision.
    pub async fn submit(&mut self, client: &CrowdSecClient) -> Result<(), SubmitError> {
        self.validate()?;

        self.creating.set(true);
        let request = self.to_request();
        let result = client.decisions().create(&request).await;
        self.creating.set(false);

        match result {
            Ok(_) => {
                info!("Created {} decision for {} ({})", request.decision_type, request.ip, request.duration);
                Ok(())
            }
            Err(e) => {
                warn!("Failed to create decision for {}: {}", request.ip, e);
                Err(e.into())
            }
        }
    }
}
