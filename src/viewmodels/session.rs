// CrowdSec Monitor - Session
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! The configured server, its client, and the user preferences.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use super::{DashboardViewModel, DecisionsListViewModel, OnboardingForm};
use crate::api::{CrowdSecClient, HttpClientError};
use crate::config::Settings;
use crate::models::ServerConnection;
use crate::storage::ServerStorage;

/// Composition root: everything a view needs to reach the server.
///
/// Without a stored server the session is "onboarding": no client exists
/// until [`Session::connect`] succeeds.
pub struct Session {
    settings: Settings,
    storage: ServerStorage,
    server: Option<ServerConnection>,
    client: Option<Arc<CrowdSecClient>>,
}

impl Session {
    /// Open a session from the default settings and storage locations.
    pub fn load() -> Self {
        Self::open(Settings::new(), ServerStorage::new())
    }

    pub fn open(settings: Settings, storage: ServerStorage) -> Self {
        let mut session = Self {
            settings,
            storage,
            server: None,
            client: None,
        };

        if let Some(server) = session.storage.load() {
            match CrowdSecClient::new(&server) {
                Ok(client) => {
                    info!("Using server {}", server.base_url());
                    session.client = Some(Arc::new(client));
                    session.server = Some(server);
                }
                Err(e) => warn!("Stored server is unusable: {}", e),
            }
        }

        session
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    pub fn server(&self) -> Option<&ServerConnection> {
        self.server.as_ref()
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    pub fn client(&self) -> Option<Arc<CrowdSecClient>> {
        self.client.clone()
    }

    /// Client, or an error telling the user to connect first.
    pub fn require_client(&self) -> Result<Arc<CrowdSecClient>> {
        self.client()
            .context("No server configured. Run `crowdsec-monitor connect` first.")
    }

    /// Probe the server described by `form` and make it the current one.
    pub async fn connect(&mut self, form: &OnboardingForm) -> Result<()> {
        let server = form.connect().await?;
        let client = CrowdSecClient::new(&server)?;

        self.storage
            .save(&server)
            .context("Failed to store server connection")?;
        self.client = Some(Arc::new(client));
        self.server = Some(server);
        Ok(())
    }

    /// Forget the server and its credentials.
    pub fn logout(&mut self) -> Result<()> {
        self.storage.clear()?;
        self.server = None;
        self.client = None;
        info!("Logged out");
        Ok(())
    }

    /// React to a failed request. A 401 means the stored credentials are no
    /// longer accepted, so the session goes back to onboarding.
    ///
    /// Returns whether the session was reset.
    pub fn handle_error(&mut self, err: &HttpClientError) -> bool {
        if !err.is_unauthorized() {
            return false;
        }

        warn!("Server rejected the stored credentials, resetting session");
        if let Err(e) = self.logout() {
            warn!("Failed to clear stored server: {:#}", e);
            self.server = None;
            self.client = None;
        }
        true
    }

    pub fn decisions_list(&self) -> Result<DecisionsListViewModel> {
        Ok(DecisionsListViewModel::new(
            self.require_client()?,
            self.settings.values(),
        ))
    }

    pub fn dashboard(&self) -> Result<DashboardViewModel> {
        Ok(DashboardViewModel::new(
            self.require_client()?,
            self.settings.dashboard_top_items(),
        ))
    }
}
