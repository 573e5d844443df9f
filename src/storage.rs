// CrowdSec Monitor - Storage
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Persistent storage for the configured server, including its credentials.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::config::config_path;
use crate::models::ServerConnection;

/// Single-record store for the server connection.
///
/// The file holds credentials, so it is written owner-readable only.
#[derive(Debug)]
pub struct ServerStorage {
    path: PathBuf,
}

impl Default for ServerStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl ServerStorage {
    pub fn new() -> Self {
        Self::with_path(config_path("server.json"))
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored connection, or `None` when absent or unreadable.
    pub fn load(&self) -> Option<ServerConnection> {
        let content = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&content) {
            Ok(connection) => Some(connection),
            Err(e) => {
                warn!("Failed to parse stored server: {}", e);
                None
            }
        }
    }

    pub fn save(&self, connection: &ServerConnection) -> Result<()> {
        #[cfg(unix)]
        use std::os::unix::fs::PermissionsExt;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let content = serde_json::to_string_pretty(connection)
            .context("Failed to serialize server connection")?;

        let mut file = fs::File::create(&self.path)
            .with_context(|| format!("Failed to create {}", self.path.display()))?;
        #[cfg(unix)]
        {
            if let Err(e) = file.set_permissions(fs::Permissions::from_mode(0o600)) {
                warn!("Failed to set file permissions: {}", e);
            }
        }
        file.write_all(content.as_bytes())
            .context("Failed to write server connection")?;

        debug!("Saved server connection to {}", self.path.display());
        Ok(())
    }

    /// Forget the stored server. Missing file is not an error.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!("Cleared stored server connection");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Failed to remove {}", self.path.display())),
        }
    }
}
