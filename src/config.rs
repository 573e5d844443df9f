// CrowdSec Monitor - Configuration
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! User preferences persisted as a local JSON file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Directory name under the user config dir.
pub const CONFIG_DIR_NAME: &str = "crowdsec-monitor";

/// Colour scheme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    System,
    Light,
    Dark,
}

/// User preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default)]
    pub theme: Theme,
    /// Entries shown per ranking on the dashboard.
    #[serde(default = "default_dashboard_top_items")]
    pub dashboard_top_items: u32,
    /// Default for the decisions list "only active" filter.
    #[serde(default = "default_true")]
    pub show_active_decisions_only: bool,
    /// Default for the decisions list "hide duplicated" filter.
    #[serde(default = "default_true")]
    pub hide_duplicated_decisions: bool,
    #[serde(default)]
    pub disable_countdown_animation: bool,
}

fn default_dashboard_top_items() -> u32 { 5 }
fn default_true() -> bool { true }

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            dashboard_top_items: default_dashboard_top_items(),
            show_active_decisions_only: true,
            hide_duplicated_decisions: true,
            disable_countdown_animation: false,
        }
    }
}

/// Default location of a file in the config directory.
pub fn config_path(file_name: &str) -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
        .join(file_name)
}

/// Settings manager that persists to a JSON file.
#[derive(Debug)]
pub struct Settings {
    settings: AppSettings,
    path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

impl Settings {
    /// Load settings from the default location.
    pub fn new() -> Self {
        Self::load_from(config_path("settings.json"))
    }

    /// Load settings from `path`, falling back to defaults.
    pub fn load_from(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        let settings = if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(s) => s,
                    Err(e) => {
                        warn!("Failed to parse settings: {}", e);
                        AppSettings::default()
                    }
                },
                Err(e) => {
                    warn!("Failed to read settings: {}", e);
                    AppSettings::default()
                }
            }
        } else {
            AppSettings::default()
        };

        Self { settings, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn values(&self) -> &AppSettings {
        &self.settings
    }

    /// Save settings to disk.
    pub fn save(&self) {
        if let Some(parent) = self.path.parent() {
            let _ = fs::create_dir_all(parent);
        }

        match serde_json::to_string_pretty(&self.settings) {
            Ok(content) => {
                if let Err(e) = fs::write(&self.path, content) {
                    warn!("Failed to save settings: {}", e);
                }
            }
            Err(e) => {
                warn!("Failed to serialize settings: {}", e);
            }
        }
    }

    pub fn theme(&self) -> Theme {
        self.settings.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.settings.theme = theme;
        self.save();
    }

    pub fn dashboard_top_items(&self) -> u32 {
        self.settings.dashboard_top_items
    }

    /// Set the dashboard ranking size (at least 1).
    pub fn set_dashboard_top_items(&mut self, count: u32) {
        self.settings.dashboard_top_items = count.max(1);
        self.save();
    }

    pub fn show_active_decisions_only(&self) -> bool {
        self.settings.show_active_decisions_only
    }

    pub fn set_show_active_decisions_only(&mut self, enabled: bool) {
        self.settings.show_active_decisions_only = enabled;
        self.save();
    }

    pub fn hide_duplicated_decisions(&self) -> bool {
        self.settings.hide_duplicated_decisions
    }

    pub fn set_hide_duplicated_decisions(&mut self, enabled: bool) {
        self.settings.hide_duplicated_decisions = enabled;
        self.save();
    }

    pub fn disable_countdown_animation(&self) -> bool {
        self.settings.disable_countdown_animation
    }

    pub fn set_disable_countdown_animation(&mut self, disabled: bool) {
        self.settings.disable_countdown_animation = disabled;
        self.save();
    }
}
