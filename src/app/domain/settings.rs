use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::app::infrastructure::error::AppError;

/// Persisted publishing settings.
///
/// Field names serialize in camelCase so a `data.json` written by the
/// Obsidian plugin of the same name loads as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    #[serde(default)]
    pub github_token: String,

    #[serde(default)]
    pub imgur_client_id: String,

    /// Keep the metadata block in the published gist.
    #[serde(default = "default_show_frontmatter")]
    pub show_frontmatter: bool,
}

fn default_show_frontmatter() -> bool {
    true
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            github_token: String::new(),
            imgur_client_id: String::new(),
            show_frontmatter: default_show_frontmatter(),
        }
    }
}

/// A single edit made through one of the settings surfaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsChange {
    GithubToken(String),
    ImgurClientId(String),
    ShowFrontmatter(bool),
}

impl AppSettings {
    pub fn apply(&mut self, change: SettingsChange) {
        match change {
            SettingsChange::GithubToken(token) => self.github_token = token.trim().to_string(),
            SettingsChange::ImgurClientId(id) => self.imgur_client_id = id.trim().to_string(),
            SettingsChange::ShowFrontmatter(show) => self.show_frontmatter = show,
        }
    }

    /// Apply `change` and write the whole record back to `path`.
    pub fn apply_and_save(&mut self, change: SettingsChange, path: &Path) -> Result<(), AppError> {
        self.apply(change);
        self.save_to(path)
    }

    /// Load settings from the default location
    pub fn load() -> Self {
        Self::load_from(&Self::get_config_path())
    }

    /// Load settings from `path`, or create defaults there if it does not exist.
    /// Fields missing from the file take their default values.
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(settings) => settings,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "failed to parse settings, using defaults");
                    Self::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let default = Self::default();
                if let Err(e) = default.save_to(path) {
                    tracing::debug!(error = %e, "could not write default settings");
                }
                default
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to read settings, using defaults");
                Self::default()
            }
        }
    }

    /// Save settings to the default location
    pub fn save(&self) -> Result<(), AppError> {
        self.save_to(&Self::get_config_path())
    }

    /// Save settings to `path`, creating its directory if needed
    pub fn save_to(&self, path: &Path) -> Result<(), AppError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| AppError::Settings(format!("Failed to create config directory: {}", e)))?;
            }
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        tracing::debug!(path = %path.display(), "settings saved");

        Ok(())
    }

    /// Get config file path (cross-platform)
    pub fn get_config_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("quickshare-note");
        path.push("settings.json");
        path
    }
}

/// Show only the first few characters of a credential.
pub fn mask_secret(secret: &str) -> String {
    if secret.is_empty() {
        return "(not set)".to_string();
    }
    let visible: String = secret.chars().take(4).collect();
    let hidden = secret.chars().count().saturating_sub(4);
    format!("{}{}", visible, "*".repeat(hidden))
}
