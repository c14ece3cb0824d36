use std::fs;
use std::io;
use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use serde_json::Error as SerdeError;
use tracing::{info, warn};

const APP_QUALIFIER: &str = "io";
const APP_ORG: &str = "SpaceTraders";
const APP_NAME: &str = "TraderConsole";

pub const TOKEN_ENV: &str = "SPACETRADERS_TOKEN";
pub const BASE_URL_ENV: &str = "SPACETRADERS_BASE_URL";
pub const DEFAULT_BASE_URL: &str = "https://api.spacetraders.io/";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub base_url: String,
    pub token: Option<String>,
    pub request_timeout_secs: u64,
    pub query_retries: u32,
    pub retry_base_delay_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            request_timeout_secs: 30,
            query_retries: 3,
            retry_base_delay_ms: 1_000,
        }
    }
}

impl Settings {
    /// Applies environment overrides on top of stored settings. Blank values
    /// are ignored.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        if let Some(token) = present(TOKEN_ENV) {
            self.token = Some(token.trim().to_string());
        }
        if let Some(base_url) = present(BASE_URL_ENV) {
            self.base_url = with_trailing_slash(base_url.trim());
        } else {
            self.base_url = with_trailing_slash(&self.base_url);
        }
        self
    }
}

/// `Url::join` drops the last path segment unless the base ends in `/`.
fn with_trailing_slash(url: &str) -> String {
    if url.ends_with('/') {
        url.to_string()
    } else {
        format!("{url}/")
    }
}

fn settings_file() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join("settings.json"))
}

fn read_settings() -> Result<Option<Settings>, SettingsError> {
    let path = settings_file().ok_or(SettingsError::StorageUnavailable)?;
    if !path.exists() {
        return Ok(None);
    }
    let data = fs::read_to_string(&path)?;
    Ok(Some(serde_json::from_str(&data)?))
}

/// Stored settings plus environment overrides. Unreadable settings are
/// logged and replaced by defaults; on first run the defaults are written
/// out so there is a file to edit.
pub fn load_settings() -> Settings {
    let stored = match read_settings() {
        Ok(Some(settings)) => {
            info!("loaded settings from disk");
            settings
        }
        Ok(None) => {
            let defaults = Settings::default();
            match save_settings(&defaults) {
                Ok(()) => info!("wrote default settings"),
                Err(err) => warn!("failed to write default settings: {err}"),
            }
            defaults
        }
        Err(err) => {
            warn!("failed to read settings, using defaults: {err}");
            Settings::default()
        }
    };
    stored.with_overrides(|name| std::env::var(name).ok())
}

fn save_settings(settings: &Settings) -> Result<(), SettingsError> {
    let path = settings_file().ok_or(SettingsError::StorageUnavailable)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json)?;
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("config directory unavailable")]
    StorageUnavailable,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] SerdeError),
}
