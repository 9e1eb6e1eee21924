use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};

/// Environment variable naming an explicit settings file.
pub const CONFIG_ENV: &str = "AGENTSWARM_CONFIG";
/// Environment variable overriding `base_url`.
pub const API_URL_ENV: &str = "AGENTSWARM_API_URL";
/// Settings file looked up relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config/agentswarm.toml";

/// Where chats live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatMode {
    /// Chats are created and answered by the backend's `/chats` endpoints.
    #[default]
    Remote,
    /// Chats stay in memory and every message gets a canned reply.
    Local,
}

/// Client settings, usually read from `config/agentswarm.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    /// Root of the backend REST API.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
    pub chat_mode: ChatMode,
    /// File the TUI writes its log to.
    pub log_file: PathBuf,
    /// How long success banners stay on screen.
    pub banner_timeout_secs: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: String::from("http://localhost:8000"),
            request_timeout_secs: 10,
            chat_mode: ChatMode::Remote,
            log_file: PathBuf::from("agentswarm.log"),
            banner_timeout_secs: 3,
        }
    }
}

impl ClientSettings {
    /// Resolves the settings file, loads it (or the defaults), then applies
    /// environment overrides.
    pub fn load() -> Result<Self> {
        let settings = match Self::config_path() {
            Some(path) => Self::load_from(&path)?,
            None => {
                debug!("No settings file found, using defaults");
                Self::default()
            }
        };
        Ok(settings.with_api_url_override(env::var(API_URL_ENV).ok()))
    }

    /// `AGENTSWARM_CONFIG` if set, otherwise `config/agentswarm.toml` when it exists.
    pub fn config_path() -> Option<PathBuf> {
        if let Some(explicit) = env::var_os(CONFIG_ENV) {
            return Some(PathBuf::from(explicit));
        }
        let candidate = PathBuf::from(DEFAULT_CONFIG_PATH);
        candidate.exists().then_some(candidate)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings: {}", path.display()))?;
        let parsed: ClientSettings = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse settings: {}", path.display()))?;
        debug!("Loaded settings from {}", path.display());
        Ok(parsed)
    }

    /// Replaces `base_url` when an override is given and non-blank.
    pub fn with_api_url_override(mut self, api_url: Option<String>) -> Self {
        if let Some(url) = api_url.filter(|url| !url.trim().is_empty()) {
            self.base_url = url.trim().to_string();
        }
        self
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent()
            && !dir.as_os_str().is_empty()
            && !dir.exists()
        {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create settings directory: {}", dir.display()))?;
        }
        let serialized = toml::to_string_pretty(self).context("Failed to serialize settings")?;
        fs::write(path, serialized)
            .with_context(|| format!("Failed to write settings: {}", path.display()))?;
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn banner_timeout(&self) -> Duration {
        Duration::from_secs(self.banner_timeout_secs)
    }
}
