use std::{collections::HashMap, fs, path::Path};

use url::Url;

use crate::error::ConfigError;

pub const SETTINGS_FILE: &str = "badge.toml";
pub const DEFAULT_API_BASE_URL: &str = "https://b2b-n0r5.onrender.com";
pub const DEFAULT_CARD_FILE_NAME: &str = "image.png";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base_url: String,
    pub card_file_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
            card_file_name: DEFAULT_CARD_FILE_NAME.into(),
        }
    }
}

pub fn load_settings() -> Result<Settings, ConfigError> {
    load_settings_with(Path::new(SETTINGS_FILE), |name| std::env::var(name).ok())
}

/// Defaults, then the settings file (if present), then environment overrides.
pub fn load_settings_with(
    settings_path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> Result<Settings, ConfigError> {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(settings_path) {
        let file_cfg = toml::from_str::<HashMap<String, String>>(&raw).map_err(|source| {
            ConfigError::SettingsFile {
                path: settings_path.display().to_string(),
                source,
            }
        })?;
        if let Some(v) = file_cfg.get("api_base_url") {
            settings.api_base_url = v.clone();
        }
        if let Some(v) = file_cfg.get("card_file_name") {
            settings.card_file_name = v.clone();
        }
    }

    if let Some(v) = env("BADGE_API_BASE_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = env("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = env("BADGE_CARD_FILE_NAME") {
        if !v.trim().is_empty() {
            settings.card_file_name = v;
        }
    }

    settings.api_base_url = normalize_api_base_url(&settings.api_base_url)?;
    Ok(settings)
}

pub fn normalize_api_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(ConfigError::EmptyBaseUrl);
    }

    let parsed = Url::parse(trimmed).map_err(|err| ConfigError::InvalidBaseUrl {
        url: trimmed.to_string(),
        reason: err.to_string(),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidBaseUrl {
            url: trimmed.to_string(),
            reason: format!("unsupported scheme '{}'", parsed.scheme()),
        });
    }

    Ok(trimmed.to_string())
}
