use std::{collections::HashMap, fs, path::Path, time::Duration};

use serde::Deserialize;
use tracing::{info, warn};

pub const SETTINGS_FILE: &str = "commute.toml";
pub const DEFAULT_MAPS_BASE_URL: &str = "https://maps.googleapis.com";

/// Environment variables consulted for the maps credential, in order.
pub const API_KEY_VARIABLES: &[&str] = &[
    "GOOGLE_MAPS_API_KEY",
    "NEXT_PUBLIC_GOOGLE_MAPS_API_KEY",
    "APP__GOOGLE_MAPS_API_KEY",
];

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub google_maps_api_key: Option<String>,
    pub maps_base_url: String,
    pub language: String,
    pub house_seed: Option<u64>,
    pub keep_route_on_office_change: bool,
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            google_maps_api_key: None,
            maps_base_url: DEFAULT_MAPS_BASE_URL.into(),
            language: "en".into(),
            house_seed: None,
            keep_route_on_office_change: false,
            request_timeout_secs: 10,
        }
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn log(&self) {
        info!(
            maps_base_url = %self.maps_base_url,
            language = %self.language,
            api_key_present = self.google_maps_api_key.is_some(),
            house_seed = ?self.house_seed,
            keep_route_on_office_change = self.keep_route_on_office_change,
            "loaded settings"
        );
    }
}

/// Defaults, then `commute.toml` in the working directory, then the environment.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(SETTINGS_FILE) {
        apply_file(&mut settings, Path::new(SETTINGS_FILE), &raw);
    }

    apply_env(&mut settings, |name| std::env::var(name).ok());
    settings
}

fn apply_file(settings: &mut Settings, path: &Path, raw: &str) {
    let file_cfg = match toml::from_str::<HashMap<String, toml::Value>>(raw) {
        Ok(cfg) => cfg,
        Err(err) => {
            warn!("ignoring unreadable settings file {}: {err}", path.display());
            return;
        }
    };

    if let Some(v) = file_cfg.get("google_maps_api_key").and_then(|v| v.as_str()) {
        settings.google_maps_api_key = non_empty(v);
    }
    if let Some(v) = file_cfg.get("maps_base_url").and_then(|v| v.as_str()) {
        settings.maps_base_url = v.to_string();
    }
    if let Some(v) = file_cfg.get("language").and_then(|v| v.as_str()) {
        settings.language = v.to_string();
    }
    if let Some(v) = file_cfg.get("house_seed").and_then(|v| v.as_integer()) {
        settings.house_seed = u64::try_from(v).ok();
    }
    if let Some(v) = file_cfg
        .get("keep_route_on_office_change")
        .and_then(|v| v.as_bool())
    {
        settings.keep_route_on_office_change = v;
    }
    if let Some(v) = file_cfg
        .get("request_timeout_secs")
        .and_then(|v| v.as_integer())
    {
        if let Ok(parsed) = u64::try_from(v) {
            settings.request_timeout_secs = parsed;
        }
    }
}

fn apply_env(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    for name in API_KEY_VARIABLES {
        if let Some(v) = var(name).as_deref().and_then(non_empty) {
            settings.google_maps_api_key = Some(v);
            break;
        }
    }

    if let Some(v) = var("APP__MAPS_BASE_URL") {
        settings.maps_base_url = v;
    }
    if let Some(v) = var("APP__LANGUAGE") {
        settings.language = v;
    }
    if let Some(v) = var("APP__HOUSE_SEED") {
        if let Ok(parsed) = v.trim().parse::<u64>() {
            settings.house_seed = Some(parsed);
        }
    }
    if let Some(v) = var("APP__KEEP_ROUTE_ON_OFFICE_CHANGE") {
        if let Ok(parsed) = v.trim().parse::<bool>() {
            settings.keep_route_on_office_change = parsed;
        }
    }
    if let Some(v) = var("APP__REQUEST_TIMEOUT_SECS") {
        if let Ok(parsed) = v.trim().parse::<u64>() {
            settings.request_timeout_secs = parsed;
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
