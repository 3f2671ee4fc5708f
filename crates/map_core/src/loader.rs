//! Brings up the external mapping services from settings.

use std::sync::Arc;

use anyhow::Result;
use shared::error::MapsError;
use tracing::{info, warn};

use crate::{
    config::{Settings, API_KEY_VARIABLES},
    google::GoogleMapsClient,
    services::{AutocompleteSource, RoutingService},
};

#[derive(Clone)]
pub struct MapsServices {
    pub routing: Arc<dyn RoutingService>,
    pub places: Arc<dyn AutocompleteSource>,
}

impl MapsServices {
    pub fn from_client(client: GoogleMapsClient) -> Self {
        let client = Arc::new(client);
        Self {
            routing: client.clone(),
            places: client,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Loading,
    Ready,
    Failed(String),
}

impl LoadState {
    pub fn is_ready(&self) -> bool {
        matches!(self, LoadState::Ready)
    }

    /// Placeholder text while the map cannot be shown yet.
    pub fn placeholder(&self) -> Option<String> {
        match self {
            LoadState::Loading => Some("Loading...".to_string()),
            LoadState::Ready => None,
            LoadState::Failed(reason) => Some(format!("Map services unavailable: {reason}")),
        }
    }
}

pub fn load_services(settings: &Settings) -> Result<MapsServices> {
    let Some(api_key) = settings.google_maps_api_key.as_deref() else {
        warn!(
            "no maps credential configured; set one of {}",
            API_KEY_VARIABLES.join(", ")
        );
        return Err(MapsError::MissingCredential(API_KEY_VARIABLES.join(" / ")).into());
    };

    let client = GoogleMapsClient::new(
        &settings.maps_base_url,
        api_key,
        settings.language.clone(),
        settings.request_timeout(),
    )?;
    info!(base_url = %client.base_url(), "maps services ready");
    Ok(MapsServices::from_client(client))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_fails_with_credential_error() {
        let err = load_services(&Settings::default())
            .err()
            .expect("no key must fail");
        assert!(matches!(
            err.downcast_ref::<MapsError>(),
            Some(MapsError::MissingCredential(_))
        ));
    }

    #[test]
    fn configured_key_yields_services() {
        let settings = Settings {
            google_maps_api_key: Some("key".into()),
            ..Settings::default()
        };
        assert!(load_services(&settings).is_ok());
    }

    #[test]
    fn placeholder_follows_state() {
        assert_eq!(LoadState::default().placeholder().as_deref(), Some("Loading..."));
        assert_eq!(LoadState::Ready.placeholder(), None);
        assert!(LoadState::Failed("no key".into())
            .placeholder()
            .is_some_and(|text| text.contains("no key")));
    }
}
