//! Google Maps Platform web service client.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use shared::{
    domain::Coordinate,
    error::MapsError,
    protocol::{
        AutocompleteResponse, DirectionsRequest, DirectionsResponse, GeocodeResponse,
        PlaceSuggestion, STATUS_OK, STATUS_ZERO_RESULTS,
    },
};
use tracing::debug;
use url::Url;

use crate::services::{AutocompleteSource, RoutingService};

const DIRECTIONS_PATH: &str = "maps/api/directions/json";
const AUTOCOMPLETE_PATH: &str = "maps/api/place/autocomplete/json";
const GEOCODE_PATH: &str = "maps/api/geocode/json";

#[derive(Clone)]
pub struct GoogleMapsClient {
    http: Client,
    base_url: Url,
    api_key: String,
    language: String,
}

impl GoogleMapsClient {
    pub fn new(
        base_url: &str,
        api_key: impl Into<String>,
        language: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(MapsError::MissingCredential("GOOGLE_MAPS_API_KEY".into()).into());
        }

        let mut base = base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base)
            .map_err(|e| MapsError::InvalidInput(format!("maps base url '{base_url}': {e}")))?;

        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build maps http client")?;

        Ok(Self {
            http,
            base_url,
            api_key,
            language: language.into(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let url = self
            .base_url
            .join(path)
            .with_context(|| format!("invalid maps endpoint path '{path}'"))?;

        let response = self
            .http
            .get(url)
            .query(query)
            .query(&[("language", self.language.as_str()), ("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| MapsError::Transport(e.without_url().to_string()))?
            .error_for_status()
            .map_err(|e| MapsError::Transport(e.without_url().to_string()))?;

        let body = response
            .json::<T>()
            .await
            .map_err(|e| MapsError::Transport(format!("malformed maps response: {e}")))?;
        Ok(body)
    }
}

#[async_trait]
impl RoutingService for GoogleMapsClient {
    async fn route(&self, request: &DirectionsRequest) -> Result<DirectionsResponse> {
        let origin = request.origin.to_query_value();
        let destination = request.destination.to_query_value();
        let response: DirectionsResponse = self
            .get_json(
                DIRECTIONS_PATH,
                &[
                    ("origin", origin.as_str()),
                    ("destination", destination.as_str()),
                    ("mode", request.travel_mode.as_query_value()),
                ],
            )
            .await?;

        debug!(
            status = %response.status,
            routes = response.routes.len(),
            "directions answered"
        );
        Ok(response)
    }
}

#[async_trait]
impl AutocompleteSource for GoogleMapsClient {
    async fn suggest(&self, query: &str) -> Result<Vec<PlaceSuggestion>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let response: AutocompleteResponse = self
            .get_json(AUTOCOMPLETE_PATH, &[("input", query)])
            .await?;

        match response.status.as_str() {
            STATUS_OK => Ok(response.predictions),
            STATUS_ZERO_RESULTS => Ok(Vec::new()),
            _ => Err(upstream(response.status, response.error_message).into()),
        }
    }

    async fn resolve(&self, suggestion: &PlaceSuggestion) -> Result<Coordinate> {
        if suggestion.place_id.trim().is_empty() {
            return Err(MapsError::InvalidInput("suggestion without place id".into()).into());
        }

        let response: GeocodeResponse = self
            .get_json(GEOCODE_PATH, &[("place_id", suggestion.place_id.as_str())])
            .await?;

        match response.status.as_str() {
            STATUS_OK => response
                .results
                .first()
                .map(|result| result.geometry.location)
                .ok_or_else(|| MapsError::NoResults(suggestion.description.clone()).into()),
            STATUS_ZERO_RESULTS => Err(MapsError::NoResults(suggestion.description.clone()).into()),
            _ => Err(upstream(response.status, response.error_message).into()),
        }
    }
}

fn upstream(status: String, message: Option<String>) -> MapsError {
    MapsError::Upstream {
        status,
        message: message.unwrap_or_default(),
    }
}

#[cfg(test)]
#[path = "tests/google_tests.rs"]
mod tests;
