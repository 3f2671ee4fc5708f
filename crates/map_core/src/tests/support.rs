use std::{sync::Arc, time::Duration};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use shared::domain::Coordinate;
use shared::protocol::{
    DirectionsRequest, DirectionsResponse, EncodedPolyline, Leg, Route, TextValue, STATUS_OK,
};
use tokio::sync::Mutex;

use crate::services::{RoutingService, ViewportControl};

pub fn ok_response(distance: &str, duration: &str) -> DirectionsResponse {
    DirectionsResponse {
        status: STATUS_OK.to_string(),
        routes: vec![Route {
            summary: "Eskisehir Yolu".into(),
            legs: vec![Leg {
                distance: TextValue {
                    text: distance.into(),
                    value: 5_000.0,
                },
                duration: TextValue {
                    text: duration.into(),
                    value: 600.0,
                },
                start_address: None,
                end_address: None,
                start_location: None,
                end_location: None,
            }],
            overview_polyline: EncodedPolyline::default(),
            warnings: Vec::new(),
        }],
        error_message: None,
    }
}

/// Records every request and answers with a fixed response after an optional delay.
pub struct RecordingRoutingService {
    pub requests: Arc<Mutex<Vec<DirectionsRequest>>>,
    response: DirectionsResponse,
    delay: Option<Duration>,
    fail_with: Option<String>,
}

impl RecordingRoutingService {
    pub fn answering(response: DirectionsResponse) -> Self {
        Self {
            requests: Arc::new(Mutex::new(Vec::new())),
            response,
            delay: None,
            fail_with: None,
        }
    }

    pub fn failing(err: impl Into<String>) -> Self {
        let mut service = Self::answering(DirectionsResponse::with_status("UNKNOWN_ERROR"));
        service.fail_with = Some(err.into());
        service
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl RoutingService for RecordingRoutingService {
    async fn route(&self, request: &DirectionsRequest) -> Result<DirectionsResponse> {
        self.requests.lock().await.push(*request);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(err) = &self.fail_with {
            return Err(anyhow!(err.clone()));
        }
        Ok(self.response.clone())
    }
}

/// Viewport that only remembers where it was told to look.
#[derive(Debug, Default)]
pub struct StaticViewport {
    pub center: Coordinate,
    pub zoom: f64,
}

impl ViewportControl for StaticViewport {
    fn pan_to(&mut self, position: Coordinate) {
        self.center = position;
    }

    fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom;
    }

    fn center(&self) -> Coordinate {
        self.center
    }

    fn zoom(&self) -> f64 {
        self.zoom
    }
}
