//! Dispatch of directions requests, one in flight at a time.

use std::sync::Arc;

use anyhow::Result;
use shared::{
    domain::RequestId,
    protocol::{DirectionsRequest, DirectionsResponse, RouteResult, TaggedDirectionsRequest},
};
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{debug, warn};

use crate::services::RoutingService;

#[derive(Debug)]
pub struct DirectionsCompletion {
    pub id: RequestId,
    pub outcome: Result<DirectionsResponse, String>,
}

pub struct DirectionsFetcher {
    service: Arc<dyn RoutingService>,
    completions: mpsc::UnboundedSender<DirectionsCompletion>,
    in_flight: Option<(RequestId, JoinHandle<()>)>,
}

impl DirectionsFetcher {
    pub fn new(
        service: Arc<dyn RoutingService>,
        completions: mpsc::UnboundedSender<DirectionsCompletion>,
    ) -> Self {
        Self {
            service,
            completions,
            in_flight: None,
        }
    }

    /// Starts `tagged`, aborting whatever request was still running.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self, tagged: TaggedDirectionsRequest) {
        self.cancel();

        let service = Arc::clone(&self.service);
        let completions = self.completions.clone();
        let TaggedDirectionsRequest { id, request } = tagged;
        debug!(
            request_id = id.0,
            origin = %request.origin,
            destination = %request.destination,
            "dispatching directions request"
        );

        let handle = tokio::spawn(async move {
            let outcome = service.route(&request).await.map_err(|err| {
                warn!(request_id = id.0, "directions request failed: {err:#}");
                format!("{err:#}")
            });
            let _ = completions.send(DirectionsCompletion { id, outcome });
        });
        self.in_flight = Some((id, handle));
    }

    pub fn cancel(&mut self) {
        if let Some((id, handle)) = self.in_flight.take() {
            if !handle.is_finished() {
                debug!(request_id = id.0, "aborting superseded directions request");
                handle.abort();
            }
        }
    }

    pub fn in_flight(&self) -> Option<RequestId> {
        self.in_flight
            .as_ref()
            .filter(|(_, handle)| !handle.is_finished())
            .map(|(id, _)| *id)
    }
}

impl Drop for DirectionsFetcher {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// One-shot request for callers without a canvas; `None` unless the answer is `OK`.
pub async fn fetch_route(
    service: &dyn RoutingService,
    request: &DirectionsRequest,
) -> Result<Option<RouteResult>> {
    let response = service.route(request).await?;
    if !response.is_ok() {
        debug!(status = %response.status, "directions answer carried no route");
    }
    Ok(response.into_route_result())
}

#[cfg(test)]
#[path = "tests/directions_tests.rs"]
mod tests;
