//! State behind the map canvas: office, houses, context menu and the stored route.

use shared::{
    domain::{Coordinate, RequestId},
    protocol::{DirectionsRequest, DirectionsResponse, RouteResult, TaggedDirectionsRequest},
};
use tracing::debug;

use crate::{config::Settings, houses::HouseGenerator, services::ViewportControl};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanvasState {
    NoOffice,
    OfficeSet { route_shown: bool },
}

/// Outcome of moving the office.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OfficeChange {
    pub office: Coordinate,
    /// Directions request that will no longer be applied; its task can be cancelled.
    pub dropped_request: Option<RequestId>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CanvasOptions {
    /// Leave a displayed route in place when the office moves.
    pub keep_route_on_office_change: bool,
}

pub struct MapCanvas {
    generator: HouseGenerator,
    options: CanvasOptions,
    office: Option<Coordinate>,
    houses: Option<Vec<Coordinate>>,
    route: Option<RouteResult>,
    selected_house: Option<Coordinate>,
    context_menu: Option<Coordinate>,
    last_issued: RequestId,
    awaiting: Option<RequestId>,
}

impl MapCanvas {
    pub fn new(generator: HouseGenerator, options: CanvasOptions) -> Self {
        debug!(
            seeded_houses = generator.is_seeded(),
            keep_route_on_office_change = options.keep_route_on_office_change,
            "map canvas created"
        );
        Self {
            generator,
            options,
            office: None,
            houses: None,
            route: None,
            selected_house: None,
            context_menu: None,
            last_issued: RequestId(0),
            awaiting: None,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            HouseGenerator::new(settings.house_seed),
            CanvasOptions {
                keep_route_on_office_change: settings.keep_route_on_office_change,
            },
        )
    }

    pub fn state(&self) -> CanvasState {
        match self.office {
            None => CanvasState::NoOffice,
            Some(_) => CanvasState::OfficeSet {
                route_shown: self.route.is_some(),
            },
        }
    }

    pub fn office(&self) -> Option<Coordinate> {
        self.office
    }

    pub fn houses(&self) -> Option<&[Coordinate]> {
        self.houses.as_deref()
    }

    pub fn route(&self) -> Option<&RouteResult> {
        self.route.as_ref()
    }

    pub fn selected_house(&self) -> Option<Coordinate> {
        self.selected_house
    }

    pub fn context_menu(&self) -> Option<Coordinate> {
        self.context_menu
    }

    /// Id of the directions request whose answer would still be applied.
    pub fn awaiting_directions(&self) -> Option<RequestId> {
        self.awaiting
    }

    /// Moves the office, regenerating the houses around it.
    pub fn set_office(&mut self, office: Coordinate) -> OfficeChange {
        self.office = Some(office);
        self.houses = Some(self.generator.generate(office));
        self.context_menu = None;

        let mut dropped_request = None;
        if !self.options.keep_route_on_office_change {
            self.route = None;
            self.selected_house = None;
            dropped_request = self.awaiting.take();
        }
        debug!(%office, dropped = ?dropped_request, "office set");
        OfficeChange {
            office,
            dropped_request,
        }
    }

    /// Office chosen from the search box; the map follows it.
    pub fn select_place(
        &mut self,
        office: Coordinate,
        viewport: &mut impl ViewportControl,
    ) -> OfficeChange {
        let change = self.set_office(office);
        viewport.pan_to(office);
        change
    }

    /// Returns the request to dispatch, or `None` when no office is set.
    ///
    /// Issuing a request supersedes any earlier one still in flight.
    pub fn click_house(&mut self, house: Coordinate) -> Option<TaggedDirectionsRequest> {
        let office = self.office?;
        self.last_issued = self.last_issued.next();
        self.awaiting = Some(self.last_issued);
        self.selected_house = Some(house);
        Some(TaggedDirectionsRequest {
            id: self.last_issued,
            request: DirectionsRequest::driving(house, office),
        })
    }

    /// Stores the route of an `OK` answer to the latest request.
    ///
    /// Other statuses and superseded answers leave the stored route untouched.
    /// Returns whether the stored route changed.
    pub fn apply_directions(&mut self, id: RequestId, response: DirectionsResponse) -> bool {
        if self.awaiting != Some(id) {
            debug!(request_id = id.0, "ignoring superseded directions answer");
            return false;
        }
        self.awaiting = None;

        let status = response.status.clone();
        match response.into_route_result() {
            Some(result) => {
                self.route = Some(result);
                true
            }
            None => {
                debug!(request_id = id.0, %status, "dropping directions answer");
                false
            }
        }
    }

    /// Forgets a request that failed before the service answered.
    pub fn abandon_directions(&mut self, id: RequestId) {
        if self.awaiting == Some(id) {
            self.awaiting = None;
        }
    }

    pub fn open_context_menu(&mut self, position: Coordinate) {
        self.context_menu = Some(position);
    }

    pub fn close_context_menu(&mut self) {
        self.context_menu = None;
    }

    /// "Set Office Here".
    pub fn context_set_office(&mut self) -> Option<OfficeChange> {
        let position = self.context_menu.take()?;
        Some(self.set_office(position))
    }

    /// "Add House Here". Needs an office, since houses only exist around one.
    pub fn context_add_house(&mut self) -> Option<Coordinate> {
        let position = self.context_menu.take()?;
        let houses = self.houses.as_mut()?;
        houses.push(position);
        Some(position)
    }
}

#[cfg(test)]
#[path = "tests/canvas_tests.rs"]
mod tests;
