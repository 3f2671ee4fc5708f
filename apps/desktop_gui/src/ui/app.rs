use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use map_core::{config::Settings, LoadState, MapCanvas, OfficeChange, ViewportControl};
use walkers::{sources::OpenStreetMap, HttpTiles};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};
use crate::controller::orchestration::{cancel_after_office_change, dispatch_backend_command};
use crate::ui::{
    distance::show_distance,
    map_canvas::{show_map_canvas, MapAction},
    places::{PlacesAction, PlacesSearchBox},
    viewport::MapHandle,
};

/// Zoom levels gained when a cluster badge is clicked.
const CLUSTER_ZOOM_STEP: f64 = 2.0;

pub struct CommuteApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    load_state: LoadState,
    canvas: MapCanvas,
    map: MapHandle,
    tiles: HttpTiles,
    places: PlacesSearchBox,
    office_label: Option<String>,
    status: String,
}

impl CommuteApp {
    pub fn new(
        ctx: &egui::Context,
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        settings: &Settings,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            load_state: LoadState::Loading,
            canvas: MapCanvas::from_settings(settings),
            map: MapHandle::default(),
            tiles: HttpTiles::new(OpenStreetMap, ctx.clone()),
            places: PlacesSearchBox::default(),
            office_label: None,
            status: String::new(),
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::ServicesReady => {
                    self.load_state = LoadState::Ready;
                    self.places.set_enabled(true);
                }
                UiEvent::ServicesFailed(err) => {
                    self.load_state = LoadState::Failed(err.message().to_string());
                    self.status = err.status_line();
                }
                UiEvent::Suggestions { query, suggestions } => {
                    self.places.receive_suggestions(&query, suggestions);
                }
                UiEvent::PlaceResolved {
                    id,
                    description,
                    position,
                } => {
                    if !self.places.is_latest_pick(id) {
                        tracing::debug!(pick = id.0, "ignoring superseded place resolution");
                        continue;
                    }
                    let change = self.canvas.select_place(position, &mut self.map);
                    self.office_moved(&change);
                    self.office_label = Some(description);
                    self.status.clear();
                }
                UiEvent::DirectionsFinished(completion) => match completion.outcome {
                    Ok(response) => {
                        let status = response.status.clone();
                        if !self.canvas.apply_directions(completion.id, response) {
                            // Silent for the user; the status code only reaches the log.
                            tracing::debug!(
                                request_id = completion.id.0,
                                %status,
                                "directions answer not shown"
                            );
                        }
                    }
                    Err(message) => {
                        self.canvas.abandon_directions(completion.id);
                        self.status =
                            UiError::from_message(UiErrorContext::Directions, message).status_line();
                    }
                },
                UiEvent::Error(err) => {
                    tracing::warn!(context = ?err.context(), "{}", err.message());
                    self.status = err.status_line();
                }
            }
        }
    }

    fn office_moved(&mut self, change: &OfficeChange) {
        if let Some(cmd) = cancel_after_office_change(change) {
            dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status);
        }
    }

    fn handle_map_action(&mut self, action: MapAction) {
        match action {
            MapAction::HouseClicked(house) => {
                if let Some(tagged) = self.canvas.click_house(house) {
                    dispatch_backend_command(
                        &self.cmd_tx,
                        BackendCommand::FetchDirections { tagged },
                        &mut self.status,
                    );
                }
            }
            MapAction::ZoomToCluster(centroid) => {
                let zoom = self.map.zoom() + CLUSTER_ZOOM_STEP;
                self.map.pan_to(centroid);
                self.map.set_zoom(zoom);
            }
            MapAction::OpenContextMenu(position) => self.canvas.open_context_menu(position),
            MapAction::ContextSetOffice => {
                if let Some(change) = self.canvas.context_set_office() {
                    self.office_moved(&change);
                    self.office_label = Some(format!("Pinned at {}", change.office));
                }
            }
            MapAction::ContextAddHouse => {
                if let Some(house) = self.canvas.context_add_house() {
                    self.status = format!("Added house at {house}");
                }
            }
            MapAction::CloseContextMenu => self.canvas.close_context_menu(),
        }
    }

    fn show_controls(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| {
                ui.heading("Commute?");
                ui.add_space(8.0);

                if let Some(action) = self.places.show(ui) {
                    let cmd = match action {
                        PlacesAction::Query(query) => BackendCommand::Suggest { query },
                        PlacesAction::Picked { id, suggestion } => {
                            BackendCommand::ResolvePlace { id, suggestion }
                        }
                    };
                    dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status);
                }

                match (&self.office_label, self.canvas.office()) {
                    (_, None) => {
                        ui.label("Enter the address of your office");
                    }
                    (Some(label), Some(_)) => {
                        ui.label(format!("Office: {label}"));
                    }
                    (None, Some(office)) => {
                        ui.label(format!("Office: {office}"));
                    }
                }

                show_distance(
                    ui,
                    self.canvas.route(),
                    self.canvas.selected_house(),
                    self.canvas.office(),
                );

                if !self.status.is_empty() {
                    ui.separator();
                    ui.small(self.status.as_str());
                }
            });
    }
}

impl eframe::App for CommuteApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        if let Some(placeholder) = self.load_state.placeholder() {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.centered_and_justified(|ui| {
                    ui.label(placeholder);
                });
            });
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
            return;
        }

        self.show_controls(ctx);

        let mut action = None;
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                action = show_map_canvas(ui, &self.canvas, &mut self.map, &mut self.tiles);
            });
        if let Some(action) = action {
            self.handle_map_action(action);
        }

        if self.canvas.awaiting_directions().is_some() {
            ctx.request_repaint_after(std::time::Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}
