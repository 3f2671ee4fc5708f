use eframe::egui;
use map_core::{
    overlays::{haversine_meters, ring_for_distance},
    DistanceSummary,
};
use shared::{domain::Coordinate, protocol::RouteResult};

/// Distance/duration of the stored route; draws nothing without one.
pub fn show_distance(
    ui: &mut egui::Ui,
    route: Option<&RouteResult>,
    house: Option<Coordinate>,
    office: Option<Coordinate>,
) {
    let Some(summary) = route.and_then(DistanceSummary::from_result) else {
        return;
    };

    ui.separator();
    ui.heading("Commute");
    for line in summary.lines() {
        ui.label(line);
    }
    if let Some(via) = &summary.summary {
        ui.weak(format!("via {via}"));
    }

    if let (Some(house), Some(office)) = (house, office) {
        let straight = haversine_meters(house, office);
        let ring = ring_for_distance(straight).map_or("outside", |ring| ring.label);
        ui.weak(format!(
            "Straight line: {:.1} km ({ring} ring)",
            straight / 1000.0
        ));
    }
}
