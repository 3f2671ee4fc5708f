//! Map canvas panel: OpenStreetMap basemap with radius circles, route,
//! clustered house markers and the context menu drawn as a walkers plugin.

use eframe::egui;
use egui::{Color32, Pos2, Response, Shape, Stroke, Ui, Vec2};
use map_core::{
    cluster_markers,
    clusters::CLUSTER_CELL_PX,
    overlays::{radius_rings, route_path, ROUTE_STYLE},
    MapCanvas, ViewportControl,
};
use shared::domain::Coordinate;
use walkers::{HttpTiles, Map, MapMemory, Plugin, Projector};

use crate::ui::viewport::{to_coordinate, to_position, MapHandle};

const HOUSE_RADIUS: f32 = 5.0;
const HOUSE_HIT_RADIUS: f32 = 9.0;
const CLUSTER_RADIUS: f32 = 14.0;
const STATUS_BAR_HEIGHT: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MapAction {
    HouseClicked(Coordinate),
    ZoomToCluster(Coordinate),
    OpenContextMenu(Coordinate),
    ContextSetOffice,
    ContextAddHouse,
    CloseContextMenu,
}

fn rgba(rgb: [u8; 3], opacity: f32) -> Color32 {
    let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(rgb[0], rgb[1], rgb[2], alpha)
}

/// Something on the map a primary click can land on.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ClickTarget {
    action: MapAction,
    at: Pos2,
    radius: f32,
}

#[derive(Default)]
struct OverlayOutput {
    action: Option<MapAction>,
    cursor: Option<Coordinate>,
}

/// Everything drawn above the tiles.
struct CommuteOverlay<'a> {
    canvas: &'a MapCanvas,
    output: &'a mut OverlayOutput,
}

impl Plugin for CommuteOverlay<'_> {
    fn run(
        self: Box<Self>,
        ui: &mut Ui,
        response: &Response,
        projector: &Projector,
        _memory: &MapMemory,
    ) {
        let CommuteOverlay { canvas, output } = *self;
        let painter = ui.painter().with_clip_rect(response.rect);
        let screen = |position: Coordinate| projector.project(to_position(position)).to_pos2();
        let mut targets = Vec::new();

        if let Some(office) = canvas.office() {
            let center = screen(office);
            let pixels_per_meter = projector.scale_pixel_per_meter(to_position(office));
            for ring in radius_rings() {
                painter.circle(
                    center,
                    ring.radius_meters as f32 * pixels_per_meter,
                    rgba(ring.style.stroke_rgb, ring.style.fill_opacity),
                    Stroke::new(
                        ring.style.stroke_weight,
                        rgba(ring.style.stroke_rgb, ring.style.stroke_opacity),
                    ),
                );
            }
        }

        if let Some(route) = canvas.route() {
            let points: Vec<Pos2> = route_path(route).into_iter().map(&screen).collect();
            if points.len() >= 2 {
                painter.add(Shape::line(
                    points,
                    Stroke::new(ROUTE_STYLE.stroke_weight, rgba(ROUTE_STYLE.stroke_rgb, 1.0)),
                ));
            }
        }

        if let Some(houses) = canvas.houses() {
            let selected = canvas.selected_house();
            let visible = response.rect.expand(CLUSTER_RADIUS);
            let markers = houses
                .iter()
                .filter(|house| Some(**house) != selected)
                .map(|house| (*house, screen(*house)))
                .filter(|(_, pos)| visible.contains(*pos))
                .map(|(house, pos)| (house, (pos.x, pos.y)));

            for cluster in cluster_markers(markers, CLUSTER_CELL_PX) {
                let at = Pos2::new(cluster.screen.0, cluster.screen.1);
                if cluster.is_cluster() {
                    draw_cluster_badge(&painter, at, cluster.len());
                    if let Some(centroid) = cluster.centroid() {
                        targets.push(ClickTarget {
                            action: MapAction::ZoomToCluster(centroid),
                            at,
                            radius: CLUSTER_RADIUS,
                        });
                    }
                } else if let Some(house) = cluster.members.first() {
                    painter.circle(
                        at,
                        HOUSE_RADIUS,
                        Color32::from_rgb(234, 67, 53),
                        Stroke::new(1.0, Color32::WHITE),
                    );
                    targets.push(ClickTarget {
                        action: MapAction::HouseClicked(*house),
                        at,
                        radius: HOUSE_HIT_RADIUS,
                    });
                }
            }

            if let Some(house) = selected {
                let at = screen(house);
                painter.circle(
                    at,
                    HOUSE_RADIUS + 2.0,
                    Color32::from_rgb(25, 118, 210),
                    Stroke::new(1.0, Color32::WHITE),
                );
                targets.push(ClickTarget {
                    action: MapAction::HouseClicked(house),
                    at,
                    radius: HOUSE_HIT_RADIUS,
                });
            }
        }

        if let Some(office) = canvas.office() {
            draw_office_flag(&painter, screen(office));
        }

        output.cursor = response
            .hover_pos()
            .map(|pos| to_coordinate(projector.unproject(pos.to_vec2())));

        if response.secondary_clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                output.action = Some(MapAction::OpenContextMenu(to_coordinate(
                    projector.unproject(pos.to_vec2()),
                )));
            }
        } else if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                output.action = match hit_target(&targets, pos) {
                    Some(action) => Some(action),
                    None if canvas.context_menu().is_some() => Some(MapAction::CloseContextMenu),
                    None => None,
                };
            }
        }

        if let Some(menu_at) = canvas.context_menu() {
            let anchor = screen(menu_at);
            painter.circle_filled(anchor, 3.0, Color32::BLACK);
            if let Some(action) = show_context_menu(ui.ctx(), anchor, canvas.office().is_some()) {
                output.action = Some(action);
            }
        }
    }
}

/// Render the map canvas into the remaining space of `ui`.
pub fn show_map_canvas(
    ui: &mut egui::Ui,
    canvas: &MapCanvas,
    handle: &mut MapHandle,
    tiles: &mut HttpTiles,
) -> Option<MapAction> {
    let mut output = OverlayOutput::default();
    let available = ui.available_size();

    let map = Map::new(Some(tiles), &mut handle.memory, handle.center).with_plugin(
        CommuteOverlay {
            canvas,
            output: &mut output,
        },
    );
    ui.add_sized(
        Vec2::new(available.x, (available.y - STATUS_BAR_HEIGHT).max(0.0)),
        map,
    );

    let (status_rect, _) =
        ui.allocate_exact_size(Vec2::new(available.x, STATUS_BAR_HEIGHT), egui::Sense::hover());
    let status_painter = ui.painter_at(status_rect);
    status_painter.rect_filled(status_rect, 0.0, Color32::from_gray(40));
    let cursor_text = output
        .cursor
        .map(|position| format!("Cursor: {position}"))
        .unwrap_or_default();
    status_painter.text(
        status_rect.center(),
        egui::Align2::CENTER_CENTER,
        format!(
            "Center: {}  |  Zoom: {:.1}  {cursor_text}  |  © OpenStreetMap contributors",
            handle.center(),
            handle.zoom()
        ),
        egui::FontId::monospace(11.0),
        Color32::LIGHT_GRAY,
    );

    output.action
}

fn show_context_menu(ctx: &egui::Context, anchor: Pos2, office_set: bool) -> Option<MapAction> {
    let mut action = None;
    egui::Area::new(egui::Id::new("map_context_menu"))
        .fixed_pos(anchor + Vec2::new(6.0, 6.0))
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                if ui.button("Set Office Here").clicked() {
                    action = Some(MapAction::ContextSetOffice);
                }
                let add = ui
                    .add_enabled(office_set, egui::Button::new("Add House Here"))
                    .on_disabled_hover_text("Set an office first");
                if add.clicked() {
                    action = Some(MapAction::ContextAddHouse);
                }
            });
        });
    action
}

fn draw_cluster_badge(painter: &egui::Painter, at: Pos2, count: usize) {
    painter.circle(
        at,
        CLUSTER_RADIUS,
        Color32::from_rgba_unmultiplied(234, 67, 53, 200),
        Stroke::new(2.0, Color32::WHITE),
    );
    painter.text(
        at,
        egui::Align2::CENTER_CENTER,
        count.to_string(),
        egui::FontId::proportional(12.0),
        Color32::WHITE,
    );
}

fn draw_office_flag(painter: &egui::Painter, base: Pos2) {
    let top = base - Vec2::new(0.0, 22.0);
    painter.line_segment([base, top], Stroke::new(2.0, Color32::from_gray(60)));
    painter.add(Shape::convex_polygon(
        vec![top, top + Vec2::new(14.0, 5.0), top + Vec2::new(0.0, 10.0)],
        Color32::from_rgb(251, 188, 5),
        Stroke::new(1.0, Color32::from_gray(60)),
    ));
    painter.circle_filled(base, 2.5, Color32::from_gray(60));
}

/// Closest target whose hit circle contains `cursor`.
fn hit_target(targets: &[ClickTarget], cursor: Pos2) -> Option<MapAction> {
    targets
        .iter()
        .map(|target| (target, target.at.distance(cursor)))
        .filter(|(target, d)| *d <= target.radius)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(target, _)| target.action)
}
