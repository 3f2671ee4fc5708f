mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;
use map_core::config::load_settings;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::CommuteApp;

#[derive(Parser, Debug)]
#[command(about = "Pick an office, click a house, see the commute")]
struct Args {
    /// Seed for the house scatter; random when omitted.
    #[arg(long)]
    house_seed: Option<u64>,
    /// Keep the displayed route when the office moves.
    #[arg(long)]
    keep_route_on_office_change: bool,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
    let args = Args::parse();

    let mut settings = load_settings();
    if args.house_seed.is_some() {
        settings.house_seed = args.house_seed;
    }
    if args.keep_route_on_office_change {
        settings.keep_route_on_office_change = true;
    }
    settings.log();

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(1024);
    backend_bridge::runtime::launch(settings.clone(), cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Commute Map")
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([860.0, 560.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Commute Map",
        options,
        Box::new(move |cc| {
            Ok(Box::new(CommuteApp::new(
                &cc.egui_ctx,
                cmd_tx,
                ui_rx,
                &settings,
            )))
        }),
    )
}
