use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use map_core::{
    config::load_settings, fetch_route, load_services, overlays::haversine_meters,
    DistanceSummary, HouseGenerator,
};
use shared::{domain::Coordinate, protocol::DirectionsRequest};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "commute", about = "Commute map tools without the map")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the generated houses around an office as JSON.
    Houses {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// List place suggestions for a query and resolve the first one.
    Search { query: String },
    /// Driving distance and duration from a house to the office.
    Route {
        #[arg(long, allow_hyphen_values = true)]
        office_lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        office_lng: f64,
        #[arg(long, allow_hyphen_values = true)]
        house_lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        house_lng: f64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();
    let cli = Cli::parse();
    let settings = load_settings();

    match cli.command {
        Command::Houses { lat, lng, seed } => {
            let origin = Coordinate::new(lat, lng);
            let houses = HouseGenerator::new(seed.or(settings.house_seed)).generate(origin);
            println!("{}", serde_json::to_string_pretty(&houses)?);
        }
        Command::Search { query } => {
            let services = load_services(&settings)?;
            let suggestions = services.places.suggest(&query).await?;
            if suggestions.is_empty() {
                println!("no places match '{query}'");
                return Ok(());
            }
            for suggestion in &suggestions {
                println!("{}  [{}]", suggestion.description, suggestion.place_id);
            }
            let position = services.places.resolve(&suggestions[0]).await?;
            println!("first match resolves to {position}");
        }
        Command::Route {
            office_lat,
            office_lng,
            house_lat,
            house_lng,
        } => {
            let services = load_services(&settings)?;
            let office = Coordinate::new(office_lat, office_lng);
            let house = Coordinate::new(house_lat, house_lng);
            let request = DirectionsRequest::driving(house, office);

            let result = fetch_route(services.routing.as_ref(), &request)
                .await?
                .ok_or_else(|| anyhow!("no driving route from {house} to {office}"))?;
            let summary = DistanceSummary::from_result(&result)
                .ok_or_else(|| anyhow!("route from {house} to {office} has no legs"))?;
            for line in summary.lines() {
                println!("{line}");
            }
            println!(
                "Straight line: {:.1} km",
                haversine_meters(house, office) / 1000.0
            );
        }
    }

    Ok(())
}
