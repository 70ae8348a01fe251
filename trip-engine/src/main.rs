use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use trip_engine::EngineConfig;
use trip_engine::domain::{Coordinate, Trip, UserId};
use trip_engine::routing::motis::MotisClient;
use trip_engine::routing::osrm::OsrmClient;
use trip_engine::sources::{InMemoryPlaces, InMemorySettings, PlaceScope};
use trip_engine::trips::TripEngine;

/// Estimate travel time and cost from an origin to saved places.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// JSON file containing an array of places
    places: PathBuf,

    /// Origin latitude
    #[arg(allow_negative_numbers = true)]
    latitude: f64,

    /// Origin longitude
    #[arg(allow_negative_numbers = true)]
    longitude: f64,

    /// Only places owned by this user (UUID); all places otherwise
    #[arg(long)]
    user: Option<UserId>,

    /// JSON file containing an array of user settings
    #[arg(long)]
    settings: Option<PathBuf>,
}

/// One line of output.
#[derive(Debug, Serialize)]
struct TripOutput<'a> {
    place: &'a str,
    name: &'a str,
    mode: &'a str,
    duration_seconds: u64,
    cost_cents: u16,
}

impl<'a> From<&'a Trip> for TripOutput<'a> {
    fn from(trip: &'a Trip) -> Self {
        Self {
            place: trip.place.id.as_str(),
            name: &trip.place.name,
            mode: trip.place.mode.as_str(),
            duration_seconds: trip.time.as_secs(),
            cost_cents: trip.cost,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = EngineConfig::from_env()?;
    let origin = Coordinate::new(args.latitude, args.longitude)?;

    let places = InMemoryPlaces::load(&args.places)?;
    let settings = match &args.settings {
        Some(path) => InMemorySettings::load(path)?,
        None => InMemorySettings::default(),
    };
    info!(
        places = places.len().await,
        osrm = %config.osrm.base_url,
        motis = %config.motis.base_url,
        "Loaded places"
    );

    let osrm = OsrmClient::new(config.osrm)?;
    let motis = MotisClient::new(config.motis)?;
    let engine = TripEngine::new(places, settings, osrm, motis, config.pricing);

    let scope = args.user.map_or(PlaceScope::All, PlaceScope::User);
    let trips = engine
        .get_trips_until(scope, origin, async {
            // Ctrl-C abandons outstanding backend calls.
            if tokio::signal::ctrl_c().await.is_err() {
                std::future::pending::<()>().await;
            }
        })
        .await?;

    let output: Vec<TripOutput<'_>> = trips.iter().map(TripOutput::from).collect();
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
