//! # Fishing Northwest CLI
//!
//! Two tools behind one binary: `times` prints the morning and evening bite
//! windows (with the moon-phase note and a wind table) for a resolved
//! location and date, and `depth` runs the trolling-depth calculator, which
//! needs no location or network at all.
//!
//! Network failures never crash the report: every unavailable collaborator
//! has a defined fallback message, matching the soft-fail behavior of the
//! calculators themselves.

// Test modules
#[cfg(test)]
mod tests;

use std::path::PathBuf;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use fishy_nw_lib::{
    bite,
    config::Config,
    depth::{self, LineType},
    forecast, geo, renderer, Coordinate,
};

#[derive(Parser)]
#[command(
    name = "fishy-nw",
    version,
    about = "Best fishing times by location and trolling depth estimates"
)]
struct Cli {
    /// Alternate config file (default: ./fishy-config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Morning and evening bite windows plus hourly wind for a location
    Times {
        /// Place name to geocode (e.g., "Fernan Lake")
        #[arg(long, conflicts_with_all = ["lat", "lon", "ip"])]
        place: Option<String>,

        /// Resolve the location from this machine's public IP
        #[arg(long, conflicts_with_all = ["lat", "lon"])]
        ip: bool,

        /// Latitude in decimal degrees (requires --lon)
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,

        /// Longitude in decimal degrees (requires --lat)
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,

        /// Date as YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Estimate how deep a trolled weight runs (no location needed)
    Depth {
        /// Trolling speed in mph
        #[arg(long)]
        speed: f64,

        /// Terminal weight in oz
        #[arg(long)]
        weight: f64,

        /// Line paid out in feet
        #[arg(long = "line-out")]
        line_out: f64,

        /// Line material: braid, fluorocarbon, or monofilament
        #[arg(long)]
        line: LineType,

        /// Line test strength in lb (20 is the neutral baseline)
        #[arg(long = "line-test", default_value_t = depth::BASELINE_TEST_LB)]
        line_test: f64,
    },
}

/// Main application entry point.
fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_from_path(path),
        None => Config::load(),
    };

    match cli.command {
        Command::Depth {
            speed,
            weight,
            line_out,
            line,
            line_test,
        } => {
            renderer::draw_depth(depth::estimate(speed, weight, line_out, line, line_test));
            Ok(())
        }
        Command::Times {
            place,
            ip,
            lat,
            lon,
            date,
        } => {
            // Create Tokio runtime for the blocking fetch sequence
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(run_times(&config, place, ip, lat, lon, date))
        }
    }
}

async fn run_times(
    config: &Config,
    place: Option<String>,
    ip: bool,
    lat: Option<f64>,
    lon: Option<f64>,
    date: Option<NaiveDate>,
) -> Result<()> {
    let client = forecast::client(config.api.timeout_secs)?;

    let Some(coord) = resolve_coordinate(&client, place, ip, lat, lon, config).await else {
        println!("Set your location to continue: --place, --lat/--lon, or --ip.");
        return Ok(());
    };

    let date = date.unwrap_or_else(|| Local::now().date_naive());

    match forecast::fetch_report(&client, coord, date, &config.api).await {
        Ok(report) => {
            let windows = bite::compute(&report.sun, date);
            renderer::draw_times(&windows, &report.wind, &config.display);
        }
        Err(error) => {
            // Recoverable, user-visible condition rather than a crash
            eprintln!("Forecast fetch failed: {error}");
            println!("Could not generate fishing times. Try another location or method.");
        }
    }

    Ok(())
}

/// Resolve the report location, in order of preference: explicit
/// coordinates, place name, IP lookup, then the configured default.
/// Returns `None` (after a stderr note) when nothing resolves.
async fn resolve_coordinate(
    client: &reqwest::Client,
    place: Option<String>,
    ip: bool,
    lat: Option<f64>,
    lon: Option<f64>,
    config: &Config,
) -> Option<Coordinate> {
    if let (Some(lat), Some(lon)) = (lat, lon) {
        match Coordinate::new(lat, lon) {
            Some(coord) => return Some(coord),
            None => {
                eprintln!("Latitude must be in [-90, 90] and longitude in [-180, 180].");
                return None;
            }
        }
    }

    if let Some(place) = place {
        return geocode_or_warn(client, &place).await;
    }

    if ip {
        match geo::from_ip(client).await {
            Ok(coord) => return Some(coord),
            Err(error) => {
                eprintln!("IP geolocation failed: {error}");
                return None;
            }
        }
    }

    // Fall back to the configured default location
    let loc = &config.location;
    if let (Some(lat), Some(lon)) = (loc.latitude, loc.longitude) {
        match Coordinate::new(lat, lon) {
            Some(coord) => return Some(coord),
            None => {
                eprintln!("Configured latitude/longitude are out of range.");
                return None;
            }
        }
    }
    if let Some(place) = &loc.place {
        return geocode_or_warn(client, place).await;
    }

    None
}

async fn geocode_or_warn(client: &reqwest::Client, place: &str) -> Option<Coordinate> {
    match geo::from_place(client, place).await {
        Ok(coord) => Some(coord),
        Err(error) => {
            eprintln!("Could not resolve {place:?}: {error}");
            None
        }
    }
}
