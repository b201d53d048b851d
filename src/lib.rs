//! # Fishing Northwest Core Library
//!
//! This library backs the `fishy-nw` report tool: it tells anglers the best
//! times of day to fish at a location and estimates how deep a trolled lure
//! runs. It is a thin layer over public HTTP APIs plus a handful of
//! closed-form formulas.
//!
//! ## Design
//!
//! The crate splits cleanly into two layers:
//!
//! - **Formula layer** ([`bite`], [`depth`], [`lunar`]): pure, deterministic
//!   functions with no I/O. Invalid numeric inputs yield `None`, never a
//!   panic or an error type.
//! - **Collaborator layer** ([`geo`], [`forecast`]): async adapters for the
//!   external services (IP geolocation, place geocoding, sunrise/sunset and
//!   hourly wind). Every transport or shape failure is normalized to
//!   [`forecast::FetchError`] at the boundary; raw `reqwest` errors never
//!   reach the formula layer.
//!
//! ## Data Flow
//!
//! 1. Resolve a [`Coordinate`] (manual entry, place name, or IP lookup)
//! 2. Fetch [`SunTimes`] and hourly wind for that coordinate and date
//!    (cache-first with a 30-minute TTL)
//! 3. Plug the sun times into [`bite::compute`] for the morning/evening
//!    windows and the moon-phase note
//! 4. Render the report as text ([`renderer`])
//!
//! The trolling-depth calculator ([`depth::estimate`]) needs no location and
//! no network at all.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// Module declarations
pub mod bite;
pub mod config;
pub mod depth;
pub mod forecast;
pub mod geo;
pub mod lunar;
pub mod renderer;

/// A geographic coordinate in decimal degrees.
///
/// Construction is range-checked: latitude must lie in [-90, 90] and
/// longitude in [-180, 180]. Values coming back from the geocoding and
/// IP-lookup services pass through the same check, so holding a
/// `Coordinate` means holding a plausible point on Earth.
///
/// # Example
/// ```
/// use fishy_nw_lib::Coordinate;
///
/// let spokane = Coordinate::new(47.66, -117.43).unwrap();
/// assert_eq!(spokane.lat, 47.66);
/// assert!(Coordinate::new(91.0, 0.0).is_none());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in decimal degrees, [-90, 90]
    pub lat: f64,
    /// Longitude in decimal degrees, [-180, 180]
    pub lon: f64,
}

impl Coordinate {
    /// Build a coordinate, rejecting out-of-range values.
    pub fn new(lat: f64, lon: f64) -> Option<Self> {
        if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon) {
            Some(Coordinate { lat, lon })
        } else {
            None
        }
    }
}

/// Sunrise and sunset for one calendar day at one location.
///
/// Both timestamps are naive local times exactly as the forecast service
/// reports them for the queried location (`timezone=auto`); no timezone
/// conversion happens on our side.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SunTimes {
    pub sunrise: NaiveDateTime,
    pub sunset: NaiveDateTime,
}
