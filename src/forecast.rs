//! Sunrise/sunset and hourly-wind fetching and caching.
//!
//! This module owns all network traffic to the Open-Meteo forecast API and
//! the error type shared by every collaborator boundary in the crate. It
//! implements a cache-first strategy: a fresh cached report for the same
//! coordinate and date is served from `/tmp`, and only a miss or a stale
//! entry triggers a live call.
//!
//! ## Failure model
//!
//! Sunrise/sunset is the load-bearing half of the report: if it cannot be
//! fetched (after the configured fixed retries) the whole fetch fails and
//! the caller shows its "could not generate times" state. Wind is
//! display-only, so a wind failure degrades to an empty map and the report
//! still renders. Cache write failures are ignored; a cache that cannot be
//! written only costs a later refetch.

use crate::config::ApiConfig;
use crate::{Coordinate, SunTimes};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;
use std::{fs, io, time::SystemTime};
use thiserror::Error;

/// Errors from the external-service boundary.
///
/// Every way an HTTP collaborator can disappoint ends up here; the formula
/// layer never sees a raw transport error.
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP request failed (network, server, or protocol error)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response decoded but a required field was missing or unparseable
    #[error("malformed response")]
    Malformed,

    /// Geocoding search returned no matches
    #[error("no matching place found")]
    NoResults,

    /// Cache file operations failed (permissions, corruption)
    #[error("cache IO: {0}")]
    Cache(#[from] io::Error),
}

/// Everything the `times` report needs from the forecast service.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SkyReport {
    pub sun: SunTimes,
    /// Wind speed in mph keyed by local hour, "HH:00" format
    pub wind: BTreeMap<String, f64>,
}

const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Identifying header for the public APIs we call
const USER_AGENT: &str = "fishy-nw/0.1";

/// Cache file location on filesystem
///
/// /tmp keeps the cache ephemeral; losing it only costs one refetch.
const CACHE: &str = "/tmp/fishy_nw_cache.json";

/// Open-Meteo returns local times as ISO 8601 without seconds
const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Build the HTTP client shared by all collaborators.
pub fn client(timeout_secs: u64) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(timeout_secs))
        .build()
}

/// Fetch the sky report for a coordinate and date, cache-first.
///
/// A fresh cache entry for the same coordinate and date short-circuits the
/// network entirely. On a miss, sunrise/sunset is fetched with the
/// configured fixed retry, wind is fetched best-effort, and the combined
/// report is written back to the cache.
pub async fn fetch_report(
    client: &reqwest::Client,
    coord: Coordinate,
    date: NaiveDate,
    api: &ApiConfig,
) -> Result<SkyReport, FetchError> {
    let ttl_secs = api.cache_ttl_minutes * 60;
    if let Ok(report) = load_cache(CACHE, ttl_secs, coord, date) {
        return Ok(report);
    }

    let sun = fetch_sun_with_retry(client, coord, date, api).await?;

    // Wind is garnish: an empty table beats a failed report.
    let wind = match hourly_wind(client, coord).await {
        Ok(wind) => wind,
        Err(e) => {
            eprintln!("Wind fetch failed: {e}");
            BTreeMap::new()
        }
    };

    let report = SkyReport { sun, wind };
    let _ = save_cache(CACHE, coord, date, &report);

    Ok(report)
}

/// Fetch sunrise and sunset for one date at one location.
pub async fn sun_times(
    client: &reqwest::Client,
    coord: Coordinate,
    date: NaiveDate,
) -> Result<SunTimes, FetchError> {
    let day = date.format("%Y-%m-%d").to_string();
    let resp: ForecastResponse = client
        .get(FORECAST_URL)
        .query(&[
            ("latitude", coord.lat.to_string()),
            ("longitude", coord.lon.to_string()),
            ("start_date", day.clone()),
            ("end_date", day),
            ("daily", "sunrise,sunset".to_string()),
            ("timezone", "auto".to_string()),
        ])
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    parse_sun_times(&resp)
}

/// Fetch the hourly wind forecast, collapsed to one entry per hour key.
pub async fn hourly_wind(
    client: &reqwest::Client,
    coord: Coordinate,
) -> Result<BTreeMap<String, f64>, FetchError> {
    let resp: ForecastResponse = client
        .get(FORECAST_URL)
        .query(&[
            ("latitude", coord.lat.to_string()),
            ("longitude", coord.lon.to_string()),
            ("hourly", "wind_speed_10m".to_string()),
            ("wind_speed_unit", "mph".to_string()),
            ("timezone", "auto".to_string()),
        ])
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    parse_wind(&resp)
}

// -- Private Implementation --

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    daily: Option<DailyBlock>,
    hourly: Option<HourlyBlock>,
}

#[derive(Debug, Deserialize)]
struct DailyBlock {
    #[serde(default)]
    sunrise: Vec<String>,
    #[serde(default)]
    sunset: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct HourlyBlock {
    #[serde(default)]
    time: Vec<String>,
    #[serde(default)]
    wind_speed_10m: Vec<Option<f64>>,
}

fn parse_sun_times(resp: &ForecastResponse) -> Result<SunTimes, FetchError> {
    let daily = resp.daily.as_ref().ok_or(FetchError::Malformed)?;
    let sunrise = daily.sunrise.first().ok_or(FetchError::Malformed)?;
    let sunset = daily.sunset.first().ok_or(FetchError::Malformed)?;
    Ok(SunTimes {
        sunrise: parse_local_time(sunrise)?,
        sunset: parse_local_time(sunset)?,
    })
}

fn parse_wind(resp: &ForecastResponse) -> Result<BTreeMap<String, f64>, FetchError> {
    let hourly = resp.hourly.as_ref().ok_or(FetchError::Malformed)?;
    let mut out = BTreeMap::new();
    for (t, speed) in hourly.time.iter().zip(&hourly.wind_speed_10m) {
        let Some(speed) = speed else { continue };
        let key = parse_local_time(t)?.format("%H:00").to_string();
        // First forecast value per hour key wins
        out.entry(key).or_insert((speed * 10.0).round() / 10.0);
    }
    Ok(out)
}

fn parse_local_time(s: &str) -> Result<NaiveDateTime, FetchError> {
    NaiveDateTime::parse_from_str(s, TIME_FORMAT).map_err(|_| FetchError::Malformed)
}

async fn fetch_sun_with_retry(
    client: &reqwest::Client,
    coord: Coordinate,
    date: NaiveDate,
    api: &ApiConfig,
) -> Result<SunTimes, FetchError> {
    let mut attempt = 0;
    loop {
        match sun_times(client, coord, date).await {
            Ok(sun) => return Ok(sun),
            Err(e) if attempt < api.retries => {
                attempt += 1;
                eprintln!("Sunrise/sunset fetch failed ({e}), retry {attempt}/{}", api.retries);
                tokio::time::sleep(Duration::from_millis(api.retry_delay_ms)).await;
            }
            Err(e) => return Err(e),
        }
    }
}

/// On-disk cache entry: the report plus the key it was fetched for.
#[derive(Debug, Serialize, Deserialize)]
struct CachedReport {
    lat: f64,
    lon: f64,
    date: NaiveDate,
    report: SkyReport,
}

/// Load the cached report if it is fresh and keyed to the same request.
///
/// File modification time drives the TTL check, as with any /tmp cache;
/// a stale, mismatched, or unreadable entry is treated as a miss.
fn load_cache<P: AsRef<Path>>(
    path: P,
    ttl_secs: u64,
    coord: Coordinate,
    date: NaiveDate,
) -> Result<SkyReport, io::Error> {
    let meta = fs::metadata(&path)?;
    let age = SystemTime::now()
        .duration_since(meta.modified()?)
        .map_err(|_| io::Error::other("time error"))?
        .as_secs();
    if age > ttl_secs {
        return Err(io::Error::other("stale"));
    }

    let data = fs::read(&path)?;
    let cached: CachedReport = serde_json::from_slice(&data)?;
    if (cached.lat - coord.lat).abs() > 1e-4
        || (cached.lon - coord.lon).abs() > 1e-4
        || cached.date != date
    {
        return Err(io::Error::other("different location or date"));
    }

    Ok(cached.report)
}

fn save_cache<P: AsRef<Path>>(
    path: P,
    coord: Coordinate,
    date: NaiveDate,
    report: &SkyReport,
) -> Result<(), io::Error> {
    let cached = CachedReport {
        lat: coord.lat,
        lon: coord.lon,
        date,
        report: report.clone(),
    };
    let data = serde_json::to_vec(&cached)?;
    fs::write(path, data)?;
    Ok(())
}
