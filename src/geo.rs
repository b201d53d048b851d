//! Location resolution collaborators.
//!
//! Two ways to turn "where am I fishing" into a [`Coordinate`]: a
//! best-effort IP geolocation lookup (ipinfo.io) and free-text place-name
//! geocoding (Open-Meteo's search endpoint, first hit wins). Neither
//! retries or judges geocoding quality; any transport or shape problem
//! becomes a [`FetchError`] for the caller to turn into a "set your
//! location" message.

use crate::forecast::FetchError;
use crate::Coordinate;
use serde::Deserialize;

const IP_LOOKUP_URL: &str = "https://ipinfo.io/json";
const GEOCODE_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";

/// ipinfo.io payload; only the "lat,lon" string field matters.
#[derive(Debug, Deserialize)]
struct IpLookupResponse {
    loc: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeHit>,
}

#[derive(Debug, Deserialize)]
struct GeocodeHit {
    latitude: f64,
    longitude: f64,
}

/// Resolve the machine's rough coordinate from its public IP.
pub async fn from_ip(client: &reqwest::Client) -> Result<Coordinate, FetchError> {
    let resp: IpLookupResponse = client
        .get(IP_LOOKUP_URL)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let loc = resp.loc.ok_or(FetchError::Malformed)?;
    parse_loc(&loc)
}

/// Geocode a free-text place name, taking the first result.
pub async fn from_place(client: &reqwest::Client, place: &str) -> Result<Coordinate, FetchError> {
    let resp: GeocodeResponse = client
        .get(GEOCODE_URL)
        .query(&[("name", place), ("count", "1"), ("format", "json")])
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let hit = resp.results.into_iter().next().ok_or(FetchError::NoResults)?;
    Coordinate::new(hit.latitude, hit.longitude).ok_or(FetchError::Malformed)
}

/// Parse ipinfo's "lat,lon" field into a range-checked coordinate.
fn parse_loc(loc: &str) -> Result<Coordinate, FetchError> {
    let (lat, lon) = loc.split_once(',').ok_or(FetchError::Malformed)?;
    let lat: f64 = lat.trim().parse().map_err(|_| FetchError::Malformed)?;
    let lon: f64 = lon.trim().parse().map_err(|_| FetchError::Malformed)?;
    Coordinate::new(lat, lon).ok_or(FetchError::Malformed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_loc_roundtrip() {
        let c = parse_loc("47.6588,-117.4260").unwrap();
        assert_eq!(c, Coordinate::new(47.6588, -117.4260).unwrap());
    }

    #[test]
    fn parse_loc_rejects_garbage() {
        assert!(parse_loc("not a coordinate").is_err());
        assert!(parse_loc("47.65").is_err());
        assert!(parse_loc("47.65,east").is_err());
        // Out-of-range values fail the Coordinate check
        assert!(parse_loc("95.0,-117.4").is_err());
        assert!(parse_loc("47.6,220.0").is_err());
    }

    #[test]
    fn ip_payload_parses_with_and_without_loc() {
        let full: IpLookupResponse =
            serde_json::from_str(r#"{"ip":"8.8.8.8","city":"Spokane","loc":"47.66,-117.43"}"#)
                .unwrap();
        assert_eq!(full.loc.as_deref(), Some("47.66,-117.43"));

        let empty: IpLookupResponse = serde_json::from_str(r#"{"ip":"8.8.8.8"}"#).unwrap();
        assert!(empty.loc.is_none());
    }

    #[test]
    fn geocode_payload_takes_first_hit() {
        let resp: GeocodeResponse = serde_json::from_str(
            r#"{"results":[
                {"latitude":47.6733,"longitude":-116.6879,"name":"Fernan Lake Village"},
                {"latitude":47.66,"longitude":-116.66,"name":"Fernan Lake"}
            ]}"#,
        )
        .unwrap();
        let hit = resp.results.into_iter().next().unwrap();
        assert_eq!(hit.latitude, 47.6733);
        assert_eq!(hit.longitude, -116.6879);
    }

    #[test]
    fn geocode_payload_handles_no_results() {
        // The service omits "results" entirely when nothing matches.
        let resp: GeocodeResponse = serde_json::from_str(r#"{"generationtime_ms":0.5}"#).unwrap();
        assert!(resp.results.is_empty());
    }
}
