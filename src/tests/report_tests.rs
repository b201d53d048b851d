//! End-to-end checks of the report pipeline: sun times through bite-window
//! construction to rendered text, and the depth calculator through its
//! card. No network involved; collaborator outputs are supplied as
//! fixtures.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use fishy_nw_lib::config::{Config, DisplayConfig};
use fishy_nw_lib::depth::{self, LineType};
use fishy_nw_lib::{bite, renderer, Coordinate, SunTimes};

fn winter_sun() -> SunTimes {
    SunTimes {
        sunrise: "2026-01-18T07:30:00".parse().unwrap(),
        sunset: "2026-01-18T17:15:00".parse().unwrap(),
    }
}

/// The full times pipeline with fetched sun times and wind produces the
/// windows and table a user sees.
#[test]
fn times_pipeline_renders_full_report() {
    let date = NaiveDate::from_ymd_opt(2026, 1, 18).unwrap();
    let windows = bite::compute(&winter_sun(), date);

    let wind = BTreeMap::from([
        ("00:00".to_string(), 2.1),
        ("08:00".to_string(), 4.3),
        ("16:00".to_string(), 8.9),
    ]);

    let out = renderer::times_report(&windows, &wind, &DisplayConfig::default());

    assert!(out.contains("Morning window  6:30 AM – 8:30 AM"), "got:\n{out}");
    assert!(out.contains("Evening window  4:15 PM – 6:15 PM"), "got:\n{out}");
    assert!(out.contains("  04:00  —"), "missing hours keep the placeholder:\n{out}");
    assert!(out.contains("  16:00  8.9"), "got:\n{out}");

    // One of the three note texts always appears
    let has_note = out.contains("Normal conditions.")
        || out.contains("often strong bite windows");
    assert!(has_note, "got:\n{out}");
}

/// Default wind hours come from config and drive the table rows.
#[test]
fn wind_table_rows_follow_config() {
    let config = Config::default();
    let date = NaiveDate::from_ymd_opt(2026, 6, 21).unwrap();
    let windows = bite::compute(&winter_sun(), date);

    let out = renderer::times_report(&windows, &BTreeMap::new(), &config.display);
    for hour in &config.display.wind_hours {
        assert!(out.contains(hour.as_str()), "missing row for {hour}:\n{out}");
    }
}

/// The calculator card end to end, including the invalid-input placeholder.
#[test]
fn depth_pipeline_renders_value_or_placeholder() {
    let good = depth::estimate(1.5, 8.0, 120.0, LineType::Braid, 20.0);
    assert_eq!(good, Some(75.0));
    assert!(renderer::depth_report(good).contains("75.0 ft"));

    let invalid = depth::estimate(0.0, 8.0, 120.0, LineType::Braid, 20.0);
    assert_eq!(invalid, None);
    assert!(renderer::depth_report(invalid).contains("— ft"));
}

/// Manual coordinates get range-checked before any network use.
#[test]
fn manual_coordinates_are_range_checked() {
    assert!(Coordinate::new(47.66, -117.43).is_some());
    assert!(Coordinate::new(-90.0, 180.0).is_some());
    assert!(Coordinate::new(90.5, 0.0).is_none());
    assert!(Coordinate::new(0.0, -180.5).is_none());
}
