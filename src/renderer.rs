//! Plain-text rendering of the fishing report.
//!
//! Everything user-facing goes through here so the failure placeholders
//! and time formats stay consistent: missing values render as an em-dash
//! placeholder, times render 12-hour by default with no leading zero.

use crate::bite::BiteWindows;
use crate::config::DisplayConfig;
use chrono::NaiveDateTime;
use std::collections::BTreeMap;
use std::fmt::Write;

/// Placeholder shown where a value is unavailable
const PLACEHOLDER: &str = "—";

/// Render the bite windows, note, and wind table as one report.
pub fn times_report(
    windows: &BiteWindows,
    wind: &BTreeMap<String, f64>,
    display: &DisplayConfig,
) -> String {
    let mut out = String::new();
    writeln!(
        out,
        "Morning window  {} – {}",
        fmt_time(windows.morning.0, display),
        fmt_time(windows.morning.1, display)
    )
    .unwrap();
    writeln!(
        out,
        "Evening window  {} – {}",
        fmt_time(windows.evening.0, display),
        fmt_time(windows.evening.1, display)
    )
    .unwrap();
    writeln!(out, "{}", windows.note).unwrap();

    writeln!(out).unwrap();
    writeln!(out, "Wind (mph)").unwrap();
    for hour in &display.wind_hours {
        match wind.get(hour) {
            Some(speed) => writeln!(out, "  {hour}  {speed:.1}").unwrap(),
            None => writeln!(out, "  {hour}  {PLACEHOLDER}").unwrap(),
        }
    }

    out
}

/// Render the trolling-depth card; `None` gets the placeholder.
pub fn depth_report(depth_ft: Option<f64>) -> String {
    let value = match depth_ft {
        Some(d) => format!("{d:.1} ft"),
        None => format!("{PLACEHOLDER} ft"),
    };
    format!(
        "Estimated depth  {value}\n\
         Rule of thumb estimate. Current and lure drag affect depth.\n"
    )
}

/// Print the times report to stdout.
pub fn draw_times(windows: &BiteWindows, wind: &BTreeMap<String, f64>, display: &DisplayConfig) {
    print!("{}", times_report(windows, wind, display));
}

/// Print the depth card to stdout.
pub fn draw_depth(depth_ft: Option<f64>) {
    print!("{}", depth_report(depth_ft));
}

fn fmt_time(t: NaiveDateTime, display: &DisplayConfig) -> String {
    if display.clock_24h {
        t.format("%H:%M").to_string()
    } else {
        t.format("%-I:%M %p").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bite;
    use crate::SunTimes;
    use chrono::NaiveDate;

    fn sample_windows() -> BiteWindows {
        let sun = SunTimes {
            sunrise: "2026-01-18T07:30:00".parse().unwrap(),
            sunset: "2026-01-18T17:15:00".parse().unwrap(),
        };
        bite::compute(&sun, NaiveDate::from_ymd_opt(2026, 1, 18).unwrap())
    }

    #[test]
    fn times_report_formats_windows_and_wind() {
        let wind = BTreeMap::from([("08:00".to_string(), 4.3), ("12:00".to_string(), 7.0)]);
        let out = times_report(&sample_windows(), &wind, &DisplayConfig::default());

        assert!(out.contains("Morning window  6:30 AM – 8:30 AM"), "got:\n{out}");
        assert!(out.contains("Evening window  4:15 PM – 6:15 PM"), "got:\n{out}");
        assert!(out.contains("  08:00  4.3"));
        assert!(out.contains("  12:00  7.0"));
        // Hours with no forecast value get the placeholder
        assert!(out.contains("  00:00  —"));
    }

    #[test]
    fn times_report_honors_24h_clock() {
        let display = DisplayConfig {
            clock_24h: true,
            ..DisplayConfig::default()
        };
        let out = times_report(&sample_windows(), &BTreeMap::new(), &display);
        assert!(out.contains("Morning window  06:30 – 08:30"), "got:\n{out}");
        assert!(out.contains("Evening window  16:15 – 18:15"), "got:\n{out}");
    }

    #[test]
    fn depth_report_shows_value_or_placeholder() {
        assert!(depth_report(Some(75.0)).contains("75.0 ft"));
        assert!(depth_report(None).contains("— ft"));
    }
}
