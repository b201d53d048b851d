//! Bite-window construction around sunrise and sunset.
//!
//! The windows themselves are fixed offsets (one hour either side of the
//! sun event); the only judgement call is the qualitative note, which comes
//! from the coarse moon-phase model in [`crate::lunar`].

use crate::lunar::{self, PhaseBand};
use crate::SunTimes;
use chrono::{Duration, NaiveDate, NaiveDateTime};

/// The two recommended fishing windows for a day, plus a one-line note.
///
/// Each window is `(start, end)` with `end = start + 2h` by construction.
#[derive(Clone, Debug, PartialEq)]
pub struct BiteWindows {
    pub morning: (NaiveDateTime, NaiveDateTime),
    pub evening: (NaiveDateTime, NaiveDateTime),
    pub note: String,
}

/// Build the morning and evening windows from already-fetched sun times.
///
/// Sunrise/sunset availability is the caller's problem: if the forecast
/// collaborator failed there is nothing to compute and no window gets
/// fabricated. Given sun times this cannot fail.
///
/// # Example
/// ```
/// use chrono::{NaiveDate, NaiveDateTime};
/// use fishy_nw_lib::{bite, SunTimes};
///
/// let sun = SunTimes {
///     sunrise: "2026-01-18T07:30:00".parse().unwrap(),
///     sunset: "2026-01-18T17:15:00".parse().unwrap(),
/// };
/// let date = NaiveDate::from_ymd_opt(2026, 1, 18).unwrap();
/// let w = bite::compute(&sun, date);
/// assert_eq!(w.morning.0, "2026-01-18T06:30:00".parse::<NaiveDateTime>().unwrap());
/// assert_eq!(w.evening.1, "2026-01-18T18:15:00".parse::<NaiveDateTime>().unwrap());
/// ```
pub fn compute(sun: &SunTimes, date: NaiveDate) -> BiteWindows {
    let hour = Duration::hours(1);
    BiteWindows {
        morning: (sun.sunrise - hour, sun.sunrise + hour),
        evening: (sun.sunset - hour, sun.sunset + hour),
        note: note_for(date),
    }
}

/// The qualitative note for a date, from the moon-phase band.
pub fn note_for(date: NaiveDate) -> String {
    match lunar::classify(lunar::phase_fraction(date)) {
        PhaseBand::NearNew => "Near New Moon — often strong bite windows.".to_string(),
        PhaseBand::NearFull => "Near Full Moon — often strong bite windows.".to_string(),
        PhaseBand::Normal => "Normal conditions.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sun(sunrise: &str, sunset: &str) -> SunTimes {
        SunTimes {
            sunrise: sunrise.parse().unwrap(),
            sunset: sunset.parse().unwrap(),
        }
    }

    #[test]
    fn windows_are_one_hour_each_side() {
        let s = sun("2026-01-18T07:30:00", "2026-01-18T17:15:00");
        let date = NaiveDate::from_ymd_opt(2026, 1, 18).unwrap();
        let w = compute(&s, date);

        assert_eq!(w.morning.0.to_string(), "2026-01-18 06:30:00");
        assert_eq!(w.morning.1.to_string(), "2026-01-18 08:30:00");
        assert_eq!(w.evening.0.to_string(), "2026-01-18 16:15:00");
        assert_eq!(w.evening.1.to_string(), "2026-01-18 18:15:00");
    }

    #[test]
    fn windows_span_two_hours_for_any_sun_times() {
        let s = sun("2026-06-21T04:58:00", "2026-06-21T21:11:00");
        let date = NaiveDate::from_ymd_opt(2026, 6, 21).unwrap();
        let w = compute(&s, date);

        assert_eq!(w.morning.1 - w.morning.0, Duration::hours(2));
        assert_eq!(w.evening.1 - w.evening.0, Duration::hours(2));
        assert_eq!(w.morning.0 + Duration::hours(1), s.sunrise);
        assert_eq!(w.evening.0 + Duration::hours(1), s.sunset);
    }

    #[test]
    fn note_tracks_moon_phase() {
        // 2000-01-06 new moon, 2000-01-21 full moon, 2000-01-14 in between.
        let new = note_for(NaiveDate::from_ymd_opt(2000, 1, 6).unwrap());
        let full = note_for(NaiveDate::from_ymd_opt(2000, 1, 21).unwrap());
        let mid = note_for(NaiveDate::from_ymd_opt(2000, 1, 14).unwrap());

        assert!(new.contains("New Moon"), "got {new:?}");
        assert!(full.contains("Full Moon"), "got {full:?}");
        assert_eq!(mid, "Normal conditions.");
    }
}
