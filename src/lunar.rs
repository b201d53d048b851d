//! Coarse moon-phase approximation from a civil calendar date.
//!
//! Converts (year, month, day) to a Julian Day Number with the standard
//! civil-calendar algorithm, then reduces the day count since a known
//! new-moon epoch modulo the mean synodic month. Accuracy is about ±1 day
//! against an ephemeris; for bite-window notes that is plenty, and the
//! constants below are kept exactly as tuned rather than re-derived.

use chrono::{Datelike, NaiveDate};

/// Mean synodic month (new moon to new moon) in days.
pub const SYNODIC_MONTH_DAYS: f64 = 29.53;

/// Julian Day Number of a reference new moon (2000-01-06).
const NEW_MOON_EPOCH_JD: f64 = 2_451_550.1;

/// Half-width of the "near new/full moon" bands, as a fraction of the cycle.
const PHASE_BAND: f64 = 0.08;

/// Qualitative banding of the lunar cycle for the bite-window note.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PhaseBand {
    NearNew,
    NearFull,
    Normal,
}

/// Julian Day Number for a civil date at local midnight.
///
/// January and February are shifted into the previous year so the leap
/// day lands at the end of the counting year, then the Gregorian century
/// correction is applied.
pub fn julian_day_number(date: NaiveDate) -> f64 {
    let (mut y, mut m) = (date.year(), date.month() as i32);
    if m < 3 {
        y -= 1;
        m += 12;
    }
    let a = y.div_euclid(100);
    let b = 2 - a + a.div_euclid(4);
    (365.25 * (y + 4716) as f64).floor() + (30.6 * (m + 1) as f64).floor()
        + date.day() as f64
        + b as f64
        - 1524.5
}

/// Fraction of the current synodic cycle, in `[0, 1)`.
///
/// 0 is new moon, 0.5 is full moon. Depends on the calendar date only,
/// not on location or time of day.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use fishy_nw_lib::lunar::phase_fraction;
///
/// let p = phase_fraction(NaiveDate::from_ymd_opt(2000, 1, 21).unwrap());
/// assert!((p - 0.5).abs() < 0.05); // full moon that night
/// ```
pub fn phase_fraction(date: NaiveDate) -> f64 {
    let since_epoch = julian_day_number(date) - NEW_MOON_EPOCH_JD;
    since_epoch.rem_euclid(SYNODIC_MONTH_DAYS) / SYNODIC_MONTH_DAYS
}

/// Classify a phase fraction into the bands the note text cares about.
pub fn classify(phase: f64) -> PhaseBand {
    if phase < PHASE_BAND || phase > 1.0 - PHASE_BAND {
        PhaseBand::NearNew
    } else if (phase - 0.5).abs() < PHASE_BAND {
        PhaseBand::NearFull
    } else {
        PhaseBand::Normal
    }
}
