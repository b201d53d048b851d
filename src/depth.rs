//! Trolling-depth estimation.
//!
//! An empirical rule of thumb for flatline trolling, not a physical
//! simulation: depth scales linearly with weight and line out, falls off
//! with speed to the 1.35 power, and is reduced by the line's relative
//! water drag. The coefficient 0.135 and both exponents are curve-fit
//! constants and must not be "corrected".

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Sanity ceiling on the estimate, in feet.
pub const MAX_DEPTH_FT: f64 = 250.0;

/// Line test strength at which the drag correction is neutral, in pounds.
pub const BASELINE_TEST_LB: f64 = 20.0;

/// Fishing line material, ordered from least to most water drag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineType {
    Braid,
    Fluorocarbon,
    Monofilament,
}

impl LineType {
    /// Relative drag constant: higher drag means a shallower run for the
    /// same speed, weight, and line out.
    pub fn drag(self) -> f64 {
        match self {
            LineType::Braid => 1.00,
            LineType::Fluorocarbon => 1.12,
            LineType::Monofilament => 1.20,
        }
    }
}

impl fmt::Display for LineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LineType::Braid => "Braid",
            LineType::Fluorocarbon => "Fluorocarbon",
            LineType::Monofilament => "Monofilament",
        };
        f.write_str(name)
    }
}

impl FromStr for LineType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "braid" => Ok(LineType::Braid),
            "fluorocarbon" | "fluoro" => Ok(LineType::Fluorocarbon),
            "monofilament" | "mono" => Ok(LineType::Monofilament),
            other => Err(format!(
                "unknown line type {other:?} (expected braid, fluorocarbon, or monofilament)"
            )),
        }
    }
}

/// Estimate running depth in feet, with the line-test drag correction.
///
/// Returns `None` for any non-positive input; the UI shows a placeholder
/// for that case rather than an error. The result is clamped to
/// [0, [`MAX_DEPTH_FT`]] and rounded to one decimal place.
///
/// `line_test_lb` is the line's rated breaking strength, standing in for
/// line diameter: thicker line drags more and runs shallower. At the 20 lb
/// baseline the correction term is exactly 1 and this matches
/// [`estimate_at_baseline`].
///
/// # Example
/// ```
/// use fishy_nw_lib::depth::{estimate, LineType};
///
/// let d = estimate(1.5, 8.0, 120.0, LineType::Braid, 20.0).unwrap();
/// assert_eq!(d, 75.0);
/// ```
pub fn estimate(
    speed_mph: f64,
    weight_oz: f64,
    line_out_ft: f64,
    line: LineType,
    line_test_lb: f64,
) -> Option<f64> {
    if speed_mph <= 0.0 || weight_oz <= 0.0 || line_out_ft <= 0.0 || line_test_lb <= 0.0 {
        return None;
    }

    let test_drag = (line_test_lb / BASELINE_TEST_LB).powf(0.35);
    let total_drag = line.drag() * test_drag;
    let depth = 0.135 * (weight_oz / (total_drag * speed_mph.powf(1.35))) * line_out_ft;

    let clamped = depth.clamp(0.0, MAX_DEPTH_FT);
    Some((clamped * 10.0).round() / 10.0)
}

/// Estimate running depth at the 20 lb baseline (no line-test correction).
///
/// This is the formula the earlier revisions of the calculator shipped
/// with; it is identical to [`estimate`] with `line_test_lb = 20`.
pub fn estimate_at_baseline(
    speed_mph: f64,
    weight_oz: f64,
    line_out_ft: f64,
    line: LineType,
) -> Option<f64> {
    estimate(speed_mph, weight_oz, line_out_ft, line, BASELINE_TEST_LB)
}
