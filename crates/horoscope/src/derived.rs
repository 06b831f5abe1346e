//! Points computed from other points rather than from the ephemeris.

use crate::points::PointId;
use crate::zodiac::normalize_degrees;
use serde::{Deserialize, Serialize};

/// Circular midpoint of two longitudes.
///
/// Sums the two unit vectors and takes the angle of the result, so the
/// midpoint of 359° and 1° is 0°, not 180°. Exactly opposite inputs have a
/// zero-length sum; `atan2(0, 0)` then yields 0°.
pub fn circular_midpoint(a: f64, b: f64) -> f64 {
    let (sin_a, cos_a) = a.to_radians().sin_cos();
    let (sin_b, cos_b) = b.to_radians().sin_cos();
    let mid = (sin_a + sin_b).atan2(cos_a + cos_b).to_degrees();
    // atan2 noise can land a hair below 0 or on 360
    let mid = normalize_degrees(mid);
    if (mid - 360.0).abs() < 1e-9 {
        0.0
    } else {
        mid
    }
}

/// Day chart: the Sun sits above the horizon, i.e. 180° or more past the
/// Ascendant in zodiacal order.
pub fn is_day_chart(sun: f64, ascendant: f64) -> bool {
    (sun - ascendant + 360.0).rem_euclid(360.0) >= 180.0
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PartOfFortune {
    pub longitude: f64,
    pub is_day_chart: bool,
}

impl PartOfFortune {
    /// Day: Asc + Moon - Sun. Night: Asc + Sun - Moon.
    pub fn calculate(sun: f64, moon: f64, ascendant: f64) -> Self {
        let is_day = is_day_chart(sun, ascendant);
        let longitude = if is_day {
            ascendant + moon - sun
        } else {
            ascendant + sun - moon
        };
        Self {
            longitude: normalize_degrees(longitude),
            is_day_chart: is_day,
        }
    }

    /// Compute from a longitude lookup; `None` when Sun, Moon or
    /// Ascendant is missing.
    pub fn from_lookup<F>(longitude_of: F) -> Option<Self>
    where
        F: Fn(PointId) -> Option<f64>,
    {
        let sun = longitude_of(PointId::Sun)?;
        let moon = longitude_of(PointId::Moon)?;
        let ascendant = longitude_of(PointId::Ascendant)?;
        Some(Self::calculate(sun, moon, ascendant))
    }
}
