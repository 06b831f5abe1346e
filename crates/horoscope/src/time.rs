//! Julian day time context for a chart.

use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::{Deserialize, Serialize};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// The two time scales the ephemeris needs: UT for body positions and
/// TT for house cusps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeContext {
    pub jd_ut: f64,
    pub jd_tt: f64,
}

impl TimeContext {
    pub fn new(jd_ut: f64, jd_tt: f64) -> Self {
        Self { jd_ut, jd_tt }
    }

    /// Build from a UTC instant and ΔT (TT - UT) in seconds
    pub fn from_utc(dt: DateTime<Utc>, delta_t_seconds: f64) -> Self {
        let jd_ut = datetime_to_julian_day(dt);
        Self {
            jd_ut,
            jd_tt: jd_ut + delta_t_seconds / SECONDS_PER_DAY,
        }
    }

    pub fn delta_t_seconds(&self) -> f64 {
        (self.jd_tt - self.jd_ut) * SECONDS_PER_DAY
    }
}

/// Convert UTC datetime to Julian Day (Gregorian calendar)
pub fn datetime_to_julian_day(dt: DateTime<Utc>) -> f64 {
    let mut year = dt.year() as f64;
    let mut month = dt.month() as f64;
    if month <= 2.0 {
        year -= 1.0;
        month += 12.0;
    }

    let century = (year / 100.0).floor();
    let gregorian = 2.0 - century + (century / 4.0).floor();

    let seconds = dt.second() as f64 + dt.nanosecond() as f64 / 1e9;
    let hour_decimal = dt.hour() as f64 + dt.minute() as f64 / 60.0 + seconds / 3600.0;
    let day = dt.day() as f64 + hour_decimal / 24.0;

    (365.25 * (year + 4716.0)).floor() + (30.6001 * (month + 1.0)).floor() + day + gregorian
        - 1524.5
}
