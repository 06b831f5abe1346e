//! Zodiac signs and degree formatting.
//!
//! Maps ecliptic longitudes onto the twelve 30° signs and renders degrees
//! in the `DD°MM'` notation used for chart output.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Width of one zodiac sign in degrees
pub const SIGN_SPAN: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

const SIGN_ORDER: [ZodiacSign; 12] = [
    ZodiacSign::Aries,
    ZodiacSign::Taurus,
    ZodiacSign::Gemini,
    ZodiacSign::Cancer,
    ZodiacSign::Leo,
    ZodiacSign::Virgo,
    ZodiacSign::Libra,
    ZodiacSign::Scorpio,
    ZodiacSign::Sagittarius,
    ZodiacSign::Capricorn,
    ZodiacSign::Aquarius,
    ZodiacSign::Pisces,
];

impl ZodiacSign {
    /// Sign index 0 (Aries) through 11 (Pisces)
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Self {
        SIGN_ORDER[index % 12]
    }

    /// Sign containing the given longitude (any real value, normalized first)
    pub fn from_longitude(longitude: f64) -> Self {
        let normalized = normalize_degrees(longitude);
        Self::from_index((normalized / SIGN_SPAN).floor() as usize)
    }

    pub fn name(self) -> &'static str {
        match self {
            ZodiacSign::Aries => "Aries",
            ZodiacSign::Taurus => "Taurus",
            ZodiacSign::Gemini => "Gemini",
            ZodiacSign::Cancer => "Cancer",
            ZodiacSign::Leo => "Leo",
            ZodiacSign::Virgo => "Virgo",
            ZodiacSign::Libra => "Libra",
            ZodiacSign::Scorpio => "Scorpio",
            ZodiacSign::Sagittarius => "Sagittarius",
            ZodiacSign::Capricorn => "Capricorn",
            ZodiacSign::Aquarius => "Aquarius",
            ZodiacSign::Pisces => "Pisces",
        }
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A longitude expressed as sign plus degrees within that sign
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZodiacPosition {
    pub sign: ZodiacSign,
    /// Degrees past the start of the sign, in [0, 30)
    pub degree_in_sign: f64,
}

impl ZodiacPosition {
    pub fn from_longitude(longitude: f64) -> Self {
        let normalized = normalize_degrees(longitude);
        Self {
            sign: ZodiacSign::from_longitude(normalized),
            degree_in_sign: normalized % SIGN_SPAN,
        }
    }
}

impl fmt::Display for ZodiacPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.sign, format_dms(self.degree_in_sign))
    }
}

/// Normalize any angle to [0, 360)
pub fn normalize_degrees(degrees: f64) -> f64 {
    let normalized = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}

/// Format degrees as `DD°MM'`, rounding to the nearest arc minute.
pub fn format_dms(degrees: f64) -> String {
    let mut whole = degrees.trunc() as i64;
    let mut minutes = ((degrees - whole as f64) * 60.0).round() as i64;
    if minutes >= 60 {
        whole += 1;
        minutes = 0;
    }
    format!("{:02}°{:02}'", whole, minutes)
}
