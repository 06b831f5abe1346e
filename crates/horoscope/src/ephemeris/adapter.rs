//! Swiss Ephemeris backend, enabled with the `swisseph` feature.

use crate::config::{EngineSettings, EPHEMERIS_PATH_ENV};
use crate::ephemeris::types::{
    BodyPosition, EphemerisError, EphemerisProvider, HouseFrame, HouseSystem,
};
use crate::houses::HOUSE_COUNT;
use crate::points::PointId;
use crate::zodiac::normalize_degrees;
use log::{error, info};
use std::env;
use std::path::{Path, PathBuf};
use swisseph::swe::{calc_ut, houses_ex, set_ephe_path};
use swisseph::Cusp;

/// Default install location of the ephemeris data files
pub const DEFAULT_EPHEMERIS_PATH: &str = "/usr/local/share/swisseph";

// FLG_SWIEPH: read the Swiss Ephemeris data files
const FLG_SWIEPH: i32 = 2;
// FLG_SPEED: also return daily motion
const FLG_SPEED: i32 = 256;

// Indexes into the ascmc array
const ASCMC_ASC: usize = 0;
const ASCMC_MC: usize = 1;
const ASCMC_VERTEX: usize = 3;

/// Swiss Ephemeris adapter implementation
#[derive(Debug, Clone)]
pub struct SwissEphemerisAdapter {
    ephemeris_path: PathBuf,
    flags: i32,
}

impl SwissEphemerisAdapter {
    /// Create a new adapter with optional ephemeris path.
    ///
    /// Falls back to `SWISS_EPHEMERIS_PATH`, then the default location.
    pub fn new(ephemeris_path: Option<PathBuf>) -> Result<Self, EphemerisError> {
        let path = ephemeris_path.unwrap_or_else(|| {
            env::var(EPHEMERIS_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_EPHEMERIS_PATH))
        });

        if !path.exists() {
            return Err(EphemerisError::FileNotFound {
                path: path.display().to_string(),
                message: "Ephemeris path does not exist. Please ensure Swiss Ephemeris data files are installed.".to_string(),
            });
        }

        let path_str = path.to_str().ok_or_else(|| EphemerisError::FileNotFound {
            path: path.display().to_string(),
            message: "Ephemeris path is not valid UTF-8".to_string(),
        })?;
        // Process-wide setting in the C library; the last adapter built wins
        set_ephe_path(path_str);
        info!("Using Swiss Ephemeris data at {}", path.display());

        Ok(Self {
            ephemeris_path: path,
            flags: FLG_SWIEPH | FLG_SPEED,
        })
    }

    /// Build from engine settings; `SWISS_EPHEMERIS_PATH` beats the file.
    pub fn from_settings(settings: &EngineSettings) -> Result<Self, EphemerisError> {
        Self::new(settings.resolved_ephemeris_path())
    }

    pub fn ephemeris_path(&self) -> &Path {
        &self.ephemeris_path
    }
}

impl EphemerisProvider for SwissEphemerisAdapter {
    fn position(&self, jd_ut: f64, point: PointId) -> Result<BodyPosition, EphemerisError> {
        let code = point
            .ephemeris_code()
            .ok_or_else(|| EphemerisError::CalculationFailed {
                point,
                jd_ut,
                message: "point has no ephemeris body".to_string(),
            })?;

        let result = calc_ut(jd_ut, code as u32, self.flags as u32).map_err(|e| {
            error!("Swiss Ephemeris failed for {} at JD {}: {}", point, jd_ut, e);
            EphemerisError::CalculationFailed {
                point,
                jd_ut,
                message: format!("Swiss Ephemeris error: {}", e),
            }
        })?;

        let out = result.out;
        Ok(BodyPosition {
            longitude: normalize_degrees(out[0]),
            speed: out[3],
        })
    }

    fn houses(
        &self,
        jd_tt: f64,
        latitude: f64,
        longitude: f64,
        system: HouseSystem,
    ) -> Result<HouseFrame, EphemerisError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(EphemerisError::HouseCalculationFailed {
                message: format!("latitude {} out of range", latitude),
            });
        }

        let (c, a) = houses_ex(jd_tt, self.flags, latitude, longitude, system.code() as i32);
        let cusps = Cusp::from_array(c);

        let cusp_values: [f64; HOUSE_COUNT] = [
            cusps.first,
            cusps.second,
            cusps.third,
            cusps.fourth,
            cusps.fifth,
            cusps.sixth,
            cusps.seventh,
            cusps.eighth,
            cusps.ninth,
            cusps.tenth,
            cusps.eleventh,
            cusps.twelfth,
        ];

        Ok(HouseFrame {
            cusps: cusp_values.map(normalize_degrees),
            ascendant: normalize_degrees(a[ASCMC_ASC]),
            midheaven: normalize_degrees(a[ASCMC_MC]),
            vertex: normalize_degrees(a[ASCMC_VERTEX]),
        })
    }
}
