//! Engine settings read from `configs/horoscope.toml`.
//!
//! Only operational knobs live here. Aspect orbs, the point catalogue and
//! sign boundaries are fixed tables.

use crate::chart::ChartRequest;
use crate::ephemeris::HouseSystem;
use crate::points::PointId;
use crate::time::TimeContext;
use anyhow::Context;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Overrides `ephemeris_path` from the config file
pub const EPHEMERIS_PATH_ENV: &str = "SWISS_EPHEMERIS_PATH";

const CONFIG_PATHS: [&str; 2] = ["configs/horoscope.toml", "../../configs/horoscope.toml"];

#[derive(Debug, Clone, PartialEq)]
pub struct EngineSettings {
    pub ephemeris_path: Option<PathBuf>,
    pub house_system: HouseSystem,
    /// Points charted when a request names none
    pub default_points: Vec<PointId>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            ephemeris_path: None,
            house_system: HouseSystem::default(),
            default_points: PointId::BASE.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct HoroscopeToml {
    #[serde(default)]
    ephemeris_path: Option<PathBuf>,
    #[serde(default)]
    house_system: Option<String>,
    #[serde(default)]
    default_points: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    horoscope: Option<HoroscopeToml>,
}

impl EngineSettings {
    /// Parse settings from TOML text. A missing `[horoscope]` table gives
    /// the defaults.
    pub fn from_toml_str(text: &str) -> anyhow::Result<Self> {
        let root: RootConfigToml =
            toml::from_str(text).context("Failed to parse horoscope settings")?;
        let cfg = root.horoscope.unwrap_or_default();

        let mut settings = Self::default();
        settings.ephemeris_path = cfg.ephemeris_path;
        if let Some(name) = cfg.house_system {
            settings.house_system = name
                .parse()
                .with_context(|| format!("horoscope.house_system = {name:?}"))?;
        }
        if let Some(names) = cfg.default_points {
            settings.default_points = names
                .iter()
                .map(|n| PointId::from_name(n))
                .collect::<Result<_, _>>()
                .context("horoscope.default_points")?;
        }
        Ok(settings)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Could not read {}", path.display()))?;
        Self::from_toml_str(&text)
    }

    /// Ephemeris data directory, with the environment taking precedence
    pub fn resolved_ephemeris_path(&self) -> Option<PathBuf> {
        env::var_os(EPHEMERIS_PATH_ENV)
            .map(PathBuf::from)
            .or_else(|| self.ephemeris_path.clone())
    }

    /// Build a request using the configured house system, and the default
    /// points when `points` is empty.
    pub fn request(
        &self,
        time: TimeContext,
        latitude: f64,
        longitude: f64,
        points: &[&str],
    ) -> ChartRequest {
        let names: Vec<String> = if points.is_empty() {
            self.default_points.iter().map(|p| p.name().to_string()).collect()
        } else {
            points.iter().map(|p| p.to_string()).collect()
        };
        ChartRequest::new(time, latitude, longitude, names).with_house_system(self.house_system)
    }
}

/// Try the usual relative locations for `configs/horoscope.toml`; defaults
/// when none exists.
pub fn load_settings() -> anyhow::Result<EngineSettings> {
    for p in &CONFIG_PATHS {
        let path = Path::new(p);
        if path.exists() {
            return EngineSettings::load(path);
        }
    }
    log::debug!("No horoscope.toml in {:?}; using defaults", CONFIG_PATHS);
    Ok(EngineSettings::default())
}
