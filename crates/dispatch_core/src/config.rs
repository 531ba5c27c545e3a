//! Dispatch configuration loaded from JSON.
//!
//! Every field has a default, so an empty object `{}` yields the stock
//! pricing, trip estimate, and demo fleet.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pricing::{PricingConfig, TripEstimateConfig};
use crate::spatial::Coord;

/// Ride ids start here unless configured otherwise.
pub const DEFAULT_FIRST_RIDE_ID: u32 = 1000;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSeed {
    pub id: u32,
    pub name: String,
    pub location: Coord,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverSeed {
    pub id: u32,
    pub name: String,
    pub car: String,
    pub plate: String,
    pub location: Coord,
}

/// Participants loaded into the store at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    pub users: Vec<UserSeed>,
    pub drivers: Vec<DriverSeed>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        let user = |id, name: &str, x, y| UserSeed {
            id,
            name: name.to_string(),
            location: Coord::new(x, y),
        };
        let driver = |id, name: &str, car: &str, plate: &str, x, y| DriverSeed {
            id,
            name: name.to_string(),
            car: car.to_string(),
            plate: plate.to_string(),
            location: Coord::new(x, y),
        };
        Self {
            users: vec![user(1, "Aarav", 0.0, 0.0), user(2, "Ishita", 5.0, 3.0)],
            drivers: vec![
                driver(101, "Ramesh", "Swift", "DL1AA1111", 1.0, 1.0),
                driver(102, "Suman", "i20", "HR26BB2222", 6.0, 4.0),
                driver(103, "Faizan", "WagonR", "UP14CC3333", 15.0, 2.0),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    pub pricing: PricingConfig,
    pub trip: TripEstimateConfig,
    pub first_ride_id: u32,
    pub seed: SeedConfig,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            pricing: PricingConfig::default(),
            trip: TripEstimateConfig::default(),
            first_ride_id: DEFAULT_FIRST_RIDE_ID,
            seed: SeedConfig::default(),
        }
    }
}

impl DispatchConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.first_ride_id == 0 {
            return Err(ConfigError::Invalid(
                "first_ride_id must be positive".to_string(),
            ));
        }
        if !(self.pricing.surge_factor.is_finite() && self.pricing.surge_factor > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "surge_factor must be positive, got {}",
                self.pricing.surge_factor
            )));
        }
        let rates = [
            self.pricing.standard.base,
            self.pricing.standard.per_km,
            self.pricing.standard.per_min,
            self.pricing.pool.base,
            self.pricing.pool.per_km,
            self.pricing.pool.per_min,
            self.pricing.pool.surcharge,
            self.trip.minutes_per_km,
            self.trip.min_minutes,
        ];
        if rates.iter().any(|r| !r.is_finite() || *r < 0.0) {
            return Err(ConfigError::Invalid(
                "fare and trip constants must be non-negative".to_string(),
            ));
        }
        if let Some(seed) = self.seed.users.iter().find(|u| u.id == 0) {
            return Err(ConfigError::Invalid(format!(
                "user {} has id 0; ids must be positive",
                seed.name
            )));
        }
        if let Some(seed) = self.seed.drivers.iter().find(|d| d.id == 0) {
            return Err(ConfigError::Invalid(format!(
                "driver {} has id 0; ids must be positive",
                seed.name
            )));
        }
        Ok(())
    }
}
