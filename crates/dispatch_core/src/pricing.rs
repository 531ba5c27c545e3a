//! Fare strategies over a fixed trip context.
//!
//! Three pricing policies are supported and selected by token:
//!
//! - **standard**: `base + km * per_km + minutes * per_min`
//! - **surge**: the standard fare multiplied by a surge factor
//! - **pool**: cheaper per-distance rates plus a flat pooling surcharge
//!
//! Strategies hold only their configured constants, so `calculate` is pure.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DispatchError, DispatchResult};
use crate::spatial::{distance_km, Coord};

/// Trip duration estimate parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TripEstimateConfig {
    pub minutes_per_km: f64,
    /// Floor applied to every estimate, however short the trip.
    pub min_minutes: f64,
}

impl Default for TripEstimateConfig {
    fn default() -> Self {
        Self {
            minutes_per_km: 3.0,
            min_minutes: 8.0,
        }
    }
}

/// Distance and estimated duration of a trip, fixed when the ride is created.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TripContext {
    km: f64,
    minutes: f64,
}

impl TripContext {
    pub fn new(km: f64, minutes: f64) -> Self {
        Self { km, minutes }
    }

    /// Straight-line trip between two points with a floor-bounded duration.
    pub fn between(from: Coord, to: Coord, estimate: &TripEstimateConfig) -> Self {
        let km = distance_km(from, to);
        let minutes = (km * estimate.minutes_per_km).max(estimate.min_minutes);
        Self { km, minutes }
    }

    pub fn km(&self) -> f64 {
        self.km
    }

    pub fn minutes(&self) -> f64 {
        self.minutes
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StandardFare {
    pub base: f64,
    pub per_km: f64,
    pub per_min: f64,
}

impl Default for StandardFare {
    fn default() -> Self {
        Self {
            base: 30.0,
            per_km: 12.0,
            per_min: 2.0,
        }
    }
}

impl StandardFare {
    pub fn calculate(&self, ctx: &TripContext) -> f64 {
        self.base + ctx.km * self.per_km + ctx.minutes * self.per_min
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurgeFare {
    pub standard: StandardFare,
    pub factor: f64,
}

impl Default for SurgeFare {
    fn default() -> Self {
        Self {
            standard: StandardFare::default(),
            factor: 1.5,
        }
    }
}

impl SurgeFare {
    pub fn calculate(&self, ctx: &TripContext) -> f64 {
        self.standard.calculate(ctx) * self.factor
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolFare {
    pub base: f64,
    pub per_km: f64,
    pub per_min: f64,
    pub surcharge: f64,
}

impl Default for PoolFare {
    fn default() -> Self {
        Self {
            base: 20.0,
            per_km: 8.0,
            per_min: 1.5,
            surcharge: 5.0,
        }
    }
}

impl PoolFare {
    pub fn calculate(&self, ctx: &TripContext) -> f64 {
        self.base + ctx.km * self.per_km + ctx.minutes * self.per_min + self.surcharge
    }
}

/// Pricing constants for every strategy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    pub standard: StandardFare,
    pub surge_factor: f64,
    pub pool: PoolFare,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            standard: StandardFare::default(),
            surge_factor: SurgeFare::default().factor,
            pool: PoolFare::default(),
        }
    }
}

/// Token naming a fare strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FareType {
    Standard,
    Surge,
    Pool,
}

impl FareType {
    pub fn as_str(self) -> &'static str {
        match self {
            FareType::Standard => "standard",
            FareType::Surge => "surge",
            FareType::Pool => "pool",
        }
    }
}

impl FromStr for FareType {
    type Err = DispatchError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token {
            "standard" => Ok(FareType::Standard),
            "surge" => Ok(FareType::Surge),
            "pool" => Ok(FareType::Pool),
            other => Err(DispatchError::invalid_argument(format!(
                "Unknown ride type: {other}"
            ))),
        }
    }
}

impl fmt::Display for FareType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FareStrategy {
    Standard(StandardFare),
    Surge(SurgeFare),
    Pool(PoolFare),
}

impl FareStrategy {
    pub fn build(fare_type: FareType, pricing: &PricingConfig) -> Self {
        match fare_type {
            FareType::Standard => FareStrategy::Standard(pricing.standard),
            FareType::Surge => FareStrategy::Surge(SurgeFare {
                standard: pricing.standard,
                factor: pricing.surge_factor,
            }),
            FareType::Pool => FareStrategy::Pool(pricing.pool),
        }
    }

    /// Parse a strategy token and build it; unknown tokens are `InvalidArgument`.
    pub fn from_token(token: &str, pricing: &PricingConfig) -> DispatchResult<Self> {
        Ok(Self::build(token.parse()?, pricing))
    }

    pub fn fare_type(&self) -> FareType {
        match self {
            FareStrategy::Standard(_) => FareType::Standard,
            FareStrategy::Surge(_) => FareType::Surge,
            FareStrategy::Pool(_) => FareType::Pool,
        }
    }

    pub fn calculate(&self, ctx: &TripContext) -> f64 {
        match self {
            FareStrategy::Standard(fare) => fare.calculate(ctx),
            FareStrategy::Surge(fare) => fare.calculate(ctx),
            FareStrategy::Pool(fare) => fare.calculate(ctx),
        }
    }

    pub fn name(&self) -> String {
        match self {
            FareStrategy::Standard(_) => "Standard".to_string(),
            FareStrategy::Surge(fare) => format!("Surge x{}", fare.factor),
            FareStrategy::Pool(_) => "Pool".to_string(),
        }
    }
}
