//! Nearest-available-driver selection.
//!
//! Candidates are scanned linearly in the order they are supplied. A later
//! candidate replaces the current best only when it is strictly closer, so
//! among equidistant drivers the first one encountered wins. A driver whose
//! distance is not finite is never selected.

use crate::ecs::{Driver, DriverId};
use crate::spatial::{distance_km, Coord};

/// A driver considered for a pickup, with its straight-line distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchCandidate {
    pub driver: DriverId,
    pub pickup_distance_km: f64,
}

/// Pick the closest available driver to `source`, or `None` if every driver
/// is busy.
pub fn nearest_available<'a>(
    source: Coord,
    drivers: impl IntoIterator<Item = &'a Driver>,
) -> Option<MatchCandidate> {
    let mut best: Option<MatchCandidate> = None;

    for driver in drivers {
        if !driver.is_available() {
            continue;
        }
        let pickup_distance_km = distance_km(driver.location, source);
        tracing::debug!(driver = %driver.id, pickup_distance_km, "scanning candidate");
        if !pickup_distance_km.is_finite() {
            continue;
        }

        match best {
            Some(current) if pickup_distance_km >= current.pickup_distance_km => {}
            _ => {
                best = Some(MatchCandidate {
                    driver: driver.id,
                    pickup_distance_km,
                })
            }
        }
    }

    best
}
