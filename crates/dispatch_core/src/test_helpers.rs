//! Test helpers for common test setup and utilities.
//!
//! This module provides shared fixtures to reduce duplication across test
//! files and benchmarks.

use crate::config::{DispatchConfig, SeedConfig};
use crate::dispatcher::Dispatcher;
use crate::ecs::{Driver, DriverId, User, UserId, Vehicle};
use crate::scenario::{build_dispatcher, build_store};
use crate::spatial::Coord;
use crate::store::EntityStore;

pub const AARAV: UserId = UserId(1);
pub const ISHITA: UserId = UserId(2);
pub const RAMESH: DriverId = DriverId(101);
pub const SUMAN: DriverId = DriverId(102);
pub const FAIZAN: DriverId = DriverId(103);

pub const ORIGIN: Coord = Coord::new(0.0, 0.0);
/// Five kilometres from `ORIGIN`.
pub const THREE_FOUR: Coord = Coord::new(3.0, 4.0);

/// The demo fleet: two users and three drivers.
pub fn demo_store() -> EntityStore {
    build_store(&SeedConfig::default())
}

/// A dispatcher over the demo fleet with stock pricing.
pub fn demo_dispatcher() -> Dispatcher {
    build_dispatcher(&DispatchConfig::default())
}

pub fn test_user(id: u32, at: Coord) -> User {
    User::new(UserId(id), format!("user-{id}"), at)
}

pub fn test_driver(id: u32, at: Coord) -> Driver {
    Driver::new(
        DriverId(id),
        format!("driver-{id}"),
        Vehicle::new("Swift", format!("TEST{id:04}")),
        at,
    )
}
