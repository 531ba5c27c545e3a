//! Scenario setup: seed the entity store and build a dispatcher from config.

use crate::config::{DispatchConfig, SeedConfig};
use crate::dispatcher::Dispatcher;
use crate::ecs::{Driver, DriverId, User, UserId, Vehicle};
use crate::store::EntityStore;

/// Load every seeded participant. Later entries overwrite earlier ones that
/// share an id.
pub fn build_store(seed: &SeedConfig) -> EntityStore {
    let mut store = EntityStore::new();
    for user in &seed.users {
        store.add_user(User::new(UserId(user.id), user.name.clone(), user.location));
    }
    for driver in &seed.drivers {
        store.add_driver(Driver::new(
            DriverId(driver.id),
            driver.name.clone(),
            Vehicle::new(driver.car.clone(), driver.plate.clone()),
            driver.location,
        ));
    }
    tracing::debug!(
        users = store.user_count(),
        drivers = store.driver_count(),
        "seeded entity store"
    );
    store
}

pub fn build_dispatcher(config: &DispatchConfig) -> Dispatcher {
    Dispatcher::with_config(build_store(&config.seed), config)
}
