use dispatch_core::config::DispatchConfig;
use dispatch_core::ecs::DriverId;
use dispatch_core::ride::{Ride, RideStatus};
use dispatch_core::spatial::Coord;
use dispatch_core::store::EntityStore;
use dispatch_core::test_helpers::{test_driver, test_user};
use dispatch_core::Dispatcher;

/// Builder for small, hand-placed fleets.
#[derive(Debug, Default)]
pub struct FleetBuilder {
    users: Vec<(u32, Coord)>,
    drivers: Vec<(u32, Coord)>,
    config: DispatchConfig,
}

impl FleetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, id: u32, x: f64, y: f64) -> Self {
        self.users.push((id, Coord::new(x, y)));
        self
    }

    pub fn with_driver(mut self, id: u32, x: f64, y: f64) -> Self {
        self.drivers.push((id, Coord::new(x, y)));
        self
    }

    pub fn with_config(mut self, config: DispatchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Dispatcher {
        let mut store = EntityStore::new();
        for (id, at) in self.users {
            store.add_user(test_user(id, at));
        }
        for (id, at) in self.drivers {
            store.add_driver(test_driver(id, at));
        }
        Dispatcher::with_config(store, &self.config)
    }
}

/// Accept, start, and complete a ride, panicking on any failure.
pub fn run_to_completion(ride: &mut Ride, store: &mut EntityStore) {
    ride.accept(store).expect("accept");
    ride.start(store).expect("start");
    ride.complete(store).expect("complete");
}

/// Every driver is available exactly when no ride holds it.
pub fn assert_availability_invariant(store: &EntityStore, rides: &[Ride]) {
    for driver in store.drivers() {
        let held = rides
            .iter()
            .any(|r| r.driver() == driver.id && r.status().holds_driver());
        assert_eq!(
            driver.is_available(),
            !held,
            "driver {} availability out of sync with rides",
            driver.id
        );
    }
}

pub fn status_of(rides: &[Ride], driver: DriverId) -> Vec<RideStatus> {
    rides
        .iter()
        .filter(|r| r.driver() == driver)
        .map(|r| r.status())
        .collect()
}
