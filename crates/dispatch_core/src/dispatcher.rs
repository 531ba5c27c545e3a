//! Dispatcher: turns a ride request into a `Ride` bound to the nearest
//! available driver.
//!
//! The dispatcher owns the entity store and the ride id counter. It does not
//! keep the rides it creates; callers index them and drive their lifecycle.
//!
//! Drivers are reserved when a ride is accepted, not when it is requested.
//! Until acceptance the matched driver still counts as available, so two
//! pending requests can be matched to the same driver. Whichever ride is
//! accepted first gets the driver; accepting the other then fails.

use crate::config::{DispatchConfig, DEFAULT_FIRST_RIDE_ID};
use crate::ecs::{DriverId, RideId, UserId};
use crate::error::{DispatchError, DispatchResult};
use crate::matching::nearest_available;
use crate::observer::Subscriber;
use crate::pricing::{FareStrategy, PricingConfig, TripContext, TripEstimateConfig};
use crate::ride::Ride;
use crate::spatial::Coord;
use crate::store::EntityStore;

#[derive(Debug)]
pub struct Dispatcher {
    store: EntityStore,
    pricing: PricingConfig,
    trip: TripEstimateConfig,
    next_ride_id: u32,
}

impl Dispatcher {
    /// Dispatcher with stock pricing over an existing store.
    pub fn new(store: EntityStore) -> Self {
        Self {
            store,
            pricing: PricingConfig::default(),
            trip: TripEstimateConfig::default(),
            next_ride_id: DEFAULT_FIRST_RIDE_ID,
        }
    }

    /// Dispatcher using the pricing, trip estimate, and id settings of
    /// `config`. Seeding the store is left to the caller.
    pub fn with_config(store: EntityStore, config: &DispatchConfig) -> Self {
        Self {
            store,
            pricing: config.pricing,
            trip: config.trip,
            next_ride_id: config.first_ride_id,
        }
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut EntityStore {
        &mut self.store
    }

    pub fn pricing(&self) -> &PricingConfig {
        &self.pricing
    }

    /// Id the next successful request will receive.
    pub fn peek_next_ride_id(&self) -> RideId {
        RideId(self.next_ride_id)
    }

    pub fn find_nearest_driver(&self, source: Coord) -> DispatchResult<DriverId> {
        nearest_available(source, self.store.drivers())
            .map(|candidate| candidate.driver)
            .ok_or_else(|| DispatchError::not_found("No drivers available"))
    }

    pub fn make_strategy(&self, fare_type: &str) -> DispatchResult<FareStrategy> {
        FareStrategy::from_token(fare_type, &self.pricing)
    }

    /// Match a rider to the nearest available driver and create the ride in
    /// `Requested`, with the rider and driver subscribed. Nothing is allocated
    /// unless every lookup succeeds.
    pub fn request_ride(
        &mut self,
        user: UserId,
        from: Coord,
        to: Coord,
        fare_type: &str,
    ) -> DispatchResult<Ride> {
        if !from.is_finite() || !to.is_finite() {
            return Err(DispatchError::invalid_argument(
                "Pickup and dropoff coordinates must be finite",
            ));
        }
        self.store.user(user)?;
        let driver = self.find_nearest_driver(from)?;
        let strategy = self.make_strategy(fare_type)?;
        let context = TripContext::between(from, to, &self.trip);
        let id = self.allocate_ride_id()?;

        let mut ride = Ride::new(id, user, driver, from, to, context, strategy);
        ride.subscribe(Subscriber::User(user));
        ride.subscribe(Subscriber::Driver(driver));

        let assigned = self.store.driver(driver)?;
        tracing::info!(
            ride = %id,
            user = %user,
            driver = %driver,
            car = %assigned.vehicle.model,
            plate = %assigned.vehicle.plate,
            km = context.km(),
            "assigned driver {}",
            assigned.person.name()
        );
        Ok(ride)
    }

    fn allocate_ride_id(&mut self) -> DispatchResult<RideId> {
        let id = self.next_ride_id;
        self.next_ride_id = id
            .checked_add(1)
            .ok_or_else(|| DispatchError::invalid_state("ride id space exhausted"))?;
        Ok(RideId(id))
    }
}
