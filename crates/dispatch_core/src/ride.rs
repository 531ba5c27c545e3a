//! Ride lifecycle: a guarded state machine that notifies its subscribers.
//!
//! ```text
//! Requested ──accept──▶ Accepted ──start──▶ OnTrip ──complete──▶ Completed
//!     │                    │                  │
//!     └──────────cancel────┴──────────────────┴──────▶ Cancelled
//! ```
//!
//! Every transition checks its guard before touching anything, so a failed
//! call leaves the ride and its driver unchanged. The driver is reserved on
//! `accept` and released on `complete` or on cancelling a ride that holds it.
//! Notifications go out after the new state is committed; a subscriber that
//! cannot be reached is skipped without affecting the ride.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ecs::{DriverId, RideId, UserId};
use crate::error::{DispatchError, DispatchResult};
use crate::observer::{Notification, RideEvent, Subscriber};
use crate::pricing::{FareStrategy, TripContext};
use crate::spatial::Coord;
use crate::store::EntityStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RideStatus {
    Requested,
    Accepted,
    OnTrip,
    Completed,
    Cancelled,
}

impl RideStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, RideStatus::Completed | RideStatus::Cancelled)
    }

    /// Whether a ride in this state holds its driver.
    pub fn holds_driver(self) -> bool {
        matches!(self, RideStatus::Accepted | RideStatus::OnTrip)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RideStatus::Requested => "Requested",
            RideStatus::Accepted => "Accepted",
            RideStatus::OnTrip => "OnTrip",
            RideStatus::Completed => "Completed",
            RideStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for RideStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug)]
pub struct Ride {
    id: RideId,
    user: UserId,
    driver: DriverId,
    pickup: Coord,
    dropoff: Coord,
    context: TripContext,
    strategy: FareStrategy,
    status: RideStatus,
    fare: Option<f64>,
    observers: Vec<Subscriber>,
}

impl Ride {
    /// A new ride in `Requested` with no subscribers.
    pub fn new(
        id: RideId,
        user: UserId,
        driver: DriverId,
        pickup: Coord,
        dropoff: Coord,
        context: TripContext,
        strategy: FareStrategy,
    ) -> Self {
        Self {
            id,
            user,
            driver,
            pickup,
            dropoff,
            context,
            strategy,
            status: RideStatus::Requested,
            fare: None,
            observers: Vec::new(),
        }
    }

    pub fn id(&self) -> RideId {
        self.id
    }

    pub fn user(&self) -> UserId {
        self.user
    }

    pub fn driver(&self) -> DriverId {
        self.driver
    }

    pub fn pickup(&self) -> Coord {
        self.pickup
    }

    pub fn dropoff(&self) -> Coord {
        self.dropoff
    }

    pub fn context(&self) -> &TripContext {
        &self.context
    }

    pub fn status(&self) -> RideStatus {
        self.status
    }

    /// Final fare; `Some` only once the ride is `Completed`.
    pub fn fare(&self) -> Option<f64> {
        self.fare
    }

    pub fn fare_name(&self) -> String {
        self.strategy.name()
    }

    pub fn strategy(&self) -> &FareStrategy {
        &self.strategy
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn observers(&self) -> &[Subscriber] {
        &self.observers
    }

    /// Register a subscriber. Duplicates are kept and notified once per
    /// registration.
    pub fn subscribe(&mut self, subscriber: Subscriber) {
        self.observers.push(subscriber);
    }

    /// Remove every registration of `subscriber`; returns how many were removed.
    pub fn unsubscribe(&mut self, subscriber: Subscriber) -> usize {
        let before = self.observers.len();
        self.observers.retain(|s| *s != subscriber);
        before - self.observers.len()
    }

    /// Deliver a notification to every subscriber in subscription order.
    pub fn notify_all(&self, store: &mut EntityStore, notification: &Notification) {
        for subscriber in &self.observers {
            store.deliver(*subscriber, notification);
        }
    }

    pub fn accept(&mut self, store: &mut EntityStore) -> DispatchResult<()> {
        self.expect_status(RideStatus::Requested, "Cannot accept now")?;
        // Reservation happens here, not at request time, so the driver may
        // have been taken by another ride in the meantime.
        if !store.driver(self.driver)?.is_available() {
            return Err(DispatchError::invalid_state(format!(
                "Cannot accept now: driver {} is on another ride",
                self.driver
            )));
        }
        store.set_driver_available(self.driver, false)?;
        self.status = RideStatus::Accepted;
        tracing::info!(ride = %self.id, driver = %self.driver, "ride accepted");
        self.publish(store, RideEvent::Accepted);
        Ok(())
    }

    pub fn start(&mut self, store: &mut EntityStore) -> DispatchResult<()> {
        self.expect_status(RideStatus::Accepted, "Cannot start now")?;
        self.status = RideStatus::OnTrip;
        tracing::info!(ride = %self.id, "ride started");
        self.publish(store, RideEvent::Started);
        Ok(())
    }

    pub fn complete(&mut self, store: &mut EntityStore) -> DispatchResult<()> {
        self.expect_status(RideStatus::OnTrip, "Cannot complete now")?;
        let fare = self.strategy.calculate(&self.context);
        store.set_driver_available(self.driver, true)?;
        self.fare = Some(fare);
        self.status = RideStatus::Completed;
        tracing::info!(ride = %self.id, fare, strategy = %self.strategy.name(), "ride completed");
        self.publish(store, RideEvent::Completed { fare });
        Ok(())
    }

    pub fn cancel(&mut self, store: &mut EntityStore) -> DispatchResult<()> {
        if self.status == RideStatus::Completed {
            return Err(DispatchError::invalid_state("Already completed"));
        }
        // Only a ride that reserved the driver may release it.
        if self.status.holds_driver() {
            store.set_driver_available(self.driver, true)?;
        }
        let previous = self.status;
        self.status = RideStatus::Cancelled;
        tracing::info!(ride = %self.id, from = %previous, "ride cancelled");
        self.publish(store, RideEvent::Cancelled);
        Ok(())
    }

    /// One-line description used by listings.
    pub fn summary(&self, store: &EntityStore) -> String {
        let user = store
            .user(self.user)
            .map(|u| u.person.name().to_string())
            .unwrap_or_else(|_| format!("#{}", self.user));
        let driver = store
            .driver(self.driver)
            .map(|d| d.person.name().to_string())
            .unwrap_or_else(|_| format!("#{}", self.driver));
        let mut line = format!(
            "#{} | User={} | Driver={} | Status={} | FareType={}",
            self.id,
            user,
            driver,
            self.status,
            self.fare_name()
        );
        if let Some(fare) = self.fare {
            line.push_str(&format!(" | Fare=Rs.{fare:.2}"));
        }
        line
    }

    fn expect_status(&self, expected: RideStatus, msg: &str) -> DispatchResult<()> {
        if self.status == expected {
            Ok(())
        } else {
            Err(DispatchError::invalid_state(msg))
        }
    }

    fn publish(&self, store: &mut EntityStore, event: RideEvent) {
        let notification = Notification::new(self.id, event);
        self.notify_all(store, &notification);
    }
}
