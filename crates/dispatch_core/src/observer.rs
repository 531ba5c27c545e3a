//! Ride notifications and the handles used to subscribe to them.

use std::fmt;

use crate::ecs::{DriverId, RideId, UserId};

/// A registered recipient of ride notifications. Rides hold these handles,
/// not the participants themselves; delivery resolves them through the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subscriber {
    User(UserId),
    Driver(DriverId),
}

impl fmt::Display for Subscriber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subscriber::User(id) => write!(f, "user {id}"),
            Subscriber::Driver(id) => write!(f, "driver {id}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RideEvent {
    Accepted,
    Started,
    Completed { fare: f64 },
    Cancelled,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub ride: RideId,
    pub event: RideEvent,
    pub message: String,
}

impl Notification {
    pub fn new(ride: RideId, event: RideEvent) -> Self {
        let message = match event {
            RideEvent::Accepted => format!("Ride {ride} accepted"),
            RideEvent::Started => format!("Ride {ride} started"),
            RideEvent::Completed { fare } => format!("Ride {ride} completed. Fare: {fare:.2}"),
            RideEvent::Cancelled => format!("Ride {ride} cancelled."),
        };
        Self {
            ride,
            event,
            message,
        }
    }
}
