//! Participant components stored in the ECS world.
//!
//! Users and drivers are entities in a `bevy_ecs::World`; everything outside
//! the store refers to them by their integer ids, never by reference.

use std::fmt;

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

use crate::observer::Notification;
use crate::spatial::Coord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DriverId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RideId(pub u32);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for DriverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for RideId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity and reputation shared by every participant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Person {
    name: String,
    rating_sum: f64,
    rating_count: u32,
    inbox: Vec<Notification>,
}

impl Person {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Average of all recorded ratings; 0.0 before the first one.
    pub fn rating(&self) -> f64 {
        if self.rating_count == 0 {
            0.0
        } else {
            self.rating_sum / f64::from(self.rating_count)
        }
    }

    pub fn rating_count(&self) -> u32 {
        self.rating_count
    }

    pub fn add_rating(&mut self, stars: u8) {
        self.rating_sum += f64::from(stars);
        self.rating_count += 1;
    }

    /// Notifications received so far, in delivery order.
    pub fn inbox(&self) -> &[Notification] {
        &self.inbox
    }

    fn receive(&mut self, notification: Notification) {
        tracing::info!(recipient = %self.name, ride = %notification.ride, "{}", notification.message);
        self.inbox.push(notification);
    }
}

/// Capability common to users and drivers: identity, rating, and receiving
/// ride notifications.
pub trait Participant {
    fn person(&self) -> &Person;

    fn person_mut(&mut self) -> &mut Person;

    fn name(&self) -> &str {
        self.person().name()
    }

    fn rating(&self) -> f64 {
        self.person().rating()
    }

    fn add_rating(&mut self, stars: u8) {
        self.person_mut().add_rating(stars);
    }

    fn inbox(&self) -> &[Notification] {
        self.person().inbox()
    }

    fn on_notify(&mut self, notification: Notification) {
        self.person_mut().receive(notification);
    }
}

#[derive(Debug, Clone, PartialEq, Component)]
pub struct User {
    pub id: UserId,
    pub person: Person,
    pub location: Coord,
}

impl User {
    pub fn new(id: UserId, name: impl Into<String>, location: Coord) -> Self {
        Self {
            id,
            person: Person::new(name),
            location,
        }
    }
}

impl Participant for User {
    fn person(&self) -> &Person {
        &self.person
    }

    fn person_mut(&mut self) -> &mut Person {
        &mut self.person
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub model: String,
    pub plate: String,
}

impl Vehicle {
    pub fn new(model: impl Into<String>, plate: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            plate: plate.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Component)]
pub struct Driver {
    pub id: DriverId,
    pub person: Person,
    pub vehicle: Vehicle,
    pub location: Coord,
    /// Cleared while the driver is assigned to an accepted or on-trip ride.
    /// Only ride transitions flip it.
    available: bool,
}

impl Driver {
    pub fn new(id: DriverId, name: impl Into<String>, vehicle: Vehicle, location: Coord) -> Self {
        Self {
            id,
            person: Person::new(name),
            vehicle,
            location,
            available: true,
        }
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    pub(crate) fn set_available(&mut self, available: bool) {
        self.available = available;
    }
}

impl Participant for Driver {
    fn person(&self) -> &Person {
        &self.person
    }

    fn person_mut(&mut self) -> &mut Person {
        &mut self.person
    }
}
