//! Entity store: users and drivers keyed by id.
//!
//! Participants are entities in a single ECS world. Each kind has an ordered
//! id index, so `users()` and `drivers()` always iterate in ascending id order
//! and can be restarted at will. Nearest-driver selection relies on this
//! ordering to break distance ties deterministically.

use std::collections::BTreeMap;
use std::fmt;

use bevy_ecs::prelude::{Entity, Mut, World};

use crate::ecs::{Driver, DriverId, Participant, User, UserId};
use crate::error::{DispatchError, DispatchResult};
use crate::observer::{Notification, Subscriber};

#[derive(Default)]
pub struct EntityStore {
    world: World,
    users: BTreeMap<UserId, Entity>,
    drivers: BTreeMap<DriverId, Entity>,
}

impl fmt::Debug for EntityStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityStore")
            .field("users", &self.users.len())
            .field("drivers", &self.drivers.len())
            .finish()
    }
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a user, replacing any existing user with the same id.
    pub fn add_user(&mut self, user: User) {
        match self.users.get(&user.id) {
            Some(&entity) => {
                self.world.entity_mut(entity).insert(user);
            }
            None => {
                let id = user.id;
                let entity = self.world.spawn(user).id();
                self.users.insert(id, entity);
            }
        }
    }

    /// Insert a driver, replacing any existing driver with the same id.
    pub fn add_driver(&mut self, driver: Driver) {
        match self.drivers.get(&driver.id) {
            Some(&entity) => {
                self.world.entity_mut(entity).insert(driver);
            }
            None => {
                let id = driver.id;
                let entity = self.world.spawn(driver).id();
                self.drivers.insert(id, entity);
            }
        }
    }

    pub fn user(&self, id: UserId) -> DispatchResult<&User> {
        self.users
            .get(&id)
            .and_then(|entity| self.world.get::<User>(*entity))
            .ok_or_else(|| DispatchError::not_found(format!("user {id}")))
    }

    pub fn user_mut(&mut self, id: UserId) -> DispatchResult<&mut User> {
        let entity = *self
            .users
            .get(&id)
            .ok_or_else(|| DispatchError::not_found(format!("user {id}")))?;
        self.world
            .get_mut::<User>(entity)
            .map(Mut::into_inner)
            .ok_or_else(|| DispatchError::not_found(format!("user {id}")))
    }

    pub fn driver(&self, id: DriverId) -> DispatchResult<&Driver> {
        self.drivers
            .get(&id)
            .and_then(|entity| self.world.get::<Driver>(*entity))
            .ok_or_else(|| DispatchError::not_found(format!("driver {id}")))
    }

    pub fn driver_mut(&mut self, id: DriverId) -> DispatchResult<&mut Driver> {
        let entity = *self
            .drivers
            .get(&id)
            .ok_or_else(|| DispatchError::not_found(format!("driver {id}")))?;
        self.world
            .get_mut::<Driver>(entity)
            .map(Mut::into_inner)
            .ok_or_else(|| DispatchError::not_found(format!("driver {id}")))
    }

    /// All users in ascending id order.
    pub fn users(&self) -> impl Iterator<Item = &User> + '_ {
        self.users
            .values()
            .filter_map(|entity| self.world.get::<User>(*entity))
    }

    /// All drivers in ascending id order.
    pub fn drivers(&self) -> impl Iterator<Item = &Driver> + '_ {
        self.drivers
            .values()
            .filter_map(|entity| self.world.get::<Driver>(*entity))
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn driver_count(&self) -> usize {
        self.drivers.len()
    }

    pub(crate) fn set_driver_available(
        &mut self,
        id: DriverId,
        available: bool,
    ) -> DispatchResult<()> {
        self.driver_mut(id)?.set_available(available);
        Ok(())
    }

    /// Hand a notification to one subscriber. A subscriber missing from the
    /// store is logged and skipped; returns whether delivery happened.
    pub fn deliver(&mut self, to: Subscriber, notification: &Notification) -> bool {
        let delivered = match to {
            Subscriber::User(id) => self
                .user_mut(id)
                .map(|user| user.on_notify(notification.clone())),
            Subscriber::Driver(id) => self
                .driver_mut(id)
                .map(|driver| driver.on_notify(notification.clone())),
        };
        match delivered {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(subscriber = %to, ride = %notification.ride, "notification dropped: {err}");
                false
            }
        }
    }
}
