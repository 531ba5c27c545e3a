//! Post-ride ratings for either side of a ride.

use std::str::FromStr;

use crate::ecs::Participant;
use crate::error::{DispatchError, DispatchResult};
use crate::ride::Ride;
use crate::store::EntityStore;

pub const MIN_STARS: i64 = 1;
pub const MAX_STARS: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingTarget {
    User,
    Driver,
}

impl FromStr for RatingTarget {
    type Err = DispatchError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token {
            "user" => Ok(RatingTarget::User),
            "driver" => Ok(RatingTarget::Driver),
            _ => Err(DispatchError::invalid_argument(
                "rate who must be user|driver",
            )),
        }
    }
}

/// Record a rating for the ride's user or driver. Stars outside 1..=5 are
/// clamped; returns the stars actually recorded.
pub fn rate(
    store: &mut EntityStore,
    ride: &Ride,
    target: RatingTarget,
    stars: i64,
) -> DispatchResult<u8> {
    let stars = stars.clamp(MIN_STARS, MAX_STARS) as u8;
    match target {
        RatingTarget::User => store.user_mut(ride.user())?.add_rating(stars),
        RatingTarget::Driver => store.driver_mut(ride.driver())?.add_rating(stars),
    }
    tracing::info!(ride = %ride.id(), ?target, stars, "rating recorded");
    Ok(stars)
}
