pub mod config;
pub mod dispatcher;
pub mod ecs;
pub mod error;
pub mod matching;
pub mod observer;
pub mod payment;
pub mod pricing;
pub mod rating;
pub mod ride;
pub mod scenario;
pub mod spatial;
pub mod store;

#[cfg(feature = "test-helpers")]
pub mod test_helpers;

pub use dispatcher::Dispatcher;
pub use error::{DispatchError, DispatchResult};
pub use ride::{Ride, RideStatus};
pub use store::EntityStore;
