mod support;

use dispatch_core::ecs::{DriverId, UserId};
use dispatch_core::spatial::Coord;
use dispatch_core::DispatchError;
use support::fleet::{assert_availability_invariant, FleetBuilder};

#[test]
fn nearest_available_driver_is_selected() {
    let dispatcher = FleetBuilder::new()
        .with_user(1, 0.0, 0.0)
        .with_driver(1, 10.0, 10.0)
        .with_driver(2, 2.0, 1.0)
        .with_driver(3, -4.0, 0.0)
        .build();

    assert_eq!(
        dispatcher.find_nearest_driver(Coord::new(0.0, 0.0)).unwrap(),
        DriverId(2)
    );
    assert_eq!(
        dispatcher.find_nearest_driver(Coord::new(-5.0, 0.0)).unwrap(),
        DriverId(3)
    );
}

#[test]
fn equidistant_drivers_resolve_to_lowest_id() {
    // Inserted out of id order; the store iterates by ascending id.
    let dispatcher = FleetBuilder::new()
        .with_user(1, 0.0, 0.0)
        .with_driver(30, 0.0, 2.0)
        .with_driver(10, 2.0, 0.0)
        .with_driver(20, -2.0, 0.0)
        .build();

    for _ in 0..3 {
        assert_eq!(
            dispatcher.find_nearest_driver(Coord::new(0.0, 0.0)).unwrap(),
            DriverId(10)
        );
    }
}

#[test]
fn accepted_driver_is_skipped_by_later_requests() {
    let mut dispatcher = FleetBuilder::new()
        .with_user(1, 0.0, 0.0)
        .with_user(2, 0.0, 0.0)
        .with_driver(1, 1.0, 0.0)
        .with_driver(2, 5.0, 0.0)
        .build();

    let mut first = dispatcher
        .request_ride(UserId(1), Coord::new(0.0, 0.0), Coord::new(4.0, 0.0), "standard")
        .expect("first");
    assert_eq!(first.driver(), DriverId(1));
    first.accept(dispatcher.store_mut()).expect("accept");

    let second = dispatcher
        .request_ride(UserId(2), Coord::new(0.0, 0.0), Coord::new(4.0, 0.0), "standard")
        .expect("second");
    assert_eq!(second.driver(), DriverId(2));

    assert_availability_invariant(dispatcher.store(), &[first, second]);
}

#[test]
fn no_available_driver_is_not_found() {
    let mut dispatcher = FleetBuilder::new()
        .with_user(1, 0.0, 0.0)
        .with_driver(1, 1.0, 0.0)
        .build();

    let mut ride = dispatcher
        .request_ride(UserId(1), Coord::new(0.0, 0.0), Coord::new(1.0, 1.0), "pool")
        .expect("ride");
    ride.accept(dispatcher.store_mut()).expect("accept");
    let next_id = dispatcher.peek_next_ride_id();

    let err = dispatcher
        .request_ride(UserId(1), Coord::new(0.0, 0.0), Coord::new(1.0, 1.0), "pool")
        .unwrap_err();
    assert_eq!(err, DispatchError::not_found("No drivers available"));
    assert_eq!(dispatcher.peek_next_ride_id(), next_id);
}

#[test]
fn completed_ride_returns_driver_to_the_pool() {
    let mut dispatcher = FleetBuilder::new()
        .with_user(1, 0.0, 0.0)
        .with_driver(1, 1.0, 0.0)
        .build();

    let mut ride = dispatcher
        .request_ride(UserId(1), Coord::new(0.0, 0.0), Coord::new(2.0, 0.0), "standard")
        .expect("ride");
    support::fleet::run_to_completion(&mut ride, dispatcher.store_mut());

    assert_eq!(
        dispatcher.find_nearest_driver(Coord::new(0.0, 0.0)).unwrap(),
        DriverId(1)
    );
}

#[test]
fn pending_requests_share_a_driver_until_one_is_accepted() {
    let mut dispatcher = FleetBuilder::new()
        .with_user(1, 0.0, 0.0)
        .with_user(2, 0.0, 0.0)
        .with_driver(1, 1.0, 0.0)
        .with_driver(2, 9.0, 0.0)
        .build();

    let mut first = dispatcher
        .request_ride(UserId(1), Coord::new(0.0, 0.0), Coord::new(3.0, 0.0), "standard")
        .expect("first");
    let mut second = dispatcher
        .request_ride(UserId(2), Coord::new(0.0, 0.0), Coord::new(3.0, 0.0), "standard")
        .expect("second");
    assert_eq!(first.driver(), second.driver());

    second.accept(dispatcher.store_mut()).expect("second wins");
    assert!(matches!(
        first.accept(dispatcher.store_mut()),
        Err(DispatchError::InvalidState(_))
    ));

    // The losing request can be cancelled without releasing the winner's driver.
    first.cancel(dispatcher.store_mut()).expect("cancel");
    assert!(!dispatcher.store().driver(DriverId(1)).unwrap().is_available());
    assert_availability_invariant(dispatcher.store(), &[first, second]);
}

#[test]
fn ride_ids_increase_monotonically() {
    let mut dispatcher = FleetBuilder::new()
        .with_user(1, 0.0, 0.0)
        .with_driver(1, 1.0, 0.0)
        .build();

    let ids: Vec<u32> = (0..5)
        .map(|_| {
            dispatcher
                .request_ride(UserId(1), Coord::new(0.0, 0.0), Coord::new(1.0, 0.0), "standard")
                .expect("ride")
                .id()
                .0
        })
        .collect();
    assert_eq!(ids, vec![1000, 1001, 1002, 1003, 1004]);
}
