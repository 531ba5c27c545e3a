//! Console session: owns the dispatcher and the index of rides it created.
//!
//! The core keeps no ride registry, so the session is where rides are looked
//! up by id for later lifecycle, payment, and rating commands.

use std::collections::BTreeMap;

use dispatch_core::ecs::{Participant, RideId, UserId};
use dispatch_core::payment::{settle, PaymentMethod};
use dispatch_core::rating::{rate, RatingTarget};
use dispatch_core::spatial::Coord;
use dispatch_core::{DispatchError, DispatchResult, Dispatcher, Ride};

use crate::command::{Command, RideAction};

/// What the console should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Lines(Vec<String>),
    Exit,
}

impl Reply {
    fn line(text: impl Into<String>) -> Self {
        Reply::Lines(vec![text.into()])
    }
}

#[derive(Debug)]
pub struct Session {
    dispatcher: Dispatcher,
    rides: BTreeMap<RideId, Ride>,
}

impl Session {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher,
            rides: BTreeMap::new(),
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn ride(&self, id: RideId) -> DispatchResult<&Ride> {
        self.rides
            .get(&id)
            .ok_or_else(|| DispatchError::not_found("Ride not found"))
    }

    pub fn execute(&mut self, command: Command) -> DispatchResult<Reply> {
        match command {
            Command::ListDrivers => Ok(self.list_drivers()),
            Command::RequestRide {
                user,
                from_x,
                from_y,
                to_x,
                to_y,
                fare_type,
            } => self.request_ride(
                UserId(user),
                Coord::new(from_x, from_y),
                Coord::new(to_x, to_y),
                &fare_type,
            ),
            Command::Advance { ride, action } => self.advance(RideId(ride), action),
            Command::Pay { ride, method } => {
                let ride = self.ride(RideId(ride))?;
                let method: PaymentMethod = method.parse()?;
                let receipt = settle(ride, method)?;
                Ok(Reply::line(receipt.to_string()))
            }
            Command::Rate { ride, who, stars } => {
                let ride = self
                    .rides
                    .get(&RideId(ride))
                    .ok_or_else(|| DispatchError::not_found("Ride not found"))?;
                let target: RatingTarget = who.parse()?;
                let stars = rate(self.dispatcher.store_mut(), ride, target, stars)?;
                Ok(Reply::line(format!("Thanks! Rated {who} {stars}/5")))
            }
            Command::Summary => Ok(self.summary()),
            Command::Exit => Ok(Reply::Exit),
        }
    }

    fn list_drivers(&self) -> Reply {
        let mut lines = vec!["-- Drivers --".to_string()];
        lines.extend(self.dispatcher.store().drivers().map(|d| {
            format!(
                "#{} {:<12} | Car: {:<10} | Plate: {:<8} | Avail: {} | Rating: {:.2}",
                d.id,
                d.name(),
                d.vehicle.model,
                d.vehicle.plate,
                if d.is_available() { "Yes" } else { "No" },
                d.rating()
            )
        }));
        Reply::Lines(lines)
    }

    fn request_ride(
        &mut self,
        user: UserId,
        from: Coord,
        to: Coord,
        fare_type: &str,
    ) -> DispatchResult<Reply> {
        let ride = self.dispatcher.request_ride(user, from, to, fare_type)?;
        let driver = self.dispatcher.store().driver(ride.driver())?;
        let lines = vec![
            format!(
                "Assigned Driver: {} ({}, {})",
                driver.name(),
                driver.vehicle.model,
                driver.vehicle.plate
            ),
            format!(
                "Ride created with id: {}, type: {}, distance: {:.2} km",
                ride.id(),
                ride.fare_name(),
                ride.context().km()
            ),
        ];
        self.rides.insert(ride.id(), ride);
        Ok(Reply::Lines(lines))
    }

    fn advance(&mut self, id: RideId, action: RideAction) -> DispatchResult<Reply> {
        let ride = self
            .rides
            .get_mut(&id)
            .ok_or_else(|| DispatchError::not_found("Ride not found"))?;
        let store = self.dispatcher.store_mut();
        match action {
            RideAction::Accept => ride.accept(store)?,
            RideAction::Start => ride.start(store)?,
            RideAction::Complete => ride.complete(store)?,
            RideAction::Cancel => ride.cancel(store)?,
        }
        Ok(Reply::line(format!("Status: {}", ride.status())))
    }

    fn summary(&self) -> Reply {
        let mut lines = vec!["-- Rides --".to_string()];
        lines.extend(
            self.rides
                .values()
                .map(|ride| ride.summary(self.dispatcher.store())),
        );
        Reply::Lines(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::parse_line;
    use dispatch_core::test_helpers::demo_dispatcher;

    fn run(session: &mut Session, line: &str) -> DispatchResult<Reply> {
        let command = parse_line(line).expect("parse").expect("command");
        session.execute(command)
    }

    fn lines(reply: Reply) -> Vec<String> {
        match reply {
            Reply::Lines(lines) => lines,
            Reply::Exit => panic!("unexpected exit"),
        }
    }

    #[test]
    fn request_advance_pay_flow() {
        let mut session = Session::new(demo_dispatcher());

        let created = lines(run(&mut session, "request-ride 1 0 0 3 4 standard").unwrap());
        assert_eq!(
            created,
            vec![
                "Assigned Driver: Ramesh (Swift, DL1AA1111)",
                "Ride created with id: 1000, type: Standard, distance: 5.00 km",
            ]
        );

        for (action, status) in [
            ("accept", "Accepted"),
            ("start", "OnTrip"),
            ("complete", "Completed"),
        ] {
            let reply = run(&mut session, &format!("advance 1000 {action}")).unwrap();
            assert_eq!(lines(reply), vec![format!("Status: {status}")]);
        }

        let paid = lines(run(&mut session, "4 1000 card").unwrap());
        assert_eq!(paid, vec!["[CARD] Paying Rs.120.00 via ****1234... OK"]);
    }

    #[test]
    fn unknown_ride_is_not_found() {
        let mut session = Session::new(demo_dispatcher());
        assert_eq!(
            run(&mut session, "advance 42 accept").unwrap_err(),
            DispatchError::not_found("Ride not found")
        );
        assert_eq!(
            run(&mut session, "pay 42 cash").unwrap_err(),
            DispatchError::not_found("Ride not found")
        );
    }

    #[test]
    fn unknown_ride_wins_over_bad_token() {
        let mut session = Session::new(demo_dispatcher());
        assert_eq!(
            run(&mut session, "pay 42 wallet").unwrap_err(),
            DispatchError::not_found("Ride not found")
        );
        assert_eq!(
            run(&mut session, "rate 42 everyone 3").unwrap_err(),
            DispatchError::not_found("Ride not found")
        );
    }

    #[test]
    fn non_finite_coordinates_create_no_ride() {
        let mut session = Session::new(demo_dispatcher());
        for line in ["request-ride 1 nan 0 3 4 standard", "request-ride 1 0 0 inf 0 standard"] {
            assert!(matches!(
                run(&mut session, line),
                Err(DispatchError::InvalidArgument(_))
            ));
        }
        assert_eq!(lines(run(&mut session, "summary").unwrap()), vec!["-- Rides --"]);
        assert_eq!(session.dispatcher().peek_next_ride_id(), RideId(1000));
    }

    #[test]
    fn out_of_order_advance_reports_invalid_state() {
        let mut session = Session::new(demo_dispatcher());
        run(&mut session, "request-ride 2 5 3 0 0 pool").unwrap();
        assert_eq!(
            run(&mut session, "advance 1000 complete").unwrap_err(),
            DispatchError::invalid_state("Cannot complete now")
        );
        assert_eq!(
            session.ride(RideId(1000)).unwrap().status(),
            dispatch_core::RideStatus::Requested
        );
    }

    #[test]
    fn list_drivers_reflects_availability_and_rating() {
        let mut session = Session::new(demo_dispatcher());
        run(&mut session, "request-ride 1 0 0 3 4 standard").unwrap();
        run(&mut session, "advance 1000 accept").unwrap();
        run(&mut session, "rate 1000 driver 9").unwrap();

        let listing = lines(run(&mut session, "list-drivers").unwrap());
        assert_eq!(listing.len(), 4);
        assert_eq!(
            listing[1],
            "#101 Ramesh       | Car: Swift      | Plate: DL1AA1111 | Avail: No | Rating: 5.00"
        );
        assert!(listing[2].contains("Avail: Yes"));
    }

    #[test]
    fn rate_reports_clamped_stars() {
        let mut session = Session::new(demo_dispatcher());
        run(&mut session, "request-ride 1 0 0 3 4 standard").unwrap();
        let reply = lines(run(&mut session, "rate 1000 user -2").unwrap());
        assert_eq!(reply, vec!["Thanks! Rated user 1/5"]);
        assert!(matches!(
            run(&mut session, "rate 1000 everyone 3"),
            Err(DispatchError::InvalidArgument(_))
        ));
    }

    #[test]
    fn summary_lists_rides_by_id() {
        let mut session = Session::new(demo_dispatcher());
        run(&mut session, "request-ride 1 0 0 3 4 standard").unwrap();
        run(&mut session, "request-ride 2 5 3 6 3 surge").unwrap();
        run(&mut session, "advance 1001 cancel").unwrap();

        let summary = lines(run(&mut session, "summary").unwrap());
        assert_eq!(summary[0], "-- Rides --");
        assert!(summary[1].starts_with("#1000 | User=Aarav | Driver=Ramesh"));
        assert_eq!(
            summary[2],
            "#1001 | User=Ishita | Driver=Suman | Status=Cancelled | FareType=Surge x1.5"
        );
    }

    #[test]
    fn exit_ends_the_session() {
        let mut session = Session::new(demo_dispatcher());
        assert_eq!(run(&mut session, "exit").unwrap(), Reply::Exit);
    }
}
