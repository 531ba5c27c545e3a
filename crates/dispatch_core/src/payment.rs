//! Payment dispatch for completed rides.
//!
//! Settling only reads a completed ride's fare and acknowledges it through
//! the chosen method; nothing in the ride or the store changes.

use std::fmt;
use std::str::FromStr;

use crate::ecs::RideId;
use crate::error::{DispatchError, DispatchResult};
use crate::ride::{Ride, RideStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentMethod {
    Upi,
    Card,
    Cash,
}

impl PaymentMethod {
    pub fn label(self) -> &'static str {
        match self {
            PaymentMethod::Upi => "UPI",
            PaymentMethod::Card => "CARD",
            PaymentMethod::Cash => "CASH",
        }
    }

    fn reference(self) -> &'static str {
        match self {
            PaymentMethod::Upi => "user@upi",
            PaymentMethod::Card => "****1234",
            PaymentMethod::Cash => "cash",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = DispatchError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token {
            "upi" => Ok(PaymentMethod::Upi),
            "card" => Ok(PaymentMethod::Card),
            "cash" => Ok(PaymentMethod::Cash),
            other => Err(DispatchError::invalid_argument(format!(
                "Unknown payment kind: {other}"
            ))),
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaymentReceipt {
    pub ride: RideId,
    pub method: PaymentMethod,
    pub amount: f64,
    pub reference: String,
}

impl fmt::Display for PaymentReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.method {
            PaymentMethod::Cash => write!(f, "[CASH] Collect Rs.{:.2} in cash.", self.amount),
            method => write!(
                f,
                "[{}] Paying Rs.{:.2} via {}... OK",
                method.label(),
                self.amount,
                self.reference
            ),
        }
    }
}

/// Pay for a completed ride. Rides in any other state are `InvalidState`.
pub fn settle(ride: &Ride, method: PaymentMethod) -> DispatchResult<PaymentReceipt> {
    let amount = match (ride.status(), ride.fare()) {
        (RideStatus::Completed, Some(fare)) => fare,
        _ => return Err(DispatchError::invalid_state("Pay only after completion")),
    };
    let receipt = PaymentReceipt {
        ride: ride.id(),
        method,
        amount,
        reference: method.reference().to_string(),
    };
    tracing::info!(ride = %receipt.ride, method = %method, amount, "payment acknowledged");
    Ok(receipt)
}
