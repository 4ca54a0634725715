use jiff::civil::Time;
use serde::Serialize;
use serde_with::serde_as;

use crate::{problem::day_type::DayType, utils::time::HourMinute};

#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectItinerary {
    pub route: String,
    pub bus: String,
    #[serde_as(as = "HourMinute")]
    pub departure_time: Time,
    #[serde_as(as = "HourMinute")]
    pub estimated_arrival: Time,
    /// When to be at the origin stop.
    #[serde_as(as = "HourMinute")]
    pub suggested_arrival: Time,
    pub travel_minutes: f64,
    /// Minutes between the estimated and the desired arrival.
    pub slack_minutes: f64,
    pub stops: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TransferBuffers {
    pub boarding: i64,
    pub transfer: i64,
    pub arrival: i64,
}

#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransferItinerary {
    pub first_route: String,
    pub second_route: String,
    pub transfer_stop: String,
    pub first_bus: Option<String>,
    pub second_bus: Option<String>,
    #[serde_as(as = "HourMinute")]
    pub first_departure: Time,
    #[serde_as(as = "HourMinute")]
    pub transfer_arrival: Time,
    #[serde_as(as = "HourMinute")]
    pub second_departure: Time,
    #[serde_as(as = "HourMinute")]
    pub final_arrival: Time,
    #[serde_as(as = "HourMinute")]
    pub suggested_arrival: Time,
    pub first_leg_minutes: f64,
    pub second_leg_minutes: f64,
    /// From the first departure to the final arrival.
    pub total_minutes: f64,
    pub buffers: TransferBuffers,
    pub first_leg_stops: Vec<String>,
    pub second_leg_stops: Vec<String>,
}

/// A transfer connection whose timetables leave no departure pair that
/// honors every buffer. The departure lists are returned for manual
/// planning.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnresolvedTransfer {
    pub first_route: String,
    pub second_route: String,
    pub transfer_stop: String,
    pub first_leg_minutes: f64,
    pub second_leg_minutes: f64,
    #[serde_as(as = "Vec<HourMinute>")]
    pub first_route_times: Vec<Time>,
    #[serde_as(as = "Vec<HourMinute>")]
    pub second_route_times: Vec<Time>,
}

#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InfeasibleReason {
    UnknownStop {
        stop: String,
    },
    SameStop,
    /// No route or pair of routes connects the stops.
    NoConnection,
    NoDepartures {
        route: String,
        day_type: DayType,
    },
    /// Every departure arrives after the desired time.
    ArrivalTooEarly {
        route: String,
        #[serde_as(as = "HourMinute")]
        first_departure: Time,
        #[serde_as(as = "HourMinute")]
        last_departure: Time,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Infeasibility {
    pub reason: InfeasibleReason,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ItineraryResult {
    Direct(DirectItinerary),
    Transfer(TransferItinerary),
    TransferUnresolved(UnresolvedTransfer),
    Infeasible(Infeasibility),
}

impl ItineraryResult {
    pub fn infeasible(reason: InfeasibleReason, message: impl Into<String>) -> Self {
        ItineraryResult::Infeasible(Infeasibility {
            reason,
            message: message.into(),
        })
    }

    pub fn is_feasible(&self) -> bool {
        matches!(self, ItineraryResult::Direct(_) | ItineraryResult::Transfer(_))
    }
}
