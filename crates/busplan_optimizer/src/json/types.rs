use std::collections::BTreeMap;

use anyhow::Context;
use jiff::civil::DateTime;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::{
    problem::{
        bus_route::{Bus, BusRoute},
        day_type::DayType,
        fleet::CurrentFleet,
        fleet_problem::{FleetProblem, FleetProblemBuilder},
        route_network::RouteNetwork,
        timetable::Timetable,
        trip_request::{DemandWindow, TripHistory, TripRequest},
    },
    utils::time::parse_hh_mm,
};

/// Departure lists keyed by day type (`weekdays`, `friday`, `weekends`),
/// times as `HH:MM` strings.
pub type JsonBusTimetable = BTreeMap<String, Vec<String>>;

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields, rename = "Route")]
pub struct JsonRoute {
    pub stops: Vec<String>,
    #[serde(default)]
    pub buses: BTreeMap<String, JsonBusTimetable>,
}

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct JsonRouteNetwork {
    pub routes: BTreeMap<String, JsonRoute>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields, rename = "TripRequest")]
pub struct JsonTripRequest {
    pub desired_time: DateTime,
    pub starting_point: String,
    pub destination: String,
    pub created_at: Option<DateTime>,
}

impl From<&JsonTripRequest> for TripRequest {
    fn from(value: &JsonTripRequest) -> Self {
        // Requests without a creation time are dated by their travel time.
        TripRequest::new(
            value.desired_time,
            value.starting_point.as_str(),
            value.destination.as_str(),
            value.created_at.unwrap_or(value.desired_time),
        )
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename = "OptimizationInput")]
pub struct JsonOptimizationInput {
    pub routes: JsonRouteNetwork,
    pub current_fleet: Option<BTreeMap<String, usize>>,
    #[serde(default)]
    pub trip_requests: Vec<JsonTripRequest>,
}

fn build_timetable(route: &str, bus: &str, json: &JsonBusTimetable) -> anyhow::Result<Timetable> {
    let mut timetable = Timetable::new();

    for (day_type, times) in json {
        let day_type = day_type
            .parse::<DayType>()
            .with_context(|| format!("Bus '{bus}' on route '{route}'"))?;

        let departures = times
            .iter()
            .map(|time| {
                parse_hh_mm(time).with_context(|| {
                    format!(
                        "Invalid departure '{time}' of bus '{bus}' on route '{route}' ({day_type})"
                    )
                })
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        timetable.set_departures(day_type, departures);
    }

    Ok(timetable)
}

impl JsonRouteNetwork {
    pub fn build_network(&self) -> anyhow::Result<RouteNetwork> {
        let routes = self
            .routes
            .iter()
            .map(|(name, route)| {
                let buses = route
                    .buses
                    .iter()
                    .map(|(bus, timetable)| {
                        Ok(Bus::new(bus.clone(), build_timetable(name, bus, timetable)?))
                    })
                    .collect::<anyhow::Result<Vec<_>>>()?;

                Ok(BusRoute::new(name.clone(), route.stops.clone(), buses))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(RouteNetwork::new(routes)?)
    }
}

impl JsonOptimizationInput {
    pub fn trip_history(&self) -> TripHistory {
        TripHistory::new(self.trip_requests.iter().map(TripRequest::from).collect())
    }

    /// Builds the optimization problem. With a `window`, only requests
    /// created inside it feed the demand model.
    #[instrument(skip_all, level = "debug")]
    pub fn build_problem(self, window: Option<DemandWindow>) -> anyhow::Result<FleetProblem> {
        let network = self
            .routes
            .build_network()
            .context("Failed to build the route network")?;

        let mut history = self.trip_history();

        if let Some(window) = window {
            let total = history.len();
            history = history.within(window);
            debug!(
                total,
                kept = history.len(),
                days = window.days,
                "Filtered trip history"
            );
        }

        let mut builder = FleetProblemBuilder::default();

        if let Some(counts) = self.current_fleet {
            builder.set_current_fleet(CurrentFleet::from_counts(&network, &counts));
        }

        builder.set_trip_requests(history.into_requests());
        builder.set_network(network);

        Ok(builder.build()?)
    }
}
