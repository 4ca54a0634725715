use jiff::{SignedDuration, civil::DateTime};

use crate::{
    format_hh_mm,
    problem::{bus_route::RouteIdx, route_network::RouteNetwork},
    utils::time::{as_minutes, from_minutes},
};

use super::{
    BOARDING_BUFFER_MINUTES,
    itinerary_request::ItineraryRequest,
    itinerary_result::{DirectItinerary, InfeasibleReason, ItineraryResult},
};

/// Arrivals this many minutes before the desired time are preferred.
pub const PREFERRED_SLACK_MINUTES: (i64, i64) = (5, 15);
pub const TARGET_SLACK_MINUTES: i64 = 10;

struct FeasibleDeparture<'a> {
    bus: &'a str,
    departure: DateTime,
    arrival: DateTime,
    slack: SignedDuration,
}

/// Picks the departure of `route_id` that lands the passenger before the
/// desired arrival. Slack within [`PREFERRED_SLACK_MINUTES`] closest to
/// [`TARGET_SLACK_MINUTES`] wins, otherwise the latest feasible arrival.
pub fn plan_direct(
    network: &RouteNetwork,
    route_id: RouteIdx,
    request: &ItineraryRequest,
) -> ItineraryResult {
    let route = network.route(route_id);
    let day_type = request.day_type();
    let desired_arrival = request.desired_arrival();

    let Some(travel_minutes) = route.travel_time_between(request.origin(), request.destination())
    else {
        return ItineraryResult::infeasible(
            InfeasibleReason::NoConnection,
            format!(
                "Route {} does not serve both {} and {}.",
                route.name(),
                request.origin(),
                request.destination()
            ),
        );
    };

    let departures = route.departures(day_type);
    let Some((first_departure, last_departure)) = route.first_and_last_departure(day_type) else {
        return ItineraryResult::infeasible(
            InfeasibleReason::NoDepartures {
                route: route.name().to_owned(),
                day_type,
            },
            format!("No buses are available on route {} on {day_type}.", route.name()),
        );
    };

    let journey = from_minutes(travel_minutes) + SignedDuration::from_mins(BOARDING_BUFFER_MINUTES);

    let feasible = departures
        .into_iter()
        .filter_map(|(bus, time)| {
            let departure = request.on_travel_date(time);
            let arrival = departure + journey;

            (arrival <= desired_arrival).then(|| FeasibleDeparture {
                bus: bus.name(),
                departure,
                arrival,
                slack: desired_arrival.duration_since(arrival),
            })
        })
        .collect::<Vec<_>>();

    let Some(selected) = select_departure(&feasible) else {
        return ItineraryResult::infeasible(
            InfeasibleReason::ArrivalTooEarly {
                route: route.name().to_owned(),
                first_departure,
                last_departure,
            },
            format!(
                "No departure arrives by {}. First bus departs at {}, last bus at {}.",
                format_hh_mm(desired_arrival.time()),
                format_hh_mm(first_departure),
                format_hh_mm(last_departure)
            ),
        );
    };

    let suggested_arrival =
        selected.departure - SignedDuration::from_mins(BOARDING_BUFFER_MINUTES);

    ItineraryResult::Direct(DirectItinerary {
        route: route.name().to_owned(),
        bus: selected.bus.to_owned(),
        departure_time: selected.departure.time(),
        estimated_arrival: selected.arrival.time(),
        suggested_arrival: suggested_arrival.time(),
        travel_minutes,
        slack_minutes: as_minutes(selected.slack),
        stops: route.ordered_stops(request.origin(), request.destination()),
    })
}

fn select_departure<'a, 'b>(
    feasible: &'b [FeasibleDeparture<'a>],
) -> Option<&'b FeasibleDeparture<'a>> {
    let (min_slack, max_slack) = PREFERRED_SLACK_MINUTES;
    let preferred = SignedDuration::from_mins(min_slack)..=SignedDuration::from_mins(max_slack);
    let target = SignedDuration::from_mins(TARGET_SLACK_MINUTES);

    feasible
        .iter()
        .filter(|candidate| preferred.contains(&candidate.slack))
        .min_by_key(|candidate| (candidate.slack - target).abs())
        .or_else(|| feasible.iter().min_by_key(|candidate| candidate.slack))
}
