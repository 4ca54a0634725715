use fxhash::FxHashSet;
use jiff::{SignedDuration, civil::Time};

use crate::{
    problem::{bus_route::RouteIdx, day_type::DayType, route_network::RouteNetwork},
    utils::time::{as_minutes, from_minutes},
};

use super::{
    BOARDING_BUFFER_MINUTES,
    itinerary_request::ItineraryRequest,
    itinerary_result::{ItineraryResult, TransferBuffers, TransferItinerary, UnresolvedTransfer},
};

/// Walking time between the two buses when comparing connections.
pub const TRANSFER_ALLOWANCE_MINUTES: f64 = 10.0;
pub const MAX_TRANSFER_JOURNEY_MINUTES: f64 = 120.0;

/// Time reserved at the transfer stop before the second departure.
pub const TRANSFER_BUFFER_MINUTES: i64 = 8;
/// Margin kept before the desired arrival.
pub const ARRIVAL_BUFFER_MINUTES: i64 = 5;
/// Minimum extra wait at the transfer stop on top of the transfer buffer.
pub const MIN_TRANSFER_SLACK_MINUTES: i64 = 5;

/// Two routes joined at a shared stop.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferOption {
    pub first_route: RouteIdx,
    pub second_route: RouteIdx,
    pub transfer_stop: String,
    pub first_leg_minutes: f64,
    pub second_leg_minutes: f64,
}

impl TransferOption {
    pub fn total_minutes(&self) -> f64 {
        self.first_leg_minutes + TRANSFER_ALLOWANCE_MINUTES + self.second_leg_minutes
    }
}

#[inline]
pub fn is_within_journey_limit(total_minutes: f64) -> bool {
    total_minutes <= MAX_TRANSFER_JOURNEY_MINUTES
}

/// Every ordered pair of distinct routes where the first serves `origin`,
/// the second serves `destination` and both share a transfer stop, for
/// each shared stop. Connections over [`MAX_TRANSFER_JOURNEY_MINUTES`] are
/// left out.
pub fn find_transfer_options(
    network: &RouteNetwork,
    origin: &str,
    destination: &str,
) -> Vec<TransferOption> {
    let mut options = Vec::new();

    for first_route_id in network.routes_with_stop(origin) {
        let first_route = network.route(first_route_id);

        for second_route_id in network.routes_with_stop(destination) {
            if first_route_id == second_route_id {
                continue;
            }

            let second_route = network.route(second_route_id);
            let mut seen = FxHashSet::default();

            for stop in first_route.stops() {
                if stop == origin
                    || stop == destination
                    || !seen.insert(stop.as_str())
                    || !second_route.contains_stop(stop)
                {
                    continue;
                }

                let (Some(first_leg_minutes), Some(second_leg_minutes)) = (
                    first_route.travel_time_between(origin, stop),
                    second_route.travel_time_between(stop, destination),
                ) else {
                    continue;
                };

                let option = TransferOption {
                    first_route: first_route_id,
                    second_route: second_route_id,
                    transfer_stop: stop.clone(),
                    first_leg_minutes,
                    second_leg_minutes,
                };

                if is_within_journey_limit(option.total_minutes()) {
                    options.push(option);
                }
            }
        }
    }

    options
}

/// Shortest connection. Among equally short ones the first found wins.
pub fn best_transfer_option(options: &[TransferOption]) -> Option<&TransferOption> {
    options
        .iter()
        .min_by(|a, b| a.total_minutes().total_cmp(&b.total_minutes()))
}

/// Times the connection backwards from the desired arrival. A second leg
/// qualifies when it arrives [`ARRIVAL_BUFFER_MINUTES`] before the desired
/// time, a first leg when it reaches the transfer stop
/// [`TRANSFER_BUFFER_MINUTES`] before the second departure with at least
/// [`MIN_TRANSFER_SLACK_MINUTES`] to spare. The pair with the least total
/// waiting is kept.
pub fn resolve_transfer(
    network: &RouteNetwork,
    option: &TransferOption,
    request: &ItineraryRequest,
) -> ItineraryResult {
    let day_type = request.day_type();
    let first_route = network.route(option.first_route);
    let second_route = network.route(option.second_route);

    let first_route_times = first_route.departure_times(day_type);
    let second_route_times = second_route.departure_times(day_type);

    let first_leg = from_minutes(option.first_leg_minutes);
    let second_leg = from_minutes(option.second_leg_minutes);
    let transfer_buffer = SignedDuration::from_mins(TRANSFER_BUFFER_MINUTES);
    let min_transfer_slack = SignedDuration::from_mins(MIN_TRANSFER_SLACK_MINUTES);
    let ideal_arrival =
        request.desired_arrival() - SignedDuration::from_mins(ARRIVAL_BUFFER_MINUTES);

    let mut best: Option<(SignedDuration, Time, Time)> = None;

    for &second_time in &second_route_times {
        let second_departure = request.on_travel_date(second_time);
        let final_arrival = second_departure + second_leg;
        if final_arrival > ideal_arrival {
            continue;
        }

        let required_transfer_arrival = second_departure - transfer_buffer;

        for &first_time in &first_route_times {
            let transfer_arrival = request.on_travel_date(first_time) + first_leg;
            if transfer_arrival > required_transfer_arrival {
                continue;
            }

            let transfer_wait = required_transfer_arrival.duration_since(transfer_arrival);
            if transfer_wait < min_transfer_slack {
                continue;
            }

            let total_wait = ideal_arrival.duration_since(final_arrival) + transfer_wait;
            if best.is_none_or(|(best_wait, _, _)| total_wait < best_wait) {
                best = Some((total_wait, first_time, second_time));
            }
        }
    }

    let Some((_, first_time, second_time)) = best else {
        return ItineraryResult::TransferUnresolved(UnresolvedTransfer {
            first_route: first_route.name().to_owned(),
            second_route: second_route.name().to_owned(),
            transfer_stop: option.transfer_stop.clone(),
            first_leg_minutes: option.first_leg_minutes,
            second_leg_minutes: option.second_leg_minutes,
            first_route_times,
            second_route_times,
        });
    };

    let first_departure = request.on_travel_date(first_time);
    let second_departure = request.on_travel_date(second_time);
    let final_arrival = second_departure + second_leg;
    let suggested_arrival = first_departure - SignedDuration::from_mins(BOARDING_BUFFER_MINUTES);

    ItineraryResult::Transfer(TransferItinerary {
        first_route: first_route.name().to_owned(),
        second_route: second_route.name().to_owned(),
        transfer_stop: option.transfer_stop.clone(),
        first_bus: bus_departing_at(network, option.first_route, day_type, first_time),
        second_bus: bus_departing_at(network, option.second_route, day_type, second_time),
        first_departure: first_time,
        transfer_arrival: (first_departure + first_leg).time(),
        second_departure: second_time,
        final_arrival: final_arrival.time(),
        suggested_arrival: suggested_arrival.time(),
        first_leg_minutes: option.first_leg_minutes,
        second_leg_minutes: option.second_leg_minutes,
        total_minutes: as_minutes(final_arrival.duration_since(first_departure)),
        buffers: TransferBuffers {
            boarding: BOARDING_BUFFER_MINUTES,
            transfer: TRANSFER_BUFFER_MINUTES,
            arrival: ARRIVAL_BUFFER_MINUTES,
        },
        first_leg_stops: first_route.ordered_stops(request.origin(), &option.transfer_stop),
        second_leg_stops: second_route.ordered_stops(&option.transfer_stop, request.destination()),
    })
}

fn bus_departing_at(
    network: &RouteNetwork,
    route_id: RouteIdx,
    day_type: DayType,
    time: Time,
) -> Option<String> {
    network
        .route(route_id)
        .departures(day_type)
        .into_iter()
        .find(|&(_, departure)| departure == time)
        .map(|(bus, _)| bus.name().to_owned())
}
