use jiff::civil::{Time, time};

use crate::problem::{bus_route::RouteIdx, demand::DemandProfile, timetable::Timetable};

pub const FIRST_SERVICE_HOUR: usize = 5;
pub const LAST_SERVICE_HOUR: usize = 22;

pub const PEAK_HEADWAY_MINUTES: usize = 15;
pub const OFF_PEAK_HEADWAY_MINUTES: usize = 30;
pub const MIN_HEADWAY_MINUTES: usize = 10;

/// Route-hour demand at which the base headway is kept unchanged.
pub const DEMAND_PER_FACTOR: f64 = 50.0;
pub const MAX_DEMAND_FACTOR: f64 = 2.0;

/// Minutes between two departures in an hour with the given peak flag and
/// route demand.
pub fn headway_minutes(is_peak_hour: bool, route_demand: usize) -> usize {
    let base_headway = if is_peak_hour {
        PEAK_HEADWAY_MINUTES
    } else {
        OFF_PEAK_HEADWAY_MINUTES
    };

    if route_demand == 0 {
        return base_headway;
    }

    let demand_factor = (route_demand as f64 / DEMAND_PER_FACTOR).min(MAX_DEMAND_FACTOR);
    let headway = (base_headway as f64 / demand_factor).round() as usize;

    headway.max(MIN_HEADWAY_MINUTES)
}

/// Departures of one operating day for a route, sorted ascending. Every
/// service hour starts with a departure on the hour, followed by one every
/// headway until the hour is over.
pub fn generate_departures(demand: &DemandProfile, route_id: RouteIdx) -> Vec<Time> {
    let mut departures = Vec::new();

    for hour in FIRST_SERVICE_HOUR..=LAST_SERVICE_HOUR {
        let headway = headway_minutes(
            demand.is_peak_hour(hour),
            demand.route_hour_demand(route_id, hour),
        );

        departures.extend(
            (0..60)
                .step_by(headway)
                .map(|minute| time(hour as i8, minute as i8, 0, 0)),
        );
    }

    departures.sort_unstable();
    departures
}

/// Demand is not split by day type, so every day type gets the same
/// departures.
pub fn generate_timetable(demand: &DemandProfile, route_id: RouteIdx) -> Timetable {
    Timetable::uniform(generate_departures(demand, route_id))
}

#[cfg(test)]
mod tests {
    use crate::{
        problem::day_type::DayType,
        test_utils::{self, TestRoute},
    };

    use super::*;

    #[test]
    fn test_headway() {
        assert_eq!(headway_minutes(false, 0), 30);
        assert_eq!(headway_minutes(true, 0), 15);
        assert_eq!(headway_minutes(false, 50), 30);
        assert_eq!(headway_minutes(false, 75), 20);
        assert_eq!(headway_minutes(true, 75), 10);
        assert_eq!(headway_minutes(false, 500), 15);
        assert_eq!(headway_minutes(true, 500), 10);
        // a trickle of demand stretches the headway past the hour
        assert_eq!(headway_minutes(false, 1), 1500);
    }

    #[test]
    fn test_unbiased_departures() {
        let network = test_utils::create_test_network(vec![TestRoute::new("A", &["X", "Y"])]);
        let demand = DemandProfile::from_trip_requests(&network, &[]);

        let departures = generate_departures(&demand, RouteIdx::new(0));

        assert_eq!(departures.len(), 18 * 2);
        assert_eq!(departures.first(), Some(&time(5, 0, 0, 0)));
        assert_eq!(departures.last(), Some(&time(22, 30, 0, 0)));
    }

    #[test]
    fn test_departures_sorted_within_service_hours() {
        let network = test_utils::create_test_network(vec![
            TestRoute::new("A", &["X", "Y", "Z"]),
            TestRoute::new("B", &["Q", "R"]),
        ]);

        let mut requests = test_utils::create_trip_requests(8, 80, "X", "Z");
        requests.extend(test_utils::create_trip_requests(12, 5, "Q", "R"));
        requests.extend(test_utils::create_trip_requests(3, 5, "Q", "R"));
        let demand = DemandProfile::from_trip_requests(&network, &requests);

        for route_id in network.route_ids() {
            let departures = generate_departures(&demand, route_id);

            assert!(departures.windows(2).all(|pair| pair[0] < pair[1]));
            assert!(departures.iter().all(|departure| {
                (FIRST_SERVICE_HOUR..=LAST_SERVICE_HOUR).contains(&(departure.hour() as usize))
            }));
        }

        // peak hour 8 with demand 80: factor 1.6, headway round(15 / 1.6) = 9 -> 10
        let route_a = generate_departures(&demand, RouteIdx::new(0));
        assert_eq!(
            route_a.iter().filter(|departure| departure.hour() == 8).count(),
            6
        );

        let timetable = generate_timetable(&demand, RouteIdx::new(0));
        assert_eq!(timetable.departures(DayType::Friday), route_a.as_slice());
    }
}
