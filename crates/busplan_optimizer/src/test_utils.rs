use jiff::civil::{DateTime, date};
use rand::RngCore;

use crate::{
    parse_hh_mm,
    problem::{
        bus_route::{Bus, BusRoute},
        day_type::DayType,
        fleet::CurrentFleet,
        fleet_problem::{FleetProblem, FleetProblemBuilder},
        route_network::RouteNetwork,
        timetable::Timetable,
        trip_request::TripRequest,
    },
};

pub struct TestRoute {
    name: String,
    stops: Vec<String>,
    buses: Vec<(String, Timetable)>,
}

impl TestRoute {
    pub fn new(name: &str, stops: &[&str]) -> Self {
        TestRoute {
            name: name.to_owned(),
            stops: stops.iter().map(|stop| stop.to_string()).collect(),
            buses: vec![],
        }
    }

    /// Adds `count` buses with empty timetables.
    pub fn with_buses(mut self, count: usize) -> Self {
        let start = self.buses.len();
        for index in start..start + count {
            self.buses
                .push((format!("Bus {}", index + 1), Timetable::new()));
        }
        self
    }

    /// Sets the departures of `bus` on `day_type`, adding the bus if needed.
    pub fn with_bus_departures(mut self, bus: &str, day_type: DayType, times: &[&str]) -> Self {
        let departures = times.iter().map(|time| parse_hh_mm(time).unwrap()).collect();

        match self.buses.iter_mut().find(|(name, _)| name == bus) {
            Some((_, timetable)) => timetable.set_departures(day_type, departures),
            None => self.buses.push((
                bus.to_owned(),
                Timetable::new().with_departures(day_type, departures),
            )),
        }

        self
    }

    fn into_route(self) -> BusRoute {
        BusRoute::new(
            self.name,
            self.stops,
            self.buses
                .into_iter()
                .map(|(name, timetable)| Bus::new(name, timetable))
                .collect(),
        )
    }
}

pub fn create_test_network(routes: Vec<TestRoute>) -> RouteNetwork {
    RouteNetwork::new(routes.into_iter().map(TestRoute::into_route).collect()).unwrap()
}

/// Requests are made on Tuesday 2025-06-10.
pub fn request_date_at(hour: i8, minute: i8) -> DateTime {
    date(2025, 6, 10).at(hour, minute, 0, 0)
}

pub fn create_trip_request(hour: i8, minute: i8, origin: &str, destination: &str) -> TripRequest {
    TripRequest::new(
        request_date_at(hour, minute),
        origin,
        destination,
        date(2025, 6, 1).at(9, 0, 0, 0),
    )
}

/// `count` requests spread over the minutes of `hour`.
pub fn create_trip_requests(
    hour: i8,
    count: usize,
    origin: &str,
    destination: &str,
) -> Vec<TripRequest> {
    (0..count)
        .map(|index| create_trip_request(hour, (index % 60) as i8, origin, destination))
        .collect()
}

pub fn create_test_problem(
    routes: Vec<TestRoute>,
    current_fleet: Option<CurrentFleet>,
    trip_requests: Vec<TripRequest>,
) -> FleetProblem {
    let mut builder = FleetProblemBuilder::default();

    builder.set_network(create_test_network(routes));
    builder.set_trip_requests(trip_requests);
    if let Some(current_fleet) = current_fleet {
        builder.set_current_fleet(current_fleet);
    }

    builder.build().unwrap()
}

pub struct MockRng {
    data: Vec<u64>,
    index: usize,
}

impl MockRng {
    pub fn new(data: Vec<u64>) -> Self {
        MockRng { data, index: 0 }
    }
}

impl RngCore for MockRng {
    fn next_u32(&mut self) -> u32 {
        self.next_u64() as u32
    }

    fn next_u64(&mut self) -> u64 {
        let value = self.data[self.index % self.data.len()];
        self.index = (self.index + 1) % self.data.len();
        value
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for byte in dst.iter_mut() {
            *byte = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::*;

    #[test]
    fn test_mock_rng() {
        let data = vec![1, 2, 3, 4];
        let mut rng = MockRng::new(data.clone());

        for &expected in data.iter().cycle().take(8) {
            assert_eq!(rng.next_u64(), expected);
        }
    }

    #[test]
    fn test_random_bool() {
        let mut rng = MockRng::new(vec![u64::MAX / 4, 0, u64::MAX]);

        assert!(!rng.random_bool(0.20));
        assert!(rng.random_bool(0.5));
        assert!(!rng.random_bool(0.5));
    }
}
