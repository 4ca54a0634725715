use busplan_optimizer::problem::{
    bus_route::{Bus, BusRoute},
    day_type::DayType,
    fleet::CurrentFleet,
    fleet_problem::{FleetProblem, FleetProblemBuilder},
    route_network::RouteNetwork,
    timetable::Timetable,
    trip_request::TripRequest,
};
use busplan_optimizer::parse_hh_mm;
use jiff::civil::{DateTime, date};

/// Route whose buses run the same departures every day type.
pub fn create_route(name: &str, stops: &[&str], buses: &[(&str, &[&str])]) -> BusRoute {
    BusRoute::new(
        name,
        stops.iter().map(|stop| stop.to_string()).collect(),
        buses
            .iter()
            .map(|(bus, departures)| {
                let departures = departures
                    .iter()
                    .map(|departure| parse_hh_mm(departure).unwrap())
                    .collect();
                Bus::new(*bus, Timetable::uniform(departures))
            })
            .collect(),
    )
}

/// Route whose single bus only runs on `day_type`.
pub fn create_day_route(
    name: &str,
    stops: &[&str],
    bus: &str,
    day_type: DayType,
    departures: &[&str],
) -> BusRoute {
    let departures = departures
        .iter()
        .map(|departure| parse_hh_mm(departure).unwrap())
        .collect();

    BusRoute::new(
        name,
        stops.iter().map(|stop| stop.to_string()).collect(),
        vec![Bus::new(
            bus,
            Timetable::new().with_departures(day_type, departures),
        )],
    )
}

pub fn create_network(routes: Vec<BusRoute>) -> RouteNetwork {
    RouteNetwork::new(routes).unwrap()
}

/// A Tuesday.
pub fn tuesday_at(hour: i8, minute: i8) -> DateTime {
    date(2025, 6, 10).at(hour, minute, 0, 0)
}

pub fn create_trip_requests(
    hour: i8,
    count: usize,
    origin: &str,
    destination: &str,
) -> Vec<TripRequest> {
    (0..count)
        .map(|index| {
            TripRequest::new(
                tuesday_at(hour, (index % 60) as i8),
                origin,
                destination,
                date(2025, 6, 1).at(9, 0, 0, 0),
            )
        })
        .collect()
}

pub fn create_test_problem(
    network: RouteNetwork,
    current_fleet: Option<CurrentFleet>,
    trip_requests: Vec<TripRequest>,
) -> FleetProblem {
    let mut builder = FleetProblemBuilder::default();

    if let Some(current_fleet) = current_fleet {
        builder.set_current_fleet(current_fleet);
    }

    builder.set_trip_requests(trip_requests);
    builder.set_network(network);

    builder.build().unwrap()
}

/// Three routes sharing stops, with demand concentrated in the morning.
pub fn create_city_problem() -> FleetProblem {
    let network = create_network(vec![
        create_route(
            "Blue",
            &["Station", "Market", "Hospital", "University"],
            &[("Blue 1", &["06:00", "07:00", "08:00"])],
        ),
        create_route(
            "Green",
            &["University", "Park", "Stadium"],
            &[("Green 1", &["07:15", "09:15"]), ("Green 2", &["12:00"])],
        ),
        create_route("Red", &["Harbor", "Market"], &[]),
    ]);

    let mut requests = create_trip_requests(8, 70, "Station", "University");
    requests.extend(create_trip_requests(17, 20, "University", "Stadium"));
    requests.extend(create_trip_requests(12, 5, "Harbor", "Market"));

    create_test_problem(network, None, requests)
}
