pub mod bus_route;
pub mod day_type;
pub mod demand;
pub mod fleet;
pub mod fleet_problem;
pub mod route_network;
pub mod timetable;
pub mod travel_time;
pub mod trip_request;
