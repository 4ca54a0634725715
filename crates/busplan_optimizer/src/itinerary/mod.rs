pub mod direct;
pub mod itinerary_request;
pub mod itinerary_result;
pub mod planner;
pub mod transfer;

/// Minutes to board a bus, added to direct trips and taken off departures
/// for the suggested arrival at the stop.
pub const BOARDING_BUFFER_MINUTES: i64 = 10;
