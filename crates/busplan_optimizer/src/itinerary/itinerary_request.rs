use jiff::civil::{Date, DateTime, Time};

use crate::problem::{day_type::DayType, trip_request::TripRequest};

#[derive(Debug, Clone, PartialEq)]
pub struct ItineraryRequest {
    desired_arrival: DateTime,
    origin: String,
    destination: String,
}

impl ItineraryRequest {
    pub fn new(
        desired_arrival: DateTime,
        origin: impl Into<String>,
        destination: impl Into<String>,
    ) -> Self {
        ItineraryRequest {
            desired_arrival,
            origin: origin.into().trim().to_owned(),
            destination: destination.into().trim().to_owned(),
        }
    }

    pub fn desired_arrival(&self) -> DateTime {
        self.desired_arrival
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// Timetable that applies on the travel date.
    pub fn day_type(&self) -> DayType {
        DayType::from_weekday(self.desired_arrival.weekday())
    }

    pub fn travel_date(&self) -> Date {
        self.desired_arrival.date()
    }

    /// A departure time on the travel date.
    pub fn on_travel_date(&self, time: Time) -> DateTime {
        self.travel_date().to_datetime(time)
    }
}

impl From<&TripRequest> for ItineraryRequest {
    fn from(request: &TripRequest) -> Self {
        ItineraryRequest::new(
            request.desired_time(),
            request.origin(),
            request.destination(),
        )
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::{date, time};

    use super::*;

    #[test]
    fn test_day_type_of_travel_date() {
        // 2025-06-13 is a Friday
        let request = ItineraryRequest::new(date(2025, 6, 13).at(8, 10, 0, 0), " X", "Z ");

        assert_eq!(request.day_type(), DayType::Friday);
        assert_eq!(request.origin(), "X");
        assert_eq!(request.destination(), "Z");
        assert_eq!(
            request.on_travel_date(time(7, 30, 0, 0)),
            date(2025, 6, 13).at(7, 30, 0, 0)
        );

        let request = ItineraryRequest::new(date(2025, 6, 15).at(8, 10, 0, 0), "X", "Z");
        assert_eq!(request.day_type(), DayType::Weekends);
    }
}
