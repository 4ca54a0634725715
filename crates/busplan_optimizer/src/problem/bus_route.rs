use fxhash::FxHashSet;
use jiff::civil::Time;

use crate::define_index_newtype;

use super::{day_type::DayType, timetable::Timetable, travel_time::travel_time};

define_index_newtype!(RouteIdx, BusRoute);

#[derive(Debug, Clone, PartialEq)]
pub struct Bus {
    name: String,
    timetable: Timetable,
}

impl Bus {
    pub fn new(name: impl Into<String>, timetable: Timetable) -> Self {
        Bus {
            name: name.into(),
            timetable,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn timetable(&self) -> &Timetable {
        &self.timetable
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BusRoute {
    name: String,
    stops: Vec<String>,
    buses: Vec<Bus>,
}

impl BusRoute {
    /// Stop names are trimmed so lookups compare them case-sensitively
    /// without surrounding whitespace.
    pub fn new(name: impl Into<String>, stops: Vec<String>, buses: Vec<Bus>) -> Self {
        BusRoute {
            name: name.into(),
            stops: stops.into_iter().map(|stop| stop.trim().to_owned()).collect(),
            buses,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stops(&self) -> &[String] {
        &self.stops
    }

    pub fn buses(&self) -> &[Bus] {
        &self.buses
    }

    pub fn contains_stop(&self, stop: &str) -> bool {
        self.stop_index(stop).is_some()
    }

    /// Index of the first occurrence of `stop`.
    pub fn stop_index(&self, stop: &str) -> Option<usize> {
        let stop = stop.trim();
        self.stops.iter().position(|candidate| candidate == stop)
    }

    /// Travel time estimate in minutes between two stops of this route.
    pub fn travel_time_between(&self, start: &str, end: &str) -> Option<f64> {
        let start_index = self.stop_index(start)?;
        let end_index = self.stop_index(end)?;

        Some(travel_time(start_index, end_index, self.stops.len()))
    }

    /// Walks the stops from `start` in route order, wrapping past the end of
    /// the sequence, until `end` is reached or every position was visited
    /// once. Repeated stop names are only reported the first time.
    pub fn ordered_stops(&self, start: &str, end: &str) -> Vec<String> {
        let (Some(start_index), Some(_)) = (self.stop_index(start), self.stop_index(end)) else {
            return vec![];
        };

        let end = end.trim();
        let mut seen = FxHashSet::default();
        let mut visited = Vec::new();
        let mut current_index = start_index;

        loop {
            let current_stop = &self.stops[current_index];
            if seen.insert(current_stop.as_str()) {
                visited.push(current_stop.clone());
            }

            if current_stop == end {
                break;
            }

            current_index = (current_index + 1) % self.stops.len();

            if current_index == start_index {
                break;
            }
        }

        visited
    }

    /// Every departure of every bus on `day_type`, sorted by time then bus.
    pub fn departures(&self, day_type: DayType) -> Vec<(&Bus, Time)> {
        let mut departures = self
            .buses
            .iter()
            .flat_map(|bus| {
                bus.timetable
                    .departures(day_type)
                    .iter()
                    .map(move |&time| (bus, time))
            })
            .collect::<Vec<_>>();

        departures.sort_by_key(|&(_, time)| time);
        departures
    }

    /// Sorted distinct departure times of the route on `day_type`.
    pub fn departure_times(&self, day_type: DayType) -> Vec<Time> {
        let mut times = self
            .buses
            .iter()
            .flat_map(|bus| bus.timetable.departures(day_type).iter().copied())
            .collect::<Vec<_>>();

        times.sort_unstable();
        times.dedup();
        times
    }

    pub fn first_and_last_departure(&self, day_type: DayType) -> Option<(Time, Time)> {
        let times = self.departure_times(day_type);

        Some((*times.first()?, *times.last()?))
    }
}
