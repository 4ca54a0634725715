use super::{bus_route::RouteIdx, route_network::RouteNetwork, trip_request::TripRequest};

pub const HOURS_PER_DAY: usize = 24;
pub const PEAK_DEMAND_FACTOR: f64 = 1.2;

pub type HourlyDemand = [usize; HOURS_PER_DAY];

/// Requests per hour of the desired travel time, overall and per matched
/// route, plus the derived peak hours.
#[derive(Debug, Clone, PartialEq)]
pub struct DemandProfile {
    hourly_demand: HourlyDemand,
    peak_hours: [bool; HOURS_PER_DAY],
    route_demand: Vec<HourlyDemand>,
}

impl DemandProfile {
    pub fn empty(route_count: usize) -> Self {
        DemandProfile {
            hourly_demand: [0; HOURS_PER_DAY],
            peak_hours: [false; HOURS_PER_DAY],
            route_demand: vec![[0; HOURS_PER_DAY]; route_count],
        }
    }

    pub fn from_trip_requests(network: &RouteNetwork, requests: &[TripRequest]) -> Self {
        let mut profile = DemandProfile::empty(network.len());

        for request in requests {
            let hour = request.desired_hour();
            profile.hourly_demand[hour] += 1;

            if let Some(route_id) = network.find_route(request.origin(), request.destination()) {
                profile.route_demand[route_id.get()][hour] += 1;
            }
        }

        profile.peak_hours = Self::compute_peak_hours(&profile.hourly_demand);
        profile
    }

    /// Hours whose demand exceeds the mean demand of the hours that saw any
    /// request by more than [`PEAK_DEMAND_FACTOR`].
    fn compute_peak_hours(hourly_demand: &HourlyDemand) -> [bool; HOURS_PER_DAY] {
        let mut peak_hours = [false; HOURS_PER_DAY];

        let active_hours = hourly_demand.iter().filter(|&&count| count > 0).count();
        if active_hours == 0 {
            return peak_hours;
        }

        let total = hourly_demand.iter().sum::<usize>() as f64;
        let mean = total / active_hours as f64;

        for (hour, &count) in hourly_demand.iter().enumerate() {
            peak_hours[hour] = count as f64 > mean * PEAK_DEMAND_FACTOR;
        }

        peak_hours
    }

    pub fn hourly_demand(&self) -> &HourlyDemand {
        &self.hourly_demand
    }

    pub fn total_requests(&self) -> usize {
        self.hourly_demand.iter().sum()
    }

    #[inline]
    pub fn is_peak_hour(&self, hour: usize) -> bool {
        self.peak_hours.get(hour).copied().unwrap_or(false)
    }

    pub fn peak_hours(&self) -> impl Iterator<Item = usize> + '_ {
        self.peak_hours
            .iter()
            .enumerate()
            .filter(|(_, is_peak)| **is_peak)
            .map(|(hour, _)| hour)
    }

    pub fn peak_hour_count(&self) -> usize {
        self.peak_hours.iter().filter(|is_peak| **is_peak).count()
    }

    pub fn route_demand(&self, route_id: RouteIdx) -> &HourlyDemand {
        &self.route_demand[route_id.get()]
    }

    #[inline]
    pub fn route_hour_demand(&self, route_id: RouteIdx, hour: usize) -> usize {
        self.route_demand
            .get(route_id.get())
            .and_then(|demand| demand.get(hour))
            .copied()
            .unwrap_or(0)
    }

    pub fn peak_route_demand(&self, route_id: RouteIdx) -> usize {
        self.route_demand
            .get(route_id.get())
            .and_then(|demand| demand.iter().max())
            .copied()
            .unwrap_or(0)
    }

    /// Hourly demand relative to the busiest hour, rounded to two decimals.
    pub fn normalized_hourly_demand(&self) -> [f64; HOURS_PER_DAY] {
        let max = self.hourly_demand.iter().copied().max().unwrap_or(0).max(1) as f64;

        self.hourly_demand
            .map(|count| (count as f64 / max * 100.0).round() / 100.0)
    }
}

/// Longer-term travel patterns: requests per hour, per weekday and per route.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoricalPatterns {
    pub daily_patterns: HourlyDemand,
    /// Indexed from Monday = 0.
    pub weekly_patterns: [usize; 7],
    pub route_popularity: Vec<usize>,
}

impl HistoricalPatterns {
    pub fn from_trip_requests(network: &RouteNetwork, requests: &[TripRequest]) -> Self {
        let mut patterns = HistoricalPatterns {
            daily_patterns: [0; HOURS_PER_DAY],
            weekly_patterns: [0; 7],
            route_popularity: vec![0; network.len()],
        };

        for request in requests {
            patterns.daily_patterns[request.desired_hour()] += 1;

            let weekday = request.desired_time().weekday().to_monday_zero_offset() as usize;
            patterns.weekly_patterns[weekday] += 1;

            if let Some(route_id) = network.find_route(request.origin(), request.destination()) {
                patterns.route_popularity[route_id.get()] += 1;
            }
        }

        patterns
    }
}

#[cfg(test)]
mod tests {
    use crate::test_utils::{self, TestRoute};

    use super::*;

    #[test]
    fn test_empty_history_has_no_peak_hours() {
        let network = test_utils::create_test_network(vec![TestRoute::new("A", &["X", "Y"])]);
        let profile = DemandProfile::from_trip_requests(&network, &[]);

        assert_eq!(profile.peak_hour_count(), 0);
        assert_eq!(profile.total_requests(), 0);
        assert_eq!(profile.peak_route_demand(RouteIdx::new(0)), 0);
        assert_eq!(profile.normalized_hourly_demand(), [0.0; HOURS_PER_DAY]);
    }

    #[test]
    fn test_peak_hours_and_route_demand() {
        let network = test_utils::create_test_network(vec![
            TestRoute::new("A", &["X", "Y", "Z"]),
            TestRoute::new("B", &["Q", "R"]),
        ]);

        let mut requests = Vec::new();
        requests.extend(test_utils::create_trip_requests(8, 10, "X", "Z"));
        requests.extend(test_utils::create_trip_requests(12, 2, "Q", "R"));
        requests.extend(test_utils::create_trip_requests(17, 3, "X", "Y"));
        requests.extend(test_utils::create_trip_requests(17, 1, "X", "R"));

        let profile = DemandProfile::from_trip_requests(&network, &requests);

        // mean over active hours = 16 / 3, peak threshold = 6.4
        assert_eq!(profile.peak_hours().collect::<Vec<_>>(), vec![8]);
        assert!(profile.is_peak_hour(8));
        assert!(!profile.is_peak_hour(17));
        assert!(!profile.is_peak_hour(42));

        assert_eq!(profile.hourly_demand()[17], 4);
        assert_eq!(profile.route_hour_demand(RouteIdx::new(0), 8), 10);
        assert_eq!(profile.route_hour_demand(RouteIdx::new(0), 17), 3);
        assert_eq!(profile.route_hour_demand(RouteIdx::new(1), 17), 0);
        assert_eq!(profile.peak_route_demand(RouteIdx::new(0)), 10);
        assert_eq!(profile.peak_route_demand(RouteIdx::new(1)), 2);

        let normalized = profile.normalized_hourly_demand();
        assert_eq!(normalized[8], 1.0);
        assert_eq!(normalized[12], 0.2);
        assert_eq!(normalized[17], 0.4);
    }

    #[test]
    fn test_historical_patterns() {
        let network = test_utils::create_test_network(vec![
            TestRoute::new("A", &["X", "Y", "Z"]),
            TestRoute::new("B", &["Q", "R"]),
        ]);

        // 2025-06-10 is a Tuesday
        let requests = test_utils::create_trip_requests(8, 3, "X", "Z");
        let patterns = HistoricalPatterns::from_trip_requests(&network, &requests);

        assert_eq!(patterns.daily_patterns[8], 3);
        assert_eq!(patterns.weekly_patterns[1], 3);
        assert_eq!(patterns.route_popularity, vec![3, 0]);
    }
}
