use jiff::civil::Time;

use crate::problem::{
    bus_route::RouteIdx, day_type::DayType, route_network::RouteNetwork, timetable::Timetable,
};

use super::score::{CandidateScore, FitnessMetrics};

#[derive(Debug, Clone, PartialEq)]
pub struct BusPlan {
    name: String,
    timetable: Timetable,
}

impl BusPlan {
    pub fn new(name: impl Into<String>, timetable: Timetable) -> Self {
        BusPlan {
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

/// Fleet and timetables proposed for one route. The fleet size is the
/// number of buses in the plan.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoutePlan {
    buses: Vec<BusPlan>,
}

impl RoutePlan {
    pub fn new(buses: Vec<BusPlan>) -> Self {
        RoutePlan { buses }
    }

    pub fn buses(&self) -> &[BusPlan] {
        &self.buses
    }

    #[inline]
    pub fn fleet_size(&self) -> usize {
        self.buses.len()
    }

    /// Departures of every bus on every day type.
    pub fn trip_count(&self) -> usize {
        self.buses.iter().map(|bus| bus.timetable.len()).sum()
    }

    pub fn departures(&self) -> impl Iterator<Item = Time> + '_ {
        self.buses
            .iter()
            .flat_map(|bus| bus.timetable.all_departures())
    }

    pub fn day_departures(&self, day_type: DayType) -> impl Iterator<Item = Time> + '_ {
        self.buses
            .iter()
            .flat_map(move |bus| bus.timetable.departures(day_type).iter().copied())
    }
}

/// One complete fleet and timetable proposal, one [`RoutePlan`] per route
/// of the network in network order.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    routes: Vec<RoutePlan>,
    score: Option<CandidateScore>,
}

impl Candidate {
    pub fn new(routes: Vec<RoutePlan>) -> Self {
        Candidate {
            routes,
            score: None,
        }
    }

    /// The timetables currently operated on the network.
    pub fn from_network(network: &RouteNetwork) -> Self {
        Candidate::new(
            network
                .routes()
                .iter()
                .map(|route| {
                    RoutePlan::new(
                        route
                            .buses()
                            .iter()
                            .map(|bus| BusPlan::new(bus.name(), bus.timetable().clone()))
                            .collect(),
                    )
                })
                .collect(),
        )
    }

    pub fn routes(&self) -> &[RoutePlan] {
        &self.routes
    }

    #[inline]
    pub fn route(&self, route_id: RouteIdx) -> &RoutePlan {
        &self.routes[route_id.get()]
    }

    pub fn fleet_size(&self, route_id: RouteIdx) -> usize {
        self.routes
            .get(route_id.get())
            .map_or(0, |route| route.fleet_size())
    }

    /// Replaces the plan of one route and drops any previous evaluation.
    pub fn set_route(&mut self, route_id: RouteIdx, plan: RoutePlan) {
        self.routes[route_id.get()] = plan;
        self.score = None;
    }

    pub fn score(&self) -> Option<&CandidateScore> {
        self.score.as_ref()
    }

    pub fn set_score(&mut self, score: CandidateScore) {
        self.score = Some(score);
    }

    pub fn is_evaluated(&self) -> bool {
        self.score.is_some()
    }

    /// Zero until the candidate is evaluated.
    #[inline]
    pub fn fitness(&self) -> f64 {
        self.score.map_or(0.0, |score| score.fitness)
    }

    pub fn metrics(&self) -> FitnessMetrics {
        self.score.map_or(FitnessMetrics::ZERO, |score| score.metrics)
    }

    pub fn has_same_plans(&self, other: &Candidate) -> bool {
        self.routes == other.routes
    }
}
