use std::collections::BTreeSet;

use fxhash::FxHashSet;

use crate::error::ProblemError;

use super::bus_route::{BusRoute, RouteIdx};

#[derive(Debug, Clone, PartialEq)]
pub struct RouteNetwork {
    routes: Vec<BusRoute>,
}

impl RouteNetwork {
    pub fn new(routes: Vec<BusRoute>) -> Result<Self, ProblemError> {
        let mut names = FxHashSet::default();

        for route in &routes {
            if route.stops().is_empty() {
                return Err(ProblemError::RouteWithoutStops(route.name().to_owned()));
            }

            if !names.insert(route.name()) {
                return Err(ProblemError::DuplicateRoute(route.name().to_owned()));
            }
        }

        Ok(RouteNetwork { routes })
    }

    pub fn routes(&self) -> &[BusRoute] {
        &self.routes
    }

    #[inline]
    pub fn route(&self, route_id: RouteIdx) -> &BusRoute {
        &self.routes[route_id]
    }

    pub fn route_ids(&self) -> impl Iterator<Item = RouteIdx> + use<> {
        (0..self.routes.len()).map(RouteIdx::new)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn route_by_name(&self, name: &str) -> Option<RouteIdx> {
        self.routes
            .iter()
            .position(|route| route.name() == name)
            .map(RouteIdx::new)
    }

    /// First route, in network order, serving both stops. Callers must not
    /// rely on which one is returned when several routes qualify.
    pub fn find_route(&self, start: &str, end: &str) -> Option<RouteIdx> {
        self.routes
            .iter()
            .position(|route| route.contains_stop(start) && route.contains_stop(end))
            .map(RouteIdx::new)
    }

    pub fn routes_with_stop<'a>(&'a self, stop: &'a str) -> impl Iterator<Item = RouteIdx> + 'a {
        self.routes
            .iter()
            .enumerate()
            .filter(move |(_, route)| route.contains_stop(stop))
            .map(|(index, _)| RouteIdx::new(index))
    }

    pub fn has_stop(&self, stop: &str) -> bool {
        self.routes.iter().any(|route| route.contains_stop(stop))
    }

    /// Every distinct stop name of the network, sorted.
    pub fn stop_names(&self) -> BTreeSet<&str> {
        self.routes
            .iter()
            .flat_map(|route| route.stops().iter().map(String::as_str))
            .collect()
    }

    pub fn ordered_stops(&self, route_id: RouteIdx, start: &str, end: &str) -> Vec<String> {
        self.route(route_id).ordered_stops(start, end)
    }

    pub fn travel_time_between(&self, route_id: RouteIdx, start: &str, end: &str) -> Option<f64> {
        self.route(route_id).travel_time_between(start, end)
    }
}
