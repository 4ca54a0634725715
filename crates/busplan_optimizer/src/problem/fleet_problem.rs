use crate::error::ProblemError;

use super::{
    bus_route::RouteIdx, demand::DemandProfile, fleet::CurrentFleet, route_network::RouteNetwork,
    trip_request::TripRequest,
};

/// Input snapshot of one optimization run. Built once and never mutated
/// while the search is running.
#[derive(Debug, Clone)]
pub struct FleetProblem {
    network: RouteNetwork,
    current_fleet: CurrentFleet,
    trip_requests: Vec<TripRequest>,
    demand: DemandProfile,
    /// Route serving each trip request, resolved once with `find_route`.
    request_routes: Vec<Option<RouteIdx>>,
}

impl FleetProblem {
    pub fn network(&self) -> &RouteNetwork {
        &self.network
    }

    pub fn current_fleet(&self) -> &CurrentFleet {
        &self.current_fleet
    }

    pub fn trip_requests(&self) -> &[TripRequest] {
        &self.trip_requests
    }

    pub fn demand(&self) -> &DemandProfile {
        &self.demand
    }

    #[inline]
    pub fn route_count(&self) -> usize {
        self.network.len()
    }

    pub fn route_ids(&self) -> impl Iterator<Item = RouteIdx> + use<> {
        self.network.route_ids()
    }

    /// Trip requests paired with the route that serves them, skipping
    /// requests no single route can serve.
    pub fn matched_requests(&self) -> impl Iterator<Item = (&TripRequest, RouteIdx)> {
        self.trip_requests
            .iter()
            .zip(self.request_routes.iter())
            .filter_map(|(request, route_id)| route_id.map(|route_id| (request, route_id)))
    }

    pub fn matched_request_count(&self) -> usize {
        self.request_routes.iter().flatten().count()
    }
}

#[derive(Default)]
pub struct FleetProblemBuilder {
    network: Option<RouteNetwork>,
    current_fleet: Option<CurrentFleet>,
    trip_requests: Option<Vec<TripRequest>>,
}

impl FleetProblemBuilder {
    pub fn set_network(&mut self, network: RouteNetwork) -> &mut FleetProblemBuilder {
        self.network = Some(network);
        self
    }

    pub fn set_current_fleet(&mut self, current_fleet: CurrentFleet) -> &mut FleetProblemBuilder {
        self.current_fleet = Some(current_fleet);
        self
    }

    pub fn set_trip_requests(
        &mut self,
        trip_requests: Vec<TripRequest>,
    ) -> &mut FleetProblemBuilder {
        self.trip_requests = Some(trip_requests);
        self
    }

    /// Fails when no network was given or the network has no routes. The
    /// current fleet defaults to the buses listed in the network.
    pub fn build(self) -> Result<FleetProblem, ProblemError> {
        let network = match self.network {
            Some(network) if !network.is_empty() => network,
            _ => return Err(ProblemError::EmptyNetwork),
        };

        let current_fleet = self
            .current_fleet
            .unwrap_or_else(|| CurrentFleet::from_network(&network));
        let trip_requests = self.trip_requests.unwrap_or_default();

        let demand = DemandProfile::from_trip_requests(&network, &trip_requests);
        let request_routes = trip_requests
            .iter()
            .map(|request| network.find_route(request.origin(), request.destination()))
            .collect();

        Ok(FleetProblem {
            network,
            current_fleet,
            trip_requests,
            demand,
            request_routes,
        })
    }
}
