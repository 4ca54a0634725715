use tracing::debug;

use crate::problem::route_network::RouteNetwork;

use super::{
    direct::plan_direct,
    itinerary_request::ItineraryRequest,
    itinerary_result::{InfeasibleReason, ItineraryResult},
    transfer::{best_transfer_option, find_transfer_options, resolve_transfer},
};

/// Plans single trips against the timetables of a route network. A direct
/// route is always preferred, transfers are only considered without one.
pub struct ItineraryPlanner<'a> {
    network: &'a RouteNetwork,
}

impl<'a> ItineraryPlanner<'a> {
    pub fn new(network: &'a RouteNetwork) -> Self {
        ItineraryPlanner { network }
    }

    pub fn plan(&self, request: &ItineraryRequest) -> ItineraryResult {
        for stop in [request.origin(), request.destination()] {
            if !self.network.has_stop(stop) {
                return ItineraryResult::infeasible(
                    InfeasibleReason::UnknownStop {
                        stop: stop.to_owned(),
                    },
                    format!("Stop '{stop}' not found."),
                );
            }
        }

        if request.origin() == request.destination() {
            return ItineraryResult::infeasible(
                InfeasibleReason::SameStop,
                "Origin and destination are the same stop.",
            );
        }

        if let Some(route_id) = self
            .network
            .find_route(request.origin(), request.destination())
        {
            debug!(
                route = self.network.route(route_id).name(),
                "Planning direct itinerary"
            );
            return plan_direct(self.network, route_id, request);
        }

        let options = find_transfer_options(self.network, request.origin(), request.destination());
        debug!(options = options.len(), "Planning transfer itinerary");

        match best_transfer_option(&options) {
            Some(option) => resolve_transfer(self.network, option, request),
            None => ItineraryResult::infeasible(
                InfeasibleReason::NoConnection,
                "No direct or alternative routes found between these stops.",
            ),
        }
    }
}
