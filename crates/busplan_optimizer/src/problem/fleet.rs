use std::collections::BTreeMap;

use tracing::warn;

use super::{bus_route::RouteIdx, route_network::RouteNetwork};

/// Number of buses currently operating each route, indexed by route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentFleet {
    sizes: Vec<usize>,
}

impl CurrentFleet {
    /// Size assumed for a route with no recorded fleet.
    pub const DEFAULT_SIZE: usize = 1;

    /// Counts the buses assigned to each route of the network.
    pub fn from_network(network: &RouteNetwork) -> Self {
        CurrentFleet {
            sizes: network
                .routes()
                .iter()
                .map(|route| route.buses().len())
                .collect(),
        }
    }

    /// Builds the fleet from counts keyed by route name. Routes missing from
    /// `counts` get [`CurrentFleet::DEFAULT_SIZE`], names that match no
    /// route are ignored.
    pub fn from_counts(network: &RouteNetwork, counts: &BTreeMap<String, usize>) -> Self {
        for name in counts.keys() {
            if network.route_by_name(name).is_none() {
                warn!(route = %name, "Current fleet references an unknown route");
            }
        }

        CurrentFleet {
            sizes: network
                .routes()
                .iter()
                .map(|route| {
                    counts
                        .get(route.name())
                        .copied()
                        .unwrap_or(Self::DEFAULT_SIZE)
                })
                .collect(),
        }
    }

    pub fn from_sizes(sizes: Vec<usize>) -> Self {
        CurrentFleet { sizes }
    }

    #[inline]
    pub fn size(&self, route_id: RouteIdx) -> usize {
        self.sizes
            .get(route_id.get())
            .copied()
            .unwrap_or(Self::DEFAULT_SIZE)
    }

    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    pub fn total(&self) -> usize {
        self.sizes.iter().sum()
    }
}
