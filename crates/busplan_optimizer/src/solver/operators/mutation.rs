use rand::Rng;

use crate::{
    problem::{bus_route::RouteIdx, fleet_problem::FleetProblem},
    solver::{candidate::Candidate, construction::construct_candidate::build_route_plan},
};

/// With probability `mutation_rate`, grows or shrinks the fleet of one
/// random route by a bus and regenerates its timetables. Fleets never drop
/// below one bus. Otherwise the candidate is returned unchanged.
pub fn mutate<R>(
    problem: &FleetProblem,
    candidate: &Candidate,
    mutation_rate: f64,
    rng: &mut R,
) -> Candidate
where
    R: Rng,
{
    if candidate.routes().is_empty() || !rng.random_bool(mutation_rate) {
        return candidate.clone();
    }

    let route_id = RouteIdx::new(rng.random_range(0..candidate.routes().len()));
    let fleet_size = candidate.fleet_size(route_id);

    let fleet_size = if rng.random_bool(0.5) {
        fleet_size + 1
    } else {
        fleet_size.saturating_sub(1).max(1)
    };

    let mut mutated = candidate.clone();
    mutated.set_route(route_id, build_route_plan(problem, route_id, fleet_size));
    mutated
}
