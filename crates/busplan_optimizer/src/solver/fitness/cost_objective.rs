use crate::{
    error::EvaluationError, problem::fleet_problem::FleetProblem, solver::candidate::Candidate,
};

use super::fitness_objective::{FitnessObjective, ensure_route_count};

/// Cost charged per bus added or removed, relative to the larger fleet.
pub const FLEET_CHANGE_COST: f64 = 0.2;

/// Rewards staying close to the fleet currently in service.
pub struct CostObjective;

impl FitnessObjective for CostObjective {
    fn objective_name(&self) -> &'static str {
        "cost"
    }

    fn evaluate(
        &self,
        problem: &FleetProblem,
        candidate: &Candidate,
    ) -> Result<f64, EvaluationError> {
        ensure_route_count(problem, candidate)?;

        let mut change_cost = 0.0;
        let mut max_fleet = 0;

        for route_id in problem.route_ids() {
            let current = problem.current_fleet().size(route_id);
            let proposed = candidate.fleet_size(route_id);

            change_cost += current.abs_diff(proposed) as f64 * FLEET_CHANGE_COST;
            max_fleet += current.max(proposed);
        }

        if max_fleet == 0 {
            return Ok(0.0);
        }

        Ok(1.0 - change_cost / max_fleet as f64)
    }
}
