use crate::{
    error::EvaluationError,
    problem::{day_type::DayType, fleet_problem::FleetProblem},
    solver::candidate::{Candidate, RoutePlan},
};

use super::fitness_objective::{FitnessObjective, average, ensure_route_count};

/// Trips a bus is expected to run per day type.
pub const EXPECTED_TRIPS_PER_BUS_DAY: usize = 6;

pub struct UtilizationObjective;

impl FitnessObjective for UtilizationObjective {
    fn objective_name(&self) -> &'static str {
        "utilization"
    }

    fn evaluate(
        &self,
        problem: &FleetProblem,
        candidate: &Candidate,
    ) -> Result<f64, EvaluationError> {
        ensure_route_count(problem, candidate)?;

        Ok(average(candidate.routes().iter().map(route_utilization)))
    }
}

fn route_utilization(route_plan: &RoutePlan) -> f64 {
    let max_trips = route_plan.fleet_size() * DayType::ALL.len() * EXPECTED_TRIPS_PER_BUS_DAY;
    if max_trips == 0 {
        return 0.0;
    }

    (route_plan.trip_count() as f64 / max_trips as f64).min(1.0)
}
