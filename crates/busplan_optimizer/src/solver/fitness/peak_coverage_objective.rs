use crate::{
    error::EvaluationError,
    problem::{demand::DemandProfile, fleet_problem::FleetProblem},
    solver::candidate::{Candidate, RoutePlan},
};

use super::fitness_objective::{FitnessObjective, average, ensure_route_count};

/// Departures expected in each peak hour.
pub const EXPECTED_TRIPS_PER_PEAK_HOUR: usize = 4;

pub struct PeakCoverageObjective;

impl FitnessObjective for PeakCoverageObjective {
    fn objective_name(&self) -> &'static str {
        "peak_coverage"
    }

    fn evaluate(
        &self,
        problem: &FleetProblem,
        candidate: &Candidate,
    ) -> Result<f64, EvaluationError> {
        ensure_route_count(problem, candidate)?;

        let demand = problem.demand();
        let peak_slots = demand.peak_hour_count() * EXPECTED_TRIPS_PER_PEAK_HOUR;
        if peak_slots == 0 {
            return Ok(0.0);
        }

        Ok(average(candidate.routes().iter().map(|route_plan| {
            (peak_trip_count(demand, route_plan) as f64 / peak_slots as f64).min(1.0)
        })))
    }
}

fn peak_trip_count(demand: &DemandProfile, route_plan: &RoutePlan) -> usize {
    route_plan
        .departures()
        .filter(|departure| demand.is_peak_hour(departure.hour() as usize))
        .count()
}
