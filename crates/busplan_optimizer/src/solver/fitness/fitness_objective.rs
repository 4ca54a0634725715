use crate::{
    error::EvaluationError,
    problem::fleet_problem::FleetProblem,
    solver::candidate::Candidate,
};

use super::{
    cost_objective::CostObjective, peak_coverage_objective::PeakCoverageObjective,
    utilization_objective::UtilizationObjective, waiting_time_objective::WaitingTimeObjective,
};

pub trait FitnessObjective {
    fn objective_name(&self) -> &'static str;

    /// Sub-score in `[0, 1]`, higher is better.
    fn evaluate(&self, problem: &FleetProblem, candidate: &Candidate)
    -> Result<f64, EvaluationError>;
}

pub enum FitnessObjectiveType {
    WaitingTime(WaitingTimeObjective),
    Utilization(UtilizationObjective),
    PeakCoverage(PeakCoverageObjective),
    Cost(CostObjective),
}

impl FitnessObjective for FitnessObjectiveType {
    fn objective_name(&self) -> &'static str {
        match self {
            Self::WaitingTime(objective) => objective.objective_name(),
            Self::Utilization(objective) => objective.objective_name(),
            Self::PeakCoverage(objective) => objective.objective_name(),
            Self::Cost(objective) => objective.objective_name(),
        }
    }

    fn evaluate(
        &self,
        problem: &FleetProblem,
        candidate: &Candidate,
    ) -> Result<f64, EvaluationError> {
        match self {
            Self::WaitingTime(objective) => objective.evaluate(problem, candidate),
            Self::Utilization(objective) => objective.evaluate(problem, candidate),
            Self::PeakCoverage(objective) => objective.evaluate(problem, candidate),
            Self::Cost(objective) => objective.evaluate(problem, candidate),
        }
    }
}

/// Every objective reads route plans by route index, so a candidate built
/// for another network cannot be scored.
pub fn ensure_route_count(
    problem: &FleetProblem,
    candidate: &Candidate,
) -> Result<(), EvaluationError> {
    if candidate.routes().len() == problem.route_count() {
        Ok(())
    } else {
        Err(EvaluationError::RouteCountMismatch {
            expected: problem.route_count(),
            actual: candidate.routes().len(),
        })
    }
}

/// Mean of per-route ratios, zero for an empty network.
pub fn average(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), value| {
        (sum + value, count + 1)
    });

    if count == 0 { 0.0 } else { sum / count as f64 }
}
