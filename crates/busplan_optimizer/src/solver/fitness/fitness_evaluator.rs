use tracing::warn;

use crate::{
    error::EvaluationError,
    problem::fleet_problem::FleetProblem,
    solver::{
        candidate::Candidate,
        score::{CandidateScore, FitnessMetrics, FitnessWeights},
    },
};

use super::{
    cost_objective::CostObjective,
    fitness_objective::{FitnessObjective, FitnessObjectiveType},
    peak_coverage_objective::PeakCoverageObjective,
    utilization_objective::UtilizationObjective,
    waiting_time_objective::WaitingTimeObjective,
};

pub struct FitnessEvaluator {
    weights: FitnessWeights,
    waiting_time: FitnessObjectiveType,
    utilization: FitnessObjectiveType,
    peak_coverage: FitnessObjectiveType,
    cost: FitnessObjectiveType,
}

impl FitnessEvaluator {
    pub fn new(weights: FitnessWeights) -> Self {
        FitnessEvaluator {
            weights,
            waiting_time: FitnessObjectiveType::WaitingTime(WaitingTimeObjective),
            utilization: FitnessObjectiveType::Utilization(UtilizationObjective),
            peak_coverage: FitnessObjectiveType::PeakCoverage(PeakCoverageObjective),
            cost: FitnessObjectiveType::Cost(CostObjective),
        }
    }

    pub fn weights(&self) -> &FitnessWeights {
        &self.weights
    }

    /// Scores every sub-metric. A failing sub-metric is logged and counted
    /// as zero so that one bad candidate never aborts a generation.
    pub fn evaluate(&self, problem: &FleetProblem, candidate: &Candidate) -> CandidateScore {
        let metrics = FitnessMetrics {
            waiting_time: self.evaluate_objective(&self.waiting_time, problem, candidate),
            utilization: self.evaluate_objective(&self.utilization, problem, candidate),
            peak_coverage: self.evaluate_objective(&self.peak_coverage, problem, candidate),
            cost: self.evaluate_objective(&self.cost, problem, candidate),
        };

        CandidateScore::new(metrics, &self.weights)
    }

    /// Evaluates the candidate in place unless it already carries a score.
    pub fn evaluate_candidate(&self, problem: &FleetProblem, candidate: &mut Candidate) {
        if !candidate.is_evaluated() {
            let score = self.evaluate(problem, candidate);
            candidate.set_score(score);
        }
    }

    fn evaluate_objective(
        &self,
        objective: &FitnessObjectiveType,
        problem: &FleetProblem,
        candidate: &Candidate,
    ) -> f64 {
        let result = objective
            .evaluate(problem, candidate)
            .and_then(|value| {
                if value.is_finite() {
                    Ok(value.clamp(0.0, 1.0))
                } else {
                    Err(EvaluationError::NonFinite(objective.objective_name()))
                }
            });

        match result {
            Ok(value) => value,
            Err(error) => {
                warn!(
                    objective = objective.objective_name(),
                    %error,
                    "Fitness evaluation failed, using a zero sub-score"
                );
                0.0
            }
        }
    }
}

impl Default for FitnessEvaluator {
    fn default() -> Self {
        FitnessEvaluator::new(FitnessWeights::default())
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        problem::fleet::CurrentFleet,
        test_utils::{self, TestRoute},
    };

    use super::*;

    #[test]
    fn test_failing_metrics_score_zero() {
        let problem = test_utils::create_test_problem(
            vec![
                TestRoute::new("A", &["X", "Y"]),
                TestRoute::new("B", &["Q", "R"]),
            ],
            None,
            vec![],
        );
        let candidate = Candidate::new(vec![Default::default()]);

        let score = FitnessEvaluator::default().evaluate(&problem, &candidate);

        assert_eq!(score.metrics, FitnessMetrics::ZERO);
        assert_eq!(score.fitness, 0.0);
    }

    #[test]
    fn test_evaluate_candidate() {
        let problem = test_utils::create_test_problem(
            vec![TestRoute::new("A", &["X", "Y"]).with_buses(1)],
            Some(CurrentFleet::from_sizes(vec![1])),
            vec![],
        );
        let mut candidate = Candidate::from_network(problem.network());

        FitnessEvaluator::default().evaluate_candidate(&problem, &mut candidate);

        // no requests, no departures, unchanged fleet
        let score = candidate.score().unwrap();
        assert_eq!(score.metrics.waiting_time, 0.0);
        assert_eq!(score.metrics.utilization, 0.0);
        assert_eq!(score.metrics.peak_coverage, 0.0);
        assert_eq!(score.metrics.cost, 1.0);
        assert!((score.fitness - 0.15).abs() < 1e-12);
    }
}
