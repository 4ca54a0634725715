use crate::{problem::fleet_problem::FleetProblem, timer_debug};

use super::{
    candidate::Candidate, construction::construct_candidate::construct_candidate,
    fitness::fitness_evaluator::FitnessEvaluator,
};

pub const MIN_ELITE_SIZE: usize = 2;
pub const ELITE_FRACTION_DIVISOR: usize = 10;

/// Number of top candidates carried unchanged into the next generation.
pub fn elite_size(population_size: usize) -> usize {
    MIN_ELITE_SIZE.max(population_size / ELITE_FRACTION_DIVISOR)
}

pub struct Population {
    candidates: Vec<Candidate>,
}

impl Population {
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Population { candidates }
    }

    /// Candidates built by the deterministic construction rule. They are all
    /// identical, diversity comes from the genetic operators.
    pub fn initial(problem: &FleetProblem, population_size: usize) -> Self {
        timer_debug!("Initial population", {
            let candidate = construct_candidate(problem);
            Population::new(vec![candidate; population_size])
        })
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Scores every candidate without a score, then sorts by descending
    /// fitness. Candidates with equal fitness keep their order.
    pub fn evaluate_and_rank(&mut self, problem: &FleetProblem, evaluator: &FitnessEvaluator) {
        for candidate in self.candidates.iter_mut() {
            evaluator.evaluate_candidate(problem, candidate);
        }

        self.candidates
            .sort_by(|a, b| b.fitness().total_cmp(&a.fitness()));
    }

    /// Best candidate, assuming the population is ranked.
    pub fn best(&self) -> Option<&Candidate> {
        self.candidates.first()
    }

    pub fn elites(&self, population_size: usize) -> &[Candidate] {
        let count = elite_size(population_size).min(self.candidates.len());
        &self.candidates[..count]
    }

    pub fn mean_fitness(&self) -> f64 {
        if self.candidates.is_empty() {
            return 0.0;
        }

        self.candidates.iter().map(Candidate::fitness).sum::<f64>() / self.candidates.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        problem::bus_route::RouteIdx,
        solver::construction::construct_candidate::build_route_plan,
        test_utils::{self, TestRoute},
    };

    use super::*;

    #[test]
    fn test_elite_size() {
        assert_eq!(elite_size(1), 2);
        assert_eq!(elite_size(19), 2);
        assert_eq!(elite_size(50), 5);
        assert_eq!(elite_size(125), 12);
    }

    #[test]
    fn test_evaluate_and_rank() {
        let problem = test_utils::create_test_problem(
            vec![TestRoute::new("A", &["X", "Y"]).with_buses(2)],
            None,
            vec![],
        );

        // utilization is the same for every fleet, cost favors the current two buses
        let mut population = Population::new(
            [5, 2, 1]
                .into_iter()
                .map(|fleet_size| {
                    Candidate::new(vec![build_route_plan(&problem, RouteIdx::new(0), fleet_size)])
                })
                .collect(),
        );

        population.evaluate_and_rank(&problem, &FitnessEvaluator::default());

        let fleets = population
            .candidates()
            .iter()
            .map(|candidate| candidate.fleet_size(RouteIdx::new(0)))
            .collect::<Vec<_>>();
        assert_eq!(fleets, vec![2, 1, 5]);
        assert_eq!(population.elites(3).len(), 2);
        let best_fitness = population.best().map_or(0.0, Candidate::fitness);
        assert!((best_fitness - 0.4).abs() < 1e-12);
        assert!(population.mean_fitness() > 0.0);
    }
}
