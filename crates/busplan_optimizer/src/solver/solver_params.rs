use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ProblemError;

use super::score::FitnessWeights;

pub const DEFAULT_SEED: u64 = 2_427_121;

#[derive(Clone, Debug)]
pub struct SolverParams {
    pub population_size: usize,
    pub mutation_rate: f64,
    pub crossover_probability: f64,
    pub terminations: Vec<Termination>,
    pub solver_selector: SolverSelectorStrategy,
    pub weights: FitnessWeights,
    pub seed: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Termination {
    /// Maximum number of generations.
    Generations(usize),
    /// Stop once the best fitness of a generation exceeds the threshold.
    Fitness(f64),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SolverSelectorStrategy {
    SelectRandom,
    BinaryTournament,
}

impl Default for SolverParams {
    fn default() -> Self {
        Self {
            population_size: 50,
            mutation_rate: 0.10,
            crossover_probability: 0.7,
            terminations: vec![Termination::Generations(30), Termination::Fitness(0.85)],
            solver_selector: SolverSelectorStrategy::SelectRandom,
            weights: FitnessWeights::default(),
            seed: DEFAULT_SEED,
        }
    }
}

impl SolverParams {
    pub fn max_generations(&self) -> usize {
        self.terminations
            .iter()
            .filter_map(|termination| match termination {
                Termination::Generations(generations) => Some(*generations),
                Termination::Fitness(_) => None,
            })
            .min()
            .unwrap_or(0)
    }

    pub fn fitness_threshold(&self) -> Option<f64> {
        self.terminations
            .iter()
            .filter_map(|termination| match termination {
                Termination::Fitness(threshold) => Some(*threshold),
                Termination::Generations(_) => None,
            })
            .min_by(f64::total_cmp)
    }

    pub fn validate(&self) -> Result<(), ProblemError> {
        if self.population_size == 0 {
            return Err(invalid("population_size", "must be at least 1"));
        }

        if self.max_generations() == 0 {
            return Err(invalid(
                "terminations",
                "a generation limit of at least 1 is required",
            ));
        }

        check_probability("mutation_rate", self.mutation_rate)?;
        check_probability("crossover_probability", self.crossover_probability)?;

        if let Some(threshold) = self.fitness_threshold() {
            check_probability("fitness_threshold", threshold)?;
        }

        for (name, weight) in self.weights.iter() {
            if !weight.is_finite() || weight < 0.0 {
                return Err(invalid(name, "weights must be non-negative"));
            }
        }

        if (self.weights.total() - 1.0).abs() > 1e-6 {
            return Err(invalid("weights", "weights must add up to 1"));
        }

        Ok(())
    }
}

fn invalid(name: &'static str, reason: &str) -> ProblemError {
    ProblemError::InvalidParameter {
        name,
        reason: reason.to_owned(),
    }
}

fn check_probability(name: &'static str, value: f64) -> Result<(), ProblemError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(name, &format!("{value} is not within [0, 1]")))
    }
}
