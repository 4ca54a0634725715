use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use parking_lot::Mutex;
use rand::Rng;
use tracing::{debug, info};

use crate::{
    error::{ProblemError, SearchError},
    problem::fleet_problem::FleetProblem,
    selector::{
        select_binary_tournament::BinaryTournamentSelector,
        select_random_selector::SelectRandomSelector, select_solution::SelectSolution,
        solution_selector::SolutionSelector,
    },
};

use super::{
    candidate::Candidate,
    fitness::fitness_evaluator::FitnessEvaluator,
    operators::{crossover::crossover, mutation::mutate},
    population::Population,
    solver_params::{SolverParams, SolverSelectorStrategy},
    statistics::GenerationStatistics,
};

type GenerationHandler = Arc<Mutex<dyn FnMut(&GenerationStatistics) + Send + Sync + 'static>>;

/// Best candidate of a finished search.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub best: Candidate,
    pub generations: usize,
    pub early_stopped: bool,
    pub statistics: Vec<GenerationStatistics>,
}

pub struct EvolutionarySearch {
    problem: Arc<FleetProblem>,
    params: SolverParams,
    evaluator: FitnessEvaluator,
    selector: SolutionSelector,
    on_generation_handler: Option<GenerationHandler>,
    is_stopped: Arc<AtomicBool>,
}

impl EvolutionarySearch {
    pub fn new(params: SolverParams, problem: Arc<FleetProblem>) -> Result<Self, ProblemError> {
        params.validate()?;

        Ok(EvolutionarySearch {
            problem,
            evaluator: FitnessEvaluator::new(params.weights),
            selector: match params.solver_selector {
                SolverSelectorStrategy::SelectRandom => {
                    SolutionSelector::SelectRandom(SelectRandomSelector)
                }
                SolverSelectorStrategy::BinaryTournament => {
                    SolutionSelector::BinaryTournament(BinaryTournamentSelector)
                }
            },
            params,
            on_generation_handler: None,
            is_stopped: Arc::new(AtomicBool::new(false)),
        })
    }

    pub fn problem(&self) -> &FleetProblem {
        &self.problem
    }

    pub fn evaluator(&self) -> &FitnessEvaluator {
        &self.evaluator
    }

    pub fn on_generation<F>(&mut self, callback: F)
    where
        F: FnMut(&GenerationStatistics) + Send + Sync + 'static,
    {
        self.on_generation_handler = Some(Arc::new(Mutex::new(callback)));
    }

    /// Requests the search to stop at the next generation boundary.
    pub fn stop(&self) {
        self.is_stopped.store(true, Ordering::Relaxed);
    }

    pub fn is_stopped(&self) -> bool {
        self.is_stopped.load(Ordering::Relaxed)
    }

    /// Shared stop flag, for stopping the search from a generation callback
    /// or another thread.
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.is_stopped)
    }

    /// Runs generations until the generation limit, the fitness threshold or
    /// a stop request. Returns the best candidate seen in any generation.
    pub fn run<R>(&self, rng: &mut R) -> Result<SearchOutcome, SearchError>
    where
        R: Rng,
    {
        let max_generations = self.params.max_generations();
        let fitness_threshold = self.params.fitness_threshold();

        info!(
            population_size = self.params.population_size,
            generations = max_generations,
            mutation_rate = self.params.mutation_rate,
            routes = self.problem.route_count(),
            trip_requests = self.problem.trip_requests().len(),
            "Starting fleet optimization"
        );

        let mut population = Population::initial(&self.problem, self.params.population_size);
        let mut best: Option<Candidate> = None;
        let mut statistics = Vec::with_capacity(max_generations);
        let mut early_stopped = false;

        for generation in 0..max_generations {
            if self.is_stopped() {
                info!(generation, "Optimization stopped");
                break;
            }

            population.evaluate_and_rank(&self.problem, &self.evaluator);

            let generation_best = population.best().ok_or(SearchError::EmptyPopulation)?;
            if best
                .as_ref()
                .is_none_or(|best| generation_best.fitness() > best.fitness())
            {
                best = Some(generation_best.clone());
            }

            let generation_statistics = GenerationStatistics {
                generation,
                best_fitness: generation_best.fitness(),
                mean_fitness: population.mean_fitness(),
                best_so_far: best.as_ref().map_or(0.0, Candidate::fitness),
            };

            debug!(
                generation,
                best_fitness = generation_statistics.best_fitness,
                mean_fitness = generation_statistics.mean_fitness,
                "Generation evaluated"
            );

            if let Some(handler) = &self.on_generation_handler {
                let mut callback = handler.lock();
                callback(&generation_statistics);
            }

            statistics.push(generation_statistics);

            if fitness_threshold
                .is_some_and(|threshold| generation_statistics.best_fitness > threshold)
            {
                info!(
                    generation,
                    fitness = generation_statistics.best_fitness,
                    "Fitness threshold reached"
                );
                early_stopped = true;
                break;
            }

            if generation + 1 < max_generations {
                population = self.next_generation(&population, rng)?;
            }
        }

        let Some(best) = best else {
            return Err(if self.is_stopped() {
                SearchError::Cancelled
            } else {
                SearchError::EmptyPopulation
            });
        };

        info!(
            fitness = best.fitness(),
            generations = statistics.len(),
            "Fleet optimization completed"
        );

        Ok(SearchOutcome {
            best,
            generations: statistics.len(),
            early_stopped,
            statistics,
        })
    }

    /// Elites survive unchanged. The rest of the population is filled with
    /// crossovers of two distinct elites or mutations of a single one.
    fn next_generation<R>(
        &self,
        population: &Population,
        rng: &mut R,
    ) -> Result<Population, SearchError>
    where
        R: Rng,
    {
        let population_size = self.params.population_size;
        let elites = population.elites(population_size);
        if elites.is_empty() {
            return Err(SearchError::EmptyPopulation);
        }

        let mut candidates = Vec::with_capacity(population_size);
        candidates.extend_from_slice(elites);

        while candidates.len() < population_size {
            let parents = if rng.random_bool(self.params.crossover_probability) {
                self.selector.select_parents(elites, rng)
            } else {
                None
            };

            let child = match parents {
                Some((parent1, parent2)) => crossover(parent1, parent2, rng),
                None => {
                    let parent = self
                        .selector
                        .select_solution(elites, rng)
                        .ok_or(SearchError::EmptyPopulation)?;
                    mutate(&self.problem, parent, self.params.mutation_rate, rng)
                }
            };

            candidates.push(child);
        }

        Ok(Population::new(candidates))
    }
}
