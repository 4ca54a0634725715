use std::sync::{Arc, atomic::AtomicBool};

use parking_lot::RwLock;
use rand::{Rng, SeedableRng, rngs::SmallRng};
use schemars::JsonSchema;
use serde::Serialize;

use crate::{
    error::{ProblemError, SearchError},
    problem::fleet_problem::FleetProblem,
};

use super::{
    evolutionary_search::EvolutionarySearch, optimization_result::OptimizationResult,
    solver_params::SolverParams, statistics::GenerationStatistics,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, JsonSchema)]
pub enum SolverStatus {
    Pending,
    Running,
    Completed,
}

pub struct Solver {
    search: EvolutionarySearch,
    seed: u64,
    status: RwLock<SolverStatus>,
}

impl Solver {
    pub fn new(problem: FleetProblem, params: SolverParams) -> Result<Self, ProblemError> {
        let seed = params.seed;
        let search = EvolutionarySearch::new(params, Arc::new(problem))?;

        Ok(Solver {
            status: RwLock::new(SolverStatus::Pending),
            search,
            seed,
        })
    }

    pub fn on_generation<F>(&mut self, callback: F)
    where
        F: FnMut(&GenerationStatistics) + Send + Sync + 'static,
    {
        self.search.on_generation(callback);
    }

    /// Runs the search with a generator seeded from the solver params.
    pub fn solve(&self) -> Result<OptimizationResult, SearchError> {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        self.solve_with_rng(&mut rng)
    }

    pub fn solve_with_rng<R>(&self, rng: &mut R) -> Result<OptimizationResult, SearchError>
    where
        R: Rng,
    {
        *self.status.write() = SolverStatus::Running;
        let outcome = self.search.run(rng);
        *self.status.write() = SolverStatus::Completed;

        Ok(OptimizationResult::new(
            self.search.problem(),
            self.search.evaluator(),
            outcome?,
        ))
    }

    pub fn stop(&self) {
        self.search.stop();
        *self.status.write() = SolverStatus::Completed;
    }

    /// See [`EvolutionarySearch::stop_flag`].
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        self.search.stop_flag()
    }

    pub fn status(&self) -> SolverStatus {
        *self.status.read()
    }

    pub fn problem(&self) -> &FleetProblem {
        self.search.problem()
    }
}
