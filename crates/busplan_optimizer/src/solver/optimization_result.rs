use std::collections::BTreeMap;

use jiff::civil::Time;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use crate::{
    problem::{day_type::DayType, fleet_problem::FleetProblem},
    utils::time::HourMinute,
};

use super::{
    candidate::{Candidate, RoutePlan},
    evolutionary_search::SearchOutcome,
    fitness::{fitness_evaluator::FitnessEvaluator, waiting_time_objective::average_wait_minutes},
    score::FitnessMetrics,
    statistics::GenerationStatistics,
};

#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusSchedule {
    #[serde_as(as = "Vec<HourMinute>")]
    pub weekdays: Vec<Time>,
    #[serde_as(as = "Vec<HourMinute>")]
    pub friday: Vec<Time>,
    #[serde_as(as = "Vec<HourMinute>")]
    pub weekends: Vec<Time>,
}

impl BusSchedule {
    pub fn departures(&self, day_type: DayType) -> &[Time] {
        match day_type {
            DayType::Weekdays => &self.weekdays,
            DayType::Friday => &self.friday,
            DayType::Weekends => &self.weekends,
        }
    }
}

/// How the timetables currently in service score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BaselinePerformance {
    pub fitness_score: f64,
    pub fitness_metrics: FitnessMetrics,
    /// Mean minutes between a matched request and its closest departure.
    pub average_wait_minutes: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizationResult {
    pub optimized_fleet: BTreeMap<String, usize>,
    pub optimized_schedules: BTreeMap<String, BTreeMap<String, BusSchedule>>,
    pub fitness_score: f64,
    pub fitness_metrics: FitnessMetrics,
    pub current_fleet: BTreeMap<String, usize>,
    pub hourly_demand: Vec<usize>,
    pub normalized_demand: Vec<f64>,
    pub peak_hours: Vec<usize>,
    pub baseline: BaselinePerformance,
    pub generations: usize,
    pub early_stopped: bool,
    pub statistics: Vec<GenerationStatistics>,
}

impl OptimizationResult {
    pub fn new(
        problem: &FleetProblem,
        evaluator: &FitnessEvaluator,
        outcome: SearchOutcome,
    ) -> Self {
        let network = problem.network();
        let best = &outcome.best;

        let mut optimized_fleet = BTreeMap::new();
        let mut optimized_schedules = BTreeMap::new();
        let mut current_fleet = BTreeMap::new();

        for route_id in problem.route_ids() {
            let name = network.route(route_id).name().to_owned();
            let route_plan = best.route(route_id);

            optimized_fleet.insert(name.clone(), route_plan.fleet_size());
            current_fleet.insert(name.clone(), problem.current_fleet().size(route_id));
            optimized_schedules.insert(name, route_schedules(route_plan));
        }

        let demand = problem.demand();

        OptimizationResult {
            optimized_fleet,
            optimized_schedules,
            fitness_score: best.fitness(),
            fitness_metrics: best.metrics(),
            current_fleet,
            hourly_demand: demand.hourly_demand().to_vec(),
            normalized_demand: demand.normalized_hourly_demand().to_vec(),
            peak_hours: demand.peak_hours().collect(),
            baseline: baseline_performance(problem, evaluator),
            generations: outcome.generations,
            early_stopped: outcome.early_stopped,
            statistics: outcome.statistics,
        }
    }

    /// Fleet change per route, positive when buses are added.
    pub fn fleet_changes(&self) -> BTreeMap<&str, i64> {
        self.optimized_fleet
            .iter()
            .map(|(route, &proposed)| {
                let current = self.current_fleet.get(route).copied().unwrap_or(0);
                (route.as_str(), proposed as i64 - current as i64)
            })
            .collect()
    }

    /// Fitness gained over the current fleet, negative when the search did worse.
    pub fn fitness_improvement(&self) -> f64 {
        self.fitness_score - self.baseline.fitness_score
    }
}

fn route_schedules(route_plan: &RoutePlan) -> BTreeMap<String, BusSchedule> {
    route_plan
        .buses()
        .iter()
        .map(|bus| {
            let timetable = bus.timetable();
            (
                bus.name().to_owned(),
                BusSchedule {
                    weekdays: timetable.departures(DayType::Weekdays).to_vec(),
                    friday: timetable.departures(DayType::Friday).to_vec(),
                    weekends: timetable.departures(DayType::Weekends).to_vec(),
                },
            )
        })
        .collect()
}

fn baseline_performance(
    problem: &FleetProblem,
    evaluator: &FitnessEvaluator,
) -> BaselinePerformance {
    let baseline = Candidate::from_network(problem.network());
    let score = evaluator.evaluate(problem, &baseline);

    BaselinePerformance {
        fitness_score: score.fitness,
        fitness_metrics: score.metrics,
        average_wait_minutes: average_wait_minutes(problem, &baseline),
    }
}
