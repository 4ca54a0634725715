use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use busplan_optimizer::{
    error::SearchError,
    problem::bus_route::RouteIdx,
    solver::{
        candidate::Candidate,
        construction::construct_candidate::construct_candidate,
        fitness::fitness_evaluator::FitnessEvaluator,
        operators::{crossover::crossover, mutation::mutate},
        solver::{Solver, SolverStatus},
        solver_params::{SolverParams, SolverSelectorStrategy, Termination},
    },
};
use rand::{SeedableRng, rngs::SmallRng};

use crate::mock_rng::MockRng;

mod setup;

fn small_params(generations: usize) -> SolverParams {
    SolverParams {
        population_size: 10,
        terminations: vec![
            Termination::Generations(generations),
            Termination::Fitness(0.99),
        ],
        ..SolverParams::default()
    }
}

#[test]
fn test_same_seed_same_result() {
    let first = Solver::new(setup::create_city_problem(), small_params(6))
        .unwrap()
        .solve()
        .unwrap();
    let second = Solver::new(setup::create_city_problem(), small_params(6))
        .unwrap()
        .solve()
        .unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_binary_tournament_same_seed_same_result() {
    let params = SolverParams {
        solver_selector: SolverSelectorStrategy::BinaryTournament,
        ..small_params(6)
    };

    let first = Solver::new(setup::create_city_problem(), params.clone())
        .unwrap()
        .solve()
        .unwrap();
    let second = Solver::new(setup::create_city_problem(), params)
        .unwrap()
        .solve()
        .unwrap();

    assert_eq!(first.optimized_fleet, second.optimized_fleet);
    assert_eq!(first.fitness_score, second.fitness_score);
}

#[test]
fn test_result_covers_every_route() {
    let result = Solver::new(setup::create_city_problem(), small_params(5))
        .unwrap()
        .solve()
        .unwrap();

    assert_eq!(
        result.optimized_fleet.keys().collect::<Vec<_>>(),
        vec!["Blue", "Green", "Red"]
    );
    assert!(result.optimized_fleet.values().all(|&fleet| fleet >= 1));
    assert_eq!(result.current_fleet["Green"], 2);
    assert_eq!(result.current_fleet["Red"], 0);

    for (route, schedules) in &result.optimized_schedules {
        assert_eq!(schedules.len(), result.optimized_fleet[route]);
        for schedule in schedules.values() {
            assert!(!schedule.weekdays.is_empty());
            assert!(schedule.weekdays.windows(2).all(|pair| pair[0] < pair[1]));
        }
    }

    assert_eq!(result.hourly_demand.len(), 24);
    assert_eq!(result.hourly_demand[8], 70);
    assert_eq!(result.normalized_demand[8], 1.0);
    assert!(result.peak_hours.contains(&8));
    assert!((0.0..=1.0).contains(&result.fitness_score));
    assert_eq!(result.statistics.len(), result.generations);
}

#[test]
fn test_best_fitness_never_decreases() {
    let result = Solver::new(setup::create_city_problem(), small_params(8))
        .unwrap()
        .solve()
        .unwrap();

    assert!(
        result
            .statistics
            .windows(2)
            .all(|pair| pair[1].best_so_far >= pair[0].best_so_far)
    );
    assert_eq!(
        result.statistics.last().map(|statistics| statistics.best_so_far),
        Some(result.fitness_score)
    );
}

#[test]
fn test_early_stop_threshold() {
    let params = SolverParams {
        population_size: 6,
        terminations: vec![Termination::Generations(20), Termination::Fitness(0.0)],
        ..SolverParams::default()
    };

    let result = Solver::new(setup::create_city_problem(), params)
        .unwrap()
        .solve()
        .unwrap();

    assert!(result.early_stopped);
    assert_eq!(result.generations, 1);
}

#[test]
fn test_on_generation_callback() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut solver = Solver::new(setup::create_city_problem(), small_params(4)).unwrap();

    let counter = Arc::clone(&calls);
    solver.on_generation(move |_| {
        counter.fetch_add(1, Ordering::Relaxed);
    });

    let result = solver.solve().unwrap();

    assert_eq!(calls.load(Ordering::Relaxed), result.generations);
}

#[test]
fn test_stopped_before_start() {
    let solver = Solver::new(setup::create_city_problem(), small_params(4)).unwrap();
    solver.stop();

    assert_eq!(solver.solve().err(), Some(SearchError::Cancelled));
    assert_eq!(solver.status(), SolverStatus::Completed);
}

#[test]
fn test_stop_during_run_keeps_best_so_far() {
    let params = SolverParams {
        population_size: 6,
        terminations: vec![Termination::Generations(10)],
        ..SolverParams::default()
    };
    let mut solver = Solver::new(setup::create_city_problem(), params).unwrap();

    let stop_flag = solver.stop_flag();
    solver.on_generation(move |statistics| {
        if statistics.generation == 1 {
            stop_flag.store(true, Ordering::Relaxed);
        }
    });

    let result = solver.solve().unwrap();

    assert_eq!(result.generations, 2);
    assert!(!result.early_stopped);
    assert_eq!(
        result.fitness_score,
        result.statistics.last().unwrap().best_so_far
    );
    assert_eq!(solver.status(), SolverStatus::Completed);
}

#[test]
fn test_mutation_keeps_fleet_at_least_one() {
    let problem = setup::create_test_problem(
        setup::create_network(vec![
            setup::create_route("A", &["X", "Y"], &[("Bus 1", &["07:00"])]),
            setup::create_route("B", &["Y", "Z"], &[("Bus 1", &["08:00"])]),
        ]),
        None,
        vec![],
    );
    let candidate = construct_candidate(&problem);
    assert!(candidate.routes().iter().all(|route| route.fleet_size() == 1));

    // Always picks the shrinking branch.
    let mut rng = MockRng::new(vec![u64::MAX]);
    let mutated = mutate(&problem, &candidate, 1.0, &mut rng);
    assert!(mutated.routes().iter().all(|route| route.fleet_size() == 1));

    let mut rng = SmallRng::seed_from_u64(7);
    let mut current = candidate;
    for _ in 0..200 {
        current = mutate(&problem, &current, 1.0, &mut rng);
        assert!(current.routes().iter().all(|route| route.fleet_size() >= 1));
    }
}

#[test]
fn test_crossover_with_itself_is_identity() {
    let problem = setup::create_city_problem();
    let candidate = construct_candidate(&problem);

    let mut rng = SmallRng::seed_from_u64(3);
    for _ in 0..10 {
        let child = crossover(&candidate, &candidate, &mut rng);
        assert!(child.has_same_plans(&candidate));
    }
}

#[test]
fn test_empty_history_scores() {
    let problem = setup::create_test_problem(
        setup::create_network(vec![
            setup::create_route("A", &["X", "Y"], &[("Bus 1", &["07:00", "08:00"])]),
            setup::create_route("B", &["Y", "Z"], &[("Bus 1", &["08:00"]), ("Bus 2", &[])]),
        ]),
        None,
        vec![],
    );

    assert_eq!(problem.demand().peak_hour_count(), 0);
    assert_eq!(problem.demand().normalized_hourly_demand(), [0.0; 24]);

    let evaluator = FitnessEvaluator::default();
    let score = evaluator.evaluate(&problem, &Candidate::from_network(problem.network()));

    assert_eq!(score.metrics.waiting_time, 0.0);
    assert_eq!(score.metrics.peak_coverage, 0.0);
    assert_eq!(score.metrics.cost, 1.0);
    assert_eq!(problem.current_fleet().size(RouteIdx::new(1)), 2);
}

#[test]
fn test_empty_history_search() {
    let problem = setup::create_test_problem(
        setup::create_network(vec![setup::create_route(
            "A",
            &["X", "Y"],
            &[("Bus 1", &["07:00"])],
        )]),
        None,
        vec![],
    );

    let result = Solver::new(problem, small_params(3))
        .unwrap()
        .solve()
        .unwrap();

    assert!(result.peak_hours.is_empty());
    assert_eq!(result.baseline.average_wait_minutes, None);
    assert_eq!(result.optimized_fleet["A"], 1);
}
