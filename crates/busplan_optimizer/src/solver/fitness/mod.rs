pub mod cost_objective;
pub mod fitness_evaluator;
pub mod fitness_objective;
pub mod peak_coverage_objective;
pub mod utilization_objective;
pub mod waiting_time_objective;
