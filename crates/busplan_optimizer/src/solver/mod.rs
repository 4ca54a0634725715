pub mod candidate;
pub mod construction;
pub mod evolutionary_search;
pub mod fitness;
pub mod operators;
pub mod optimization_result;
pub mod population;
pub mod schedule_generator;
pub mod score;
pub mod solver;
pub mod solver_params;
pub mod statistics;
