pub mod select_binary_tournament;
pub mod select_random_selector;
pub mod select_solution;
pub mod solution_selector;
