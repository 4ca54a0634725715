pub mod crossover;
pub mod mutation;
