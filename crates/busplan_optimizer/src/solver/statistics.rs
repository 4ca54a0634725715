use serde::Serialize;

/// Progress of one generation. Kept free of wall-clock values so that two
/// runs with the same seed report identical statistics.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct GenerationStatistics {
    pub generation: usize,
    pub best_fitness: f64,
    pub mean_fitness: f64,
    /// Best fitness seen since the search started.
    pub best_so_far: f64,
}
