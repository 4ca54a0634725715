use rand::Rng;

use crate::solver::candidate::Candidate;

pub const PARENT_SELECTION_PROBABILITY: f64 = 0.5;

/// Uniform crossover over whole route plans. Each route's fleet and
/// timetables come together from one parent, they are never mixed.
pub fn crossover<R>(parent1: &Candidate, parent2: &Candidate, rng: &mut R) -> Candidate
where
    R: Rng,
{
    Candidate::new(
        parent1
            .routes()
            .iter()
            .zip(parent2.routes())
            .map(|(route1, route2)| {
                if rng.random_bool(PARENT_SELECTION_PROBABILITY) {
                    route1.clone()
                } else {
                    route2.clone()
                }
            })
            .collect(),
    )
}
