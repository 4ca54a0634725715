use rand::seq::{IndexedRandom, index::sample};

use crate::solver::candidate::Candidate;

use super::select_solution::SelectSolution;

pub struct SelectRandomSelector;

impl SelectSolution for SelectRandomSelector {
    fn select_solution<'a>(
        &self,
        candidates: &'a [Candidate],
        rng: &mut impl rand::Rng,
    ) -> Option<&'a Candidate> {
        candidates.choose(rng)
    }

    fn select_parents<'a>(
        &self,
        candidates: &'a [Candidate],
        rng: &mut impl rand::Rng,
    ) -> Option<(&'a Candidate, &'a Candidate)> {
        if candidates.len() < 2 {
            return None;
        }

        let indices = sample(rng, candidates.len(), 2);
        Some((&candidates[indices.index(0)], &candidates[indices.index(1)]))
    }
}
