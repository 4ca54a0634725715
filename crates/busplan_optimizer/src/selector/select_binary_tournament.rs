use rand::seq::IteratorRandom;

use crate::solver::candidate::Candidate;

use super::select_solution::SelectSolution;

pub struct BinaryTournamentSelector;

impl BinaryTournamentSelector {
    /// Fitter of two random positions from `indices`.
    fn tournament(
        candidates: &[Candidate],
        indices: impl Iterator<Item = usize>,
        rng: &mut impl rand::Rng,
    ) -> Option<usize> {
        let contenders = indices.choose_multiple(rng, 2);

        match contenders.as_slice() {
            [] => None,
            [single] => Some(*single),
            [first, second, ..] => {
                if candidates[*first].fitness() >= candidates[*second].fitness() {
                    Some(*first)
                } else {
                    Some(*second)
                }
            }
        }
    }
}

impl SelectSolution for BinaryTournamentSelector {
    fn select_solution<'a>(
        &self,
        candidates: &'a [Candidate],
        rng: &mut impl rand::Rng,
    ) -> Option<&'a Candidate> {
        let index = Self::tournament(candidates, 0..candidates.len(), rng)?;
        Some(&candidates[index])
    }

    fn select_parents<'a>(
        &self,
        candidates: &'a [Candidate],
        rng: &mut impl rand::Rng,
    ) -> Option<(&'a Candidate, &'a Candidate)> {
        if candidates.len() < 2 {
            return None;
        }

        let first = Self::tournament(candidates, 0..candidates.len(), rng)?;
        let second = Self::tournament(
            candidates,
            (0..candidates.len()).filter(|&index| index != first),
            rng,
        )?;

        Some((&candidates[first], &candidates[second]))
    }
}
