use crate::solver::candidate::Candidate;

use super::{
    select_binary_tournament::BinaryTournamentSelector,
    select_random_selector::SelectRandomSelector, select_solution::SelectSolution,
};

pub enum SolutionSelector {
    SelectRandom(SelectRandomSelector),
    BinaryTournament(BinaryTournamentSelector),
}

impl SelectSolution for SolutionSelector {
    fn select_solution<'a>(
        &self,
        candidates: &'a [Candidate],
        rng: &mut impl rand::Rng,
    ) -> Option<&'a Candidate> {
        match self {
            SolutionSelector::SelectRandom(selector) => selector.select_solution(candidates, rng),
            SolutionSelector::BinaryTournament(selector) => {
                selector.select_solution(candidates, rng)
            }
        }
    }

    fn select_parents<'a>(
        &self,
        candidates: &'a [Candidate],
        rng: &mut impl rand::Rng,
    ) -> Option<(&'a Candidate, &'a Candidate)> {
        match self {
            SolutionSelector::SelectRandom(selector) => selector.select_parents(candidates, rng),
            SolutionSelector::BinaryTournament(selector) => {
                selector.select_parents(candidates, rng)
            }
        }
    }
}
