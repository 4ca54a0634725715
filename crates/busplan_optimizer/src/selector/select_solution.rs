use crate::solver::candidate::Candidate;

pub trait SelectSolution {
    fn select_solution<'a>(
        &self,
        candidates: &'a [Candidate],
        rng: &mut impl rand::Rng,
    ) -> Option<&'a Candidate>;

    /// Two parents taken from distinct positions of `candidates`.
    fn select_parents<'a>(
        &self,
        candidates: &'a [Candidate],
        rng: &mut impl rand::Rng,
    ) -> Option<(&'a Candidate, &'a Candidate)>;
}
