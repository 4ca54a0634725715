use jiff::civil::Time;

use crate::{
    error::EvaluationError,
    problem::fleet_problem::FleetProblem,
    solver::candidate::{Candidate, RoutePlan},
    utils::time::as_minutes,
};

use super::fitness_objective::{FitnessObjective, ensure_route_count};

pub const MAX_WAIT_MINUTES: f64 = 60.0;

/// Scores how close the candidate's departures are to the times passengers
/// asked for. Only requests a single route can serve are counted, but any
/// departure of the candidate may be the closest one.
pub struct WaitingTimeObjective;

impl FitnessObjective for WaitingTimeObjective {
    fn objective_name(&self) -> &'static str {
        "waiting_time"
    }

    fn evaluate(
        &self,
        problem: &FleetProblem,
        candidate: &Candidate,
    ) -> Result<f64, EvaluationError> {
        ensure_route_count(problem, candidate)?;

        Ok(match average_wait_minutes(problem, candidate) {
            Some(average_wait) => 1.0 - average_wait / MAX_WAIT_MINUTES,
            None => 0.0,
        })
    }
}

/// Minutes between `desired` and the closest of `departures`.
pub fn closest_departure_wait(
    departures: impl Iterator<Item = Time>,
    desired: Time,
) -> Option<f64> {
    departures
        .map(|departure| as_minutes(departure.duration_since(desired).abs()))
        .min_by(f64::total_cmp)
}

/// Mean wait over the matched trip requests, each wait capped at
/// [`MAX_WAIT_MINUTES`] and measured against every bus and day type of the
/// candidate. `None` when no request could be matched to a
/// departure.
pub fn average_wait_minutes(problem: &FleetProblem, candidate: &Candidate) -> Option<f64> {
    let mut total_wait = 0.0;
    let mut request_count = 0;

    for (request, _) in problem.matched_requests() {
        let departures = candidate.routes().iter().flat_map(RoutePlan::departures);

        if let Some(wait) = closest_departure_wait(departures, request.desired_time().time()) {
            total_wait += wait.min(MAX_WAIT_MINUTES);
            request_count += 1;
        }
    }

    if request_count == 0 {
        None
    } else {
        Some(total_wait / request_count as f64)
    }
}
