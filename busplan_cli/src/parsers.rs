use busplan_optimizer::solver::solver_params::SolverSelectorStrategy;
use jiff::civil::DateTime;

/// Accepts `2025-06-10T08:10` and `2025-06-10 08:10` forms.
pub fn parse_datetime(input: &str) -> Result<DateTime, String> {
    input
        .trim()
        .replacen(' ', "T", 1)
        .parse::<DateTime>()
        .map_err(|error| format!("Invalid date time: {error}"))
}

pub fn parse_selector(input: &str) -> Result<SolverSelectorStrategy, String> {
    match input {
        "random" | "select_random" => Ok(SolverSelectorStrategy::SelectRandom),
        "tournament" | "binary_tournament" => Ok(SolverSelectorStrategy::BinaryTournament),
        _ => Err(String::from(
            "Invalid selector, expected 'random' or 'tournament'",
        )),
    }
}

pub fn parse_seed(input: &str) -> Result<u64, String> {
    input
        .trim()
        .parse::<u64>()
        .map_err(|_| format!("Invalid seed '{input}'"))
}
