use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProblemError {
    #[error("Route network has no routes")]
    EmptyNetwork,
    #[error("Route {0} has no stops")]
    RouteWithoutStops(String),
    #[error("Duplicate route name {0}")]
    DuplicateRoute(String),
    #[error("Invalid solver parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvaluationError {
    #[error("Candidate has {actual} route plans, network has {expected} routes")]
    RouteCountMismatch { expected: usize, actual: usize },
    #[error("Sub-metric {0} is not a finite number")]
    NonFinite(&'static str),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    #[error("Optimization ended with an empty population")]
    EmptyPopulation,
    #[error("Optimization was cancelled before any generation was evaluated")]
    Cancelled,
}
