pub mod error;
pub mod itinerary;
pub mod json;
pub mod problem;
mod selector;
pub mod solver;
mod utils;

pub use utils::time::{format_hh_mm, parse_hh_mm};

#[cfg(test)]
pub(crate) mod test_utils;
