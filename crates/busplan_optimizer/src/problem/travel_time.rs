pub const MINUTES_PER_STOP: f64 = 3.5;
pub const CONGESTION_MINUTES_PER_STOP: f64 = 0.8;
pub const MAX_CONGESTION_MINUTES: f64 = 15.0;

/// Number of stop transitions from `start_index` to `end_index`, treating the
/// route as circular.
pub fn stop_count(start_index: usize, end_index: usize, total_stops: usize) -> usize {
    if start_index < end_index {
        end_index - start_index
    } else {
        (total_stops + end_index).saturating_sub(start_index)
    }
}

/// Estimated travel time in minutes: a fixed time per stop plus a capped
/// congestion allowance.
pub fn travel_time(start_index: usize, end_index: usize, total_stops: usize) -> f64 {
    let stops = stop_count(start_index, end_index, total_stops) as f64;

    MINUTES_PER_STOP * stops + (CONGESTION_MINUTES_PER_STOP * stops).min(MAX_CONGESTION_MINUTES)
}
