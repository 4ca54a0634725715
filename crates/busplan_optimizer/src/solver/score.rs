use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Sub-scores of a candidate, each within `[0, 1]`.
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, JsonSchema)]
pub struct FitnessMetrics {
    pub waiting_time: f64,
    pub utilization: f64,
    pub peak_coverage: f64,
    pub cost: f64,
}

impl FitnessMetrics {
    pub const ZERO: FitnessMetrics = FitnessMetrics {
        waiting_time: 0.0,
        utilization: 0.0,
        peak_coverage: 0.0,
        cost: 0.0,
    };

    pub fn weighted_sum(&self, weights: &FitnessWeights) -> f64 {
        let score = self.waiting_time * weights.waiting_time
            + self.utilization * weights.utilization
            + self.peak_coverage * weights.peak_coverage
            + self.cost * weights.cost;

        if score.is_finite() {
            score.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FitnessWeights {
    pub waiting_time: f64,
    pub utilization: f64,
    pub peak_coverage: f64,
    pub cost: f64,
}

impl FitnessWeights {
    pub fn total(&self) -> f64 {
        self.waiting_time + self.utilization + self.peak_coverage + self.cost
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> {
        [
            ("waiting_time", self.waiting_time),
            ("utilization", self.utilization),
            ("peak_coverage", self.peak_coverage),
            ("cost", self.cost),
        ]
        .into_iter()
    }
}

impl Default for FitnessWeights {
    fn default() -> Self {
        FitnessWeights {
            waiting_time: 0.35,
            utilization: 0.25,
            peak_coverage: 0.25,
            cost: 0.15,
        }
    }
}

/// Fitness of an evaluated candidate and the metrics it was derived from.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct CandidateScore {
    pub fitness: f64,
    pub metrics: FitnessMetrics,
}

impl CandidateScore {
    pub fn new(metrics: FitnessMetrics, weights: &FitnessWeights) -> Self {
        CandidateScore {
            fitness: metrics.weighted_sum(weights),
            metrics,
        }
    }
}
