use crate::error::PlannerError;
use crate::heuristics::Heuristic;
use crate::puzzle::RelativeState;

/// Heuristics paired with the weight applied to their estimates.
pub type HeuristicsAndWeights = Vec<(Box<dyn Heuristic<Cost = f32>>, f32)>;

/// A weighted sum of several heuristics.
///
/// Giving the primary heuristic a weight larger than the greatest possible
/// value of every secondary heuristic turns the sum into a lexicographic
/// ordering, e.g. novelty (at most 3) weighted `1e6` over integer-valued
/// graph-distance costs.
pub struct WeightedSum {
    heuristics_and_weights: HeuristicsAndWeights,
}

impl WeightedSum {
    /// Constructs the sum from (heuristic, weight) pairs; at least one pair
    /// is required.
    pub fn new(heuristics_and_weights: HeuristicsAndWeights) -> Result<Self, PlannerError> {
        if heuristics_and_weights.is_empty() {
            return Err(PlannerError::InvalidArgument {
                reason: "at least one heuristic must be provided to compute a weighted sum of costs"
                    .to_string(),
            });
        }
        Ok(Self {
            heuristics_and_weights,
        })
    }
}

impl Heuristic for WeightedSum {
    type Cost = f32;

    fn estimate_cost_to_goal(&mut self, relative_state: &RelativeState) -> f32 {
        self.heuristics_and_weights
            .iter_mut()
            .map(|(heuristic, weight)| heuristic.estimate_cost_to_goal(relative_state) * *weight)
            .sum()
    }
}
