use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::puzzle::{Action, NUM_ACTIONS};

/// Iterates over orderings of all four actions, pre-shuffled at construction.
///
/// Expanding actions in a fixed order biases tie-breaks in a search toward
/// one direction; shuffling on every call costs. This iterator shuffles a
/// finite number of orderings up front with a fixed seed and cycles through
/// them, removing the bias without per-call cost and staying reproducible.
///
/// ```
/// use pushworld::search::actions::RandomActionIterator;
///
/// let mut action_iter = RandomActionIterator::default();
/// for &action in action_iter.next_group() {
///     // expand `action`...
/// }
/// ```
pub struct RandomActionIterator {
    action_groups: Vec<[Action; NUM_ACTIONS]>,
    next_group: usize,
}

impl RandomActionIterator {
    pub fn new(num_action_groups: usize) -> Self {
        let mut rng = StdRng::seed_from_u64(42);
        let mut action_groups = vec![Action::ALL; num_action_groups];

        for group in &mut action_groups {
            group.shuffle(&mut rng);
        }

        Self {
            action_groups,
            next_group: 0,
        }
    }

    /// Returns all four actions in a randomized order.
    pub fn next_group(&mut self) -> &[Action; NUM_ACTIONS] {
        self.next_group = (self.next_group + 1) % self.action_groups.len();
        &self.action_groups[self.next_group]
    }
}

impl Default for RandomActionIterator {
    /// 1000 pre-shuffled orderings.
    fn default() -> Self {
        Self::new(1000)
    }
}
