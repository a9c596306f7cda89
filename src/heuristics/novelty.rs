//! The novelty heuristic for best-first width search.
//!
//! As described in: Lipovetzky, Nir, and Hector Geffner. "Best-first width
//! search: Exploration and exploitation in classical planning." AAAI 2017.

use rustc_hash::FxHashSet;

use crate::core::position::Position;
use crate::heuristics::Heuristic;
use crate::puzzle::RelativeState;

type PositionPair = (Position, Position);

/// Scores a state by how novel its object positions are relative to every
/// state previously scored:
///
/// - 1 if some object sits at a position no earlier state placed it at;
/// - 2 if some pair of objects sits at a combination of positions no earlier
///   state exhibited;
/// - 3 otherwise.
///
/// Only moved objects can contribute novelty, so scoring walks the moved
/// indices of the relative state rather than the full position vector. Every
/// moved index is observed even after the score is decided, keeping the
/// visited sets the complete cumulative record.
pub struct Novelty {
    state_size: usize,
    visited_positions: Vec<FxHashSet<Position>>,
    visited_position_pairs: Vec<Vec<FxHashSet<PositionPair>>>,
}

impl Novelty {
    /// Constructs a heuristic for states holding `state_size` object
    /// positions.
    pub fn new(state_size: usize) -> Self {
        Self {
            state_size,
            visited_positions: vec![FxHashSet::default(); state_size],
            visited_position_pairs: vec![vec![FxHashSet::default(); state_size]; state_size],
        }
    }
}

impl Heuristic for Novelty {
    type Cost = f32;

    /// For computational efficiency the state is not validated to contain
    /// `state_size` elements.
    fn estimate_cost_to_goal(&mut self, relative_state: &RelativeState) -> f32 {
        let state = &relative_state.state;
        let mut novelty = 3.0f32;

        for &i in &relative_state.moved_object_indices {
            let p_i = state[i];

            if self.visited_positions[i].insert(p_i) {
                novelty = 1.0;
            }

            // Pairs are stored with the smaller index first, which halves
            // the memory of the visited-pair record.
            for j in 0..i {
                let pair = (state[j], p_i);
                if self.visited_position_pairs[j][i].insert(pair) && novelty > 2.0 {
                    novelty = 2.0;
                }
            }
            for j in i + 1..self.state_size {
                let pair = (p_i, state[j]);
                if self.visited_position_pairs[i][j].insert(pair) && novelty > 2.0 {
                    novelty = 2.0;
                }
            }
        }

        novelty
    }
}
