//! The recursive graph distance (RGD) heuristic.
//!
//! Derived from the Fast Downward causal-graph heuristic with two changes
//! that fit pushing puzzles: only the conditions of the *first* movement on a
//! path are costed (every later movement counts 1 regardless of conditions),
//! and pushes that move several objects in one action are costed exactly,
//! including the zero-cost "simultaneous" push where a pusher's single
//! movement both relocates it and achieves the desired push.

use std::rc::Rc;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::core::position::Position;
use crate::heuristics::movement_graph::{
    build_feasible_movement_graphs, FeasibleMovementGraph, PathDistances,
};
use crate::heuristics::Heuristic;
use crate::puzzle::{Action, Puzzle, RelativeState, State, AGENT};

/// Memo key for [`RecursiveGraphDistance::pushing_costs`]: the full argument
/// list of the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct PushingCostKey {
    pusher_id: usize,
    pusher_position: Position,
    pushee_id: usize,
    pushee_start: Position,
    pushee_end: Position,
}

/// Costs of preparing one push, keyed by the pusher's next position.
type PushingCosts = FxHashMap<Position, f32>;

/// Estimates cost-to-goal as, per goal object, the movement-graph distance of
/// the remaining path plus the recursively estimated cost of causing the
/// path's first movement.
///
/// With `fewest_tools` enabled (the default), costs are computed with the
/// smallest number of intermediate "tool" objects that yields a finite value:
/// pushing depths are tried in increasing order and the first finite cost
/// wins, even when a deeper chain would be cheaper. Disabling it evaluates
/// the maximum depth directly, which tightens the estimate at exponential
/// cost in the number of available tools.
pub struct RecursiveGraphDistance {
    puzzle: Rc<Puzzle>,
    fewest_tools: bool,
    movement_graphs: Vec<Rc<FeasibleMovementGraph>>,
    path_distances: Vec<PathDistances>,
    pushing_cost_cache: FxHashMap<PushingCostKey, Rc<PushingCosts>>,
}

impl RecursiveGraphDistance {
    pub fn new(puzzle: Rc<Puzzle>) -> Self {
        Self::with_fewest_tools(puzzle, true)
    }

    pub fn with_fewest_tools(puzzle: Rc<Puzzle>, fewest_tools: bool) -> Self {
        let movement_graphs = build_feasible_movement_graphs(&puzzle);
        let path_distances = movement_graphs
            .iter()
            .map(|graph| PathDistances::new(graph))
            .collect();

        Self {
            puzzle,
            fewest_tools,
            movement_graphs,
            path_distances,
            pushing_cost_cache: FxHashMap::default(),
        }
    }

    /// Estimated cost to move `object_id` from its position in `state` to
    /// `goal_position`, with the agent allowed to push at most
    /// `pushing_depth` other objects to push this one indirectly.
    fn goal_cost(
        &mut self,
        state: &State,
        object_id: usize,
        goal_position: Position,
        pushing_depth: usize,
    ) -> f32 {
        let current_position = state[object_id];

        if goal_position == current_position {
            return 0.0;
        }

        let mut min_cost = f32::INFINITY;
        let skipped_object_ids = FxHashSet::default();

        let graph = Rc::clone(&self.movement_graphs[object_id]);
        let Some(effect_positions) = graph.get(&current_position) else {
            return min_cost;
        };

        // Consider each feasible movement of the object.
        for &effect_position in effect_positions {
            // Cost of the remaining path after the first movement.
            let goal_distance_cost =
                self.path_distances[object_id].get_distance(effect_position, goal_position);

            if goal_distance_cost >= min_cost {
                continue;
            }

            min_cost = goal_distance_cost
                + self.recursive_pushing_cost(
                    state,
                    object_id,
                    current_position,
                    effect_position,
                    &skipped_object_ids,
                    pushing_depth,
                    min_cost - goal_distance_cost,
                );
        }

        min_cost
    }

    /// Tries pushing depths in increasing order and returns the first finite
    /// goal cost.
    fn fewest_tools_goal_cost(
        &mut self,
        state: &State,
        object_id: usize,
        goal_position: Position,
    ) -> f32 {
        for pushing_depth in 0..state.len() - 1 {
            let cost = self.goal_cost(state, object_id, goal_position, pushing_depth);
            if cost != f32::INFINITY {
                return cost;
            }
        }
        f32::INFINITY
    }

    /// Estimated cost of causing the single movement of `object_id` from
    /// `current_position` to the adjacent `effect_position`.
    ///
    /// At depth 0 only the agent may perform the push; at greater depths a
    /// chain of exactly `pushing_depth` tool objects is costed, each level
    /// recursing one depth lower. Objects in `skipped_object_ids` are not
    /// considered as pushers, which prevents cycles within one branch.
    ///
    /// Returns at most `cost_upper_bound`; branches that cannot improve on it
    /// are pruned.
    #[allow(clippy::too_many_arguments)]
    fn recursive_pushing_cost(
        &mut self,
        state: &State,
        object_id: usize,
        current_position: Position,
        effect_position: Position,
        skipped_object_ids: &FxHashSet<usize>,
        pushing_depth: usize,
        cost_upper_bound: f32,
    ) -> f32 {
        let mut min_cost = cost_upper_bound;

        let mut next_skipped_object_ids = skipped_object_ids.clone();
        next_skipped_object_ids.insert(object_id);

        // The agent is object 0, so these ranges select either the agent
        // alone or every movable.
        let pusher_ids = if pushing_depth == 0 {
            0..1
        } else {
            1..state.len()
        };

        for pusher_id in pusher_ids {
            if next_skipped_object_ids.contains(&pusher_id) {
                continue;
            }

            let pusher_position = state[pusher_id];
            let pushing_costs = self.pushing_costs(
                pusher_id,
                pusher_position,
                object_id,
                current_position,
                effect_position,
            );

            for (&pusher_effect_position, &pusher_distance_cost) in pushing_costs.iter() {
                if pusher_distance_cost >= min_cost {
                    continue;
                }

                if pusher_id == AGENT {
                    // The agent pushes directly by moving onto the object,
                    // which costs one movement.
                    let total_cost = pusher_distance_cost + 1.0;
                    if total_cost < min_cost {
                        min_cost = total_cost;
                    }
                } else {
                    min_cost = pusher_distance_cost
                        + self.recursive_pushing_cost(
                            state,
                            pusher_id,
                            pusher_position,
                            pusher_effect_position,
                            &next_skipped_object_ids,
                            pushing_depth - 1,
                            min_cost - pusher_distance_cost,
                        );
                }
            }
        }

        min_cost
    }

    /// Costs for `pusher_id` to move from positions adjacent to
    /// `pusher_position` into a contact position from which the pushee's
    /// movement from `pushee_start` to the adjacent `pushee_end` occurs.
    ///
    /// The returned map is keyed by the pusher's adjacent positions. A push
    /// effected by the pusher's very first movement is simultaneous and
    /// costs zero. Results are memoized under the full argument list.
    fn pushing_costs(
        &mut self,
        pusher_id: usize,
        pusher_position: Position,
        pushee_id: usize,
        pushee_start: Position,
        pushee_end: Position,
    ) -> Rc<PushingCosts> {
        let key = PushingCostKey {
            pusher_id,
            pusher_position,
            pushee_id,
            pushee_start,
            pushee_end,
        };

        if let Some(cached) = self.pushing_cost_cache.get(&key) {
            return Rc::clone(cached);
        }

        let mut costs = PushingCosts::default();

        let displacement = pushee_end - pushee_start;
        let action = Action::from_displacement(displacement)
            .expect("pushee movement must span one cardinal step");
        let puzzle = Rc::clone(&self.puzzle);
        let collisions = puzzle.object_collisions();

        let pusher_graph = Rc::clone(&self.movement_graphs[pusher_id]);
        if let Some(pusher_next_positions) = pusher_graph.get(&pusher_position) {
            // Consider every relative position from which the pusher can
            // push the pushee toward its end position.
            for &relative_position in
                collisions.dynamic_collisions(action, pusher_id, pushee_id)
            {
                let pushing_start = pushee_start + relative_position;
                let pushing_end = pushing_start + displacement;

                // The pusher must itself be able to perform the pushing
                // movement.
                let pushing_feasible = pusher_graph
                    .get(&pushing_start)
                    .is_some_and(|ends| ends.contains(&pushing_end));
                if !pushing_feasible {
                    continue;
                }

                for &pusher_next_position in pusher_next_positions {
                    let distance_cost;

                    if pushing_start == pusher_position && pushing_end == pusher_next_position {
                        // A simultaneous push: the pusher's one movement both
                        // relocates it and performs the push.
                        distance_cost = 0.0;
                    } else {
                        let distance = self.path_distances[pusher_id]
                            .get_distance(pusher_next_position, pushing_start);
                        if distance == f32::INFINITY {
                            continue;
                        }
                        // One more movement to make contact.
                        distance_cost = distance + 1.0;
                    }

                    let best = costs
                        .entry(pusher_next_position)
                        .or_insert(f32::INFINITY);
                    if distance_cost < *best {
                        *best = distance_cost;
                    }
                }
            }
        }

        let costs = Rc::new(costs);
        self.pushing_cost_cache.insert(key, Rc::clone(&costs));
        costs
    }
}

impl Heuristic for RecursiveGraphDistance {
    type Cost = f32;

    /// Sum of per-goal-object costs; infinite exactly when the goal is
    /// provably unreachable from the given state.
    fn estimate_cost_to_goal(&mut self, relative_state: &RelativeState) -> f32 {
        let state = &relative_state.state;
        let goal = self.puzzle.goal().clone();
        let mut cost = 0.0;

        for (i, &goal_position) in goal.iter().enumerate() {
            let object_id = i + 1;

            if self.fewest_tools {
                cost += self.fewest_tools_goal_cost(state, object_id, goal_position);
            } else {
                cost += self.goal_cost(state, object_id, goal_position, state.len() - 2);
            }

            if cost == f32::INFINITY {
                break;
            }
        }

        cost
    }
}
