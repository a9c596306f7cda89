//! Per-object feasible movement graphs and shortest-path distances over them.
//!
//! A feasible movement graph stores whether an object can potentially move
//! from a position to an adjacent one. Any movement *not* in the graph is
//! proven unachievable; movements in the graph are not proven achievable.
//! The approximation assumes every other object may occupy any position it
//! ever reaches, which makes the graphs state-independent and lets them be
//! built once per puzzle.

use std::rc::Rc;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::core::position::Position;
use crate::puzzle::{Action, Puzzle, AGENT};

/// `start position -> set of end positions`, each one cardinal step away.
///
/// Every position discovered during construction is present as a key, even
/// when it has no outgoing movements.
pub type FeasibleMovementGraph = FxHashMap<Position, FxHashSet<Position>>;

/// An object's movement from one position to an adjacent one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Transition {
    object_id: usize,
    start: Position,
    end: Position,
}

/// Transitions whose feasibility is pending on the key transition becoming
/// feasible.
type DependentTransitions = FxHashMap<Transition, Vec<Transition>>;

/// Adds a transition to its object's graph.
///
/// On first insertion, every transition waiting on this one is added in turn,
/// and a newly discovered end position is pushed onto the frontier.
fn add_transition(
    transition: Transition,
    frontier: &mut Vec<(usize, Position)>,
    graphs: &mut [FeasibleMovementGraph],
    dependents: &mut DependentTransitions,
) {
    let graph = &mut graphs[transition.object_id];
    let newly_inserted = graph
        .entry(transition.start)
        .or_default()
        .insert(transition.end);
    if !newly_inserted {
        return;
    }

    if let Some(waiting) = dependents.remove(&transition) {
        for dependent in waiting {
            add_transition(dependent, frontier, graphs, dependents);
        }
    }

    let graph = &mut graphs[transition.object_id];
    if !graph.contains_key(&transition.end) {
        graph.insert(transition.end, FxHashSet::default());
        frontier.push((transition.object_id, transition.end));
    }
}

/// Builds the feasible movement graph of every object, indexed by object id.
///
/// The construction is a fixed point over an explicit worklist: the agent's
/// movements are feasible wherever no static collision blocks them, and a
/// non-agent movement is feasible once some pusher's enabling movement is.
/// Pushee transitions observed before their pusher transition are parked in
/// a dependency map and woken when the pusher transition is proven.
pub fn build_feasible_movement_graphs(puzzle: &Puzzle) -> Vec<Rc<FeasibleMovementGraph>> {
    let initial_state = puzzle.initial_state();
    let collisions = puzzle.object_collisions();
    let num_objects = initial_state.len();

    let mut graphs: Vec<FeasibleMovementGraph> = vec![FeasibleMovementGraph::default(); num_objects];
    // (object, position) pairs not yet expanded. Entries are pushed at most
    // once per pair: insertion is guarded by the graph-key check above.
    let mut frontier: Vec<(usize, Position)> = Vec::new();
    let mut dependents = DependentTransitions::default();

    for (i, &position) in initial_state.iter().enumerate() {
        // The initial node exists even if no movement is ever feasible.
        graphs[i].insert(position, FxHashSet::default());
        frontier.push((i, position));
    }

    while let Some((object_id, position)) = frontier.pop() {
        if object_id == AGENT {
            for action in Action::ALL {
                if !collisions
                    .static_collisions(action, AGENT)
                    .contains(&position)
                {
                    let transition = Transition {
                        object_id: AGENT,
                        start: position,
                        end: position + action.displacement(),
                    };
                    add_transition(transition, &mut frontier, &mut graphs, &mut dependents);
                }
            }
            continue;
        }

        // Consider pushing movements from every direction.
        for action in Action::ALL {
            if collisions
                .static_collisions(action, object_id)
                .contains(&position)
            {
                continue;
            }

            let displacement = action.displacement();
            let transition = Transition {
                object_id,
                start: position,
                end: position + displacement,
            };

            'pushers: for pusher_id in 0..num_objects {
                if pusher_id == object_id {
                    continue;
                }

                for &relative_position in collisions.dynamic_collisions(action, pusher_id, object_id)
                {
                    // The pusher's enabling movement.
                    let start = position + relative_position;
                    let end = start + displacement;

                    let feasible = graphs[pusher_id]
                        .get(&start)
                        .is_some_and(|ends| ends.contains(&end));

                    if feasible {
                        add_transition(transition, &mut frontier, &mut graphs, &mut dependents);
                        break 'pushers;
                    }

                    // Not yet proven; record this transition as a dependent
                    // of the pusher's.
                    let pusher_transition = Transition {
                        object_id: pusher_id,
                        start,
                        end,
                    };
                    dependents
                        .entry(pusher_transition)
                        .or_default()
                        .push(transition);
                }
            }
        }
    }

    graphs.into_iter().map(Rc::new).collect()
}

/// The same nodes with every movement direction flipped.
fn reverse_graph(graph: &FeasibleMovementGraph) -> FeasibleMovementGraph {
    let mut reversed = FeasibleMovementGraph::default();
    reversed.reserve(graph.len());

    for (&start, ends) in graph {
        reversed.entry(start).or_default();
        for &end in ends {
            reversed.entry(end).or_default().insert(start);
        }
    }
    reversed
}

/// Movement counts on shortest paths from a single start position, computed
/// by expanding one breadth-first layer at a time on demand.
pub struct SingleSourcePathDistances {
    graph: Rc<FeasibleMovementGraph>,
    frontier_depth: f32,
    frontier: Vec<Position>,
    distances: FxHashMap<Position, f32>,
}

impl SingleSourcePathDistances {
    pub fn new(graph: Rc<FeasibleMovementGraph>, start: Position) -> Self {
        let mut distances = FxHashMap::default();
        distances.insert(start, 0.0);
        Self {
            graph,
            frontier_depth: 0.0,
            frontier: vec![start],
            distances,
        }
    }

    /// The number of movements on the shortest path from the start position
    /// to `target`, or infinity if no path exists.
    pub fn get_distance(&mut self, target: Position) -> f32 {
        if let Some(&distance) = self.distances.get(&target) {
            return distance;
        }

        let mut target_found = false;
        while !self.frontier.is_empty() {
            // Expand another breadth-first layer.
            self.frontier_depth += 1.0;
            let mut next_frontier = Vec::new();

            for position in self.frontier.drain(..) {
                let Some(next_positions) = self.graph.get(&position) else {
                    continue;
                };
                for &next_position in next_positions {
                    if !self.distances.contains_key(&next_position) {
                        next_frontier.push(next_position);
                        self.distances.insert(next_position, self.frontier_depth);

                        if next_position == target {
                            target_found = true;
                        }
                    }
                }
            }

            self.frontier = next_frontier;

            if target_found {
                return self.frontier_depth;
            }
        }

        f32::INFINITY
    }
}

/// Movement counts on shortest paths between any pair of positions in a
/// feasible movement graph.
///
/// Distances are computed over the reversed graph, one lazy single-source
/// search per *target* position, so repeated queries toward the same target
/// share one breadth-first expansion.
pub struct PathDistances {
    distances: FxHashMap<Position, SingleSourcePathDistances>,
}

impl PathDistances {
    pub fn new(graph: &FeasibleMovementGraph) -> Self {
        let reversed = Rc::new(reverse_graph(graph));
        let mut distances = FxHashMap::default();

        for &position in reversed.keys() {
            distances.insert(
                position,
                SingleSourcePathDistances::new(Rc::clone(&reversed), position),
            );
        }
        Self { distances }
    }

    /// The number of movements on the shortest path from `source` to
    /// `target`, or infinity if no path exists.
    pub fn get_distance(&mut self, source: Position, target: Position) -> f32 {
        match self.distances.get_mut(&target) {
            None => f32::INFINITY,
            Some(single_source) => single_source.get_distance(source),
        }
    }
}
