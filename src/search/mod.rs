//! Best-first search over puzzle states.

pub mod actions;
pub mod queue;

use std::rc::Rc;
use std::str::FromStr;

use crate::error::PlannerError;
use crate::heuristics::graph_distance::RecursiveGraphDistance;
use crate::heuristics::novelty::Novelty;
use crate::heuristics::weighted_sum::WeightedSum;
use crate::heuristics::Heuristic;
use crate::puzzle::{Action, Plan, Puzzle, RelativeState, State, StateSet};
use crate::search::actions::RandomActionIterator;
use crate::search::queue::{FibonacciQueue, PriorityQueue};

/// A node in the search tree; each node corresponds to one puzzle state and
/// links back to the parent whose expansion produced it.
///
/// The action leading from the parent's state to this one is deliberately
/// not stored: with only four actions it is cheaper to re-derive actions
/// once, while backtracking a solution, than to store one per node across
/// the whole search.
pub struct SearchNode {
    /// `None` for the root node.
    pub parent: Option<Rc<SearchNode>>,
    pub state: State,
}

/// Reconstructs the action sequence leading from the root ancestor of
/// `end_node` to `end_node` itself.
pub fn backtrack_plan(
    puzzle: &Puzzle,
    end_node: &Rc<SearchNode>,
) -> Result<Plan, PlannerError> {
    let mut plan = Plan::new();
    let mut node = end_node;

    while let Some(parent) = &node.parent {
        // Re-derive which action produced this transition.
        let action = Action::ALL
            .into_iter()
            .find(|&action| puzzle.next_state(&parent.state, action).state == node.state);

        match action {
            Some(action) => plan.push(action),
            None => {
                return Err(PlannerError::Internal {
                    reason: "a parent state exists for which no action can transition to \
                             the state of a child search node"
                        .to_string(),
                })
            }
        }

        node = parent;
    }

    plan.reverse();
    Ok(plan)
}

/// Searches for a plan by always expanding the frontier state with the
/// minimum estimated cost to the goal. Returns `None` if the goal is
/// unreachable.
///
/// `frontier` orders unexplored states by estimated cost; choosing its
/// implementation lets callers exploit the cost type (discrete or
/// continuous). `visited` collects every state encountered. Both are cleared
/// when the search begins.
pub fn best_first_search<C, H, Q>(
    puzzle: &Puzzle,
    heuristic: &mut H,
    frontier: &mut Q,
    visited: &mut StateSet,
) -> Result<Option<Plan>, PlannerError>
where
    H: Heuristic<Cost = C>,
    Q: PriorityQueue<Rc<SearchNode>, C>,
{
    let initial_state = puzzle.initial_state();

    if puzzle.satisfies_goal(initial_state) {
        return Ok(Some(Plan::new()));
    }

    let mut action_iterator = RandomActionIterator::default();

    visited.clear();
    visited.insert(initial_state.clone());

    // Every object counts as moved in the root state so that stateful
    // heuristics (novelty) observe the initial positions.
    let initial_relative_state = RelativeState {
        state: initial_state.clone(),
        moved_object_indices: (0..initial_state.len()).collect(),
    };
    let initial_cost = heuristic.estimate_cost_to_goal(&initial_relative_state);

    frontier.clear();
    frontier.push(
        Rc::new(SearchNode {
            parent: None,
            state: initial_relative_state.state,
        }),
        initial_cost,
    );

    while let Some(parent_node) = frontier.pop() {
        for &action in action_iterator.next_group() {
            let relative_state = puzzle.next_state(&parent_node.state, action);

            // Ignore the state if it was already visited.
            if visited.contains(&relative_state.state) {
                continue;
            }

            let node = Rc::new(SearchNode {
                parent: Some(Rc::clone(&parent_node)),
                state: relative_state.state.clone(),
            });

            if puzzle.satisfies_goal(&node.state) {
                // Return the first solution found.
                return backtrack_plan(puzzle, &node).map(Some);
            }

            let cost = heuristic.estimate_cost_to_goal(&relative_state);
            visited.insert(relative_state.state);
            frontier.push(node, cost);
        }
    }

    // The reachable state space is exhausted.
    Ok(None)
}

/// The heuristic configurations the planner binaries expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannerMode {
    /// The recursive graph distance heuristic.
    Rgd,
    /// Lexicographic combination of novelty over RGD: novelty weighted high
    /// enough (`1e6`) that RGD only breaks ties.
    NoveltyRgd,
}

impl PlannerMode {
    pub fn name(self) -> &'static str {
        match self {
            PlannerMode::Rgd => "RGD",
            PlannerMode::NoveltyRgd => "N+RGD",
        }
    }
}

impl FromStr for PlannerMode {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "RGD" => Ok(PlannerMode::Rgd),
            "N+RGD" => Ok(PlannerMode::NoveltyRgd),
            _ => Err(PlannerError::InvalidArgument {
                reason: format!("unrecognized mode: {s}"),
            }),
        }
    }
}

/// Solves `puzzle` with best-first search under the given mode, collecting
/// visited states into `visited`.
pub fn solve_with_visited(
    puzzle: &Rc<Puzzle>,
    mode: PlannerMode,
    visited: &mut StateSet,
) -> Result<Option<Plan>, PlannerError> {
    let mut frontier: FibonacciQueue<Rc<SearchNode>, f32> = FibonacciQueue::new();
    let rgd = RecursiveGraphDistance::new(Rc::clone(puzzle));

    match mode {
        PlannerMode::Rgd => {
            let mut heuristic = rgd;
            best_first_search(puzzle, &mut heuristic, &mut frontier, visited)
        }
        PlannerMode::NoveltyRgd => {
            // The maximum novelty is 3, so 1e6 keeps sub-integer precision in
            // an f32 while dominating every finite RGD cost.
            let novelty = Novelty::new(puzzle.initial_state().len());
            let mut heuristic = WeightedSum::new(vec![
                (Box::new(novelty) as Box<dyn Heuristic<Cost = f32>>, 1e6),
                (Box::new(rgd), 1.0),
            ])?;
            best_first_search(puzzle, &mut heuristic, &mut frontier, visited)
        }
    }
}

/// [`solve_with_visited`] without the visited-set argument.
pub fn solve(puzzle: &Rc<Puzzle>, mode: PlannerMode) -> Result<Option<Plan>, PlannerError> {
    let mut visited = StateSet::default();
    solve_with_visited(puzzle, mode, &mut visited)
}
