//! Puzzle state, actions and the deterministic pushing physics.
//!
//! A state is the vector of all object positions; index 0 is the agent, the
//! only object that actions control directly. Everything else moves by being
//! pushed, possibly through chains of contact. The one physics rule with
//! teeth is *transitive stopping*: if any object in a contact chain would hit
//! a static obstacle, nothing moves at all.

pub mod collisions;
mod parse;

use std::path::Path;

use rustc_hash::FxHashSet;

use crate::core::coord::{Coord, CARDINAL_STEPS};
use crate::core::position::Position;
use crate::error::PlannerError;
use crate::puzzle::collisions::ObjectCollisions;

/// Index of the agent in every [`State`].
pub const AGENT: usize = 0;

/// The number of available actions.
pub const NUM_ACTIONS: usize = 4;

/// A movement of the agent one cell in a cardinal direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Left,
    Right,
    Up,
    Down,
}

impl Action {
    pub const ALL: [Action; NUM_ACTIONS] = [Action::Left, Action::Right, Action::Up, Action::Down];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Action::Left => 0,
            Action::Right => 1,
            Action::Up => 2,
            Action::Down => 3,
        }
    }

    /// The pixel-space step this action causes.
    #[inline]
    pub fn step(self) -> Coord {
        CARDINAL_STEPS[self.index()]
    }

    /// The packed-position displacement this action causes.
    #[inline]
    pub fn displacement(self) -> Position {
        let step = self.step();
        Position::from_xy(step.x, step.y)
    }

    /// The inverse of [`Action::displacement`].
    pub fn from_displacement(displacement: Position) -> Option<Action> {
        Action::ALL
            .into_iter()
            .find(|a| a.displacement() == displacement)
    }

    /// Single-character encoding used in printed plans.
    #[inline]
    pub fn as_char(self) -> char {
        match self {
            Action::Left => 'L',
            Action::Right => 'R',
            Action::Up => 'U',
            Action::Down => 'D',
        }
    }
}

/// The positions of all objects, one per object; index [`AGENT`] first.
pub type State = Vec<Position>;

/// All states encountered during a search.
pub type StateSet = FxHashSet<State>;

/// Desired positions for one or more objects: `goal[i]` constrains
/// `state[i + 1]`. The agent never has a goal position.
pub type Goal = Vec<Position>;

/// A sequence of actions, usually transforming the initial state into one
/// that satisfies the goal.
pub type Plan = Vec<Action>;

/// Renders a plan in its single-character encoding, e.g. `"RDRU"`.
pub fn plan_to_string(plan: &[Action]) -> String {
    plan.iter().map(|a| a.as_char()).collect()
}

/// A state together with the indices of the objects whose positions differ
/// from the immediately preceding state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelativeState {
    pub state: State,
    pub moved_object_indices: Vec<usize>,
}

/// An immutable PushWorld puzzle: initial state, goal, and the collision
/// tables that define its physics.
#[derive(Debug, Clone)]
pub struct Puzzle {
    initial_state: State,
    num_objects: usize,
    goal: Goal,
    object_collisions: ObjectCollisions,
}

impl Puzzle {
    /// Loads a puzzle from a `.pwp` file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Puzzle, PlannerError> {
        let parsed = parse::parse_puzzle_file(path.as_ref())?;
        Ok(Puzzle::new(
            parsed.initial_state,
            parsed.goal,
            parsed.collisions,
        ))
    }

    /// Constructs a puzzle from its parts. Movements are constrained by the
    /// given collision tables.
    pub fn new(initial_state: State, goal: Goal, object_collisions: ObjectCollisions) -> Puzzle {
        let num_objects = initial_state.len();
        Puzzle {
            initial_state,
            num_objects,
            goal,
            object_collisions,
        }
    }

    pub fn initial_state(&self) -> &State {
        &self.initial_state
    }

    pub fn goal(&self) -> &Goal {
        &self.goal
    }

    pub fn object_collisions(&self) -> &ObjectCollisions {
        &self.object_collisions
    }

    /// Computes the state that results from performing `action` in `state`.
    ///
    /// The returned moved indices are the objects whose positions changed;
    /// when a collision prevents movement the state is returned unchanged
    /// with no moved indices.
    pub fn next_state(&self, state: &State, action: Action) -> RelativeState {
        let agent_position = state[AGENT];

        if self
            .object_collisions
            .static_collisions(action, AGENT)
            .contains(&agent_position)
        {
            // The agent cannot move.
            return RelativeState {
                state: state.clone(),
                moved_object_indices: Vec::new(),
            };
        }

        // The frontier holds moved objects not yet checked for whether they
        // push others; `pushed` marks everything known to move.
        let mut pushed = vec![false; self.num_objects];
        pushed[AGENT] = true;
        let mut frontier = Vec::with_capacity(self.num_objects);
        frontier.push(AGENT);

        while let Some(object_idx) = frontier.pop() {
            let object_position = state[object_idx];

            for obstacle_idx in 1..self.num_objects {
                if pushed[obstacle_idx] {
                    continue;
                }

                let obstacle_position = state[obstacle_idx];
                let relative_position = object_position - obstacle_position;

                if self
                    .object_collisions
                    .dynamic_collisions(action, object_idx, obstacle_idx)
                    .contains(&relative_position)
                {
                    if self
                        .object_collisions
                        .static_collisions(action, obstacle_idx)
                        .contains(&obstacle_position)
                    {
                        // Transitive stopping: nothing can move.
                        return RelativeState {
                            state: state.clone(),
                            moved_object_indices: Vec::new(),
                        };
                    }

                    pushed[obstacle_idx] = true;
                    frontier.push(obstacle_idx);
                }
            }
        }

        let displacement = action.displacement();
        let mut next = Vec::with_capacity(self.num_objects);
        let mut moved_object_indices = Vec::new();

        for (i, &position) in state.iter().enumerate() {
            if pushed[i] {
                next.push(position + displacement);
                moved_object_indices.push(i);
            } else {
                next.push(position);
            }
        }

        RelativeState {
            state: next,
            moved_object_indices,
        }
    }

    /// Returns whether `state` satisfies the goal of this puzzle.
    pub fn satisfies_goal(&self, state: &State) -> bool {
        self.goal
            .iter()
            .enumerate()
            .all(|(i, &goal_position)| state[i + 1] == goal_position)
    }

    /// Returns whether performing all actions in `plan` from the initial
    /// state ends in a state that satisfies the goal.
    pub fn is_valid_plan(&self, plan: &[Action]) -> bool {
        let mut state = self.initial_state.clone();
        for &action in plan {
            state = self.next_state(&state, action).state;
        }
        self.satisfies_goal(&state)
    }
}
