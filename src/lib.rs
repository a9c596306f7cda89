//! # pushworld
//!
//! A planner for PushWorld pushing puzzles: an agent moves on a grid and
//! pushes movable objects, directly or through chains of contact, until
//! every goal object reaches its goal position.
//!
//! ## Architecture
//!
//! The codebase is structured as layered components:
//!
//! - [`core`]: allocation-free primitives ([`core::coord::Coord`] pixels and
//!   the packed [`core::position::Position`]).
//! - [`puzzle`]: the deterministic physics: collision tables derived from
//!   object pixels, the transitive-stopping `next_state` step, goal checks,
//!   and the `.pwp` file parser.
//! - [`heuristics`]: cost-to-goal estimators; per-object feasible movement
//!   graphs with lazy path distances, the recursive graph distance (RGD)
//!   heuristic built on them, a novelty heuristic, and weighted combination.
//! - [`search`]: best-first search over states, priority queues (Fibonacci
//!   and bucket variants), and randomized action ordering.
//! - [`solution`]: serializable result manifests for benchmark sweeps.
//!
//! ## Quick start
//!
//! ```no_run
//! use std::rc::Rc;
//! use pushworld::puzzle::{plan_to_string, Puzzle};
//! use pushworld::search::{solve, PlannerMode};
//!
//! let puzzle = Rc::new(Puzzle::from_file("tests/puzzles/trivial.pwp")?);
//! match solve(&puzzle, PlannerMode::Rgd)? {
//!     Some(plan) => println!("{}", plan_to_string(&plan)),
//!     None => println!("NO SOLUTION"),
//! }
//! # Ok::<(), pushworld::error::PlannerError>(())
//! ```

pub mod core;
pub mod error;
pub mod heuristics;
pub mod puzzle;
pub mod search;
pub mod solution;
