use std::path::PathBuf;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use pushworld::heuristics::Heuristic;
use pushworld::puzzle::{Action, Plan, Puzzle, RelativeState, StateSet};
use pushworld::search::actions::RandomActionIterator;
use pushworld::search::queue::{BucketQueue, FibonacciQueue, PriorityQueue};
use pushworld::search::{best_first_search, solve, solve_with_visited, PlannerMode};

fn puzzle_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/puzzles")
        .join(name)
}

/// Always estimates zero cost to the goal.
struct NullHeuristic;

impl Heuristic for NullHeuristic {
    type Cost = f32;

    fn estimate_cost_to_goal(&mut self, _relative_state: &RelativeState) -> f32 {
        0.0
    }
}

/// Sum of Manhattan distances of each goal object from its goal position.
struct ManhattanDistance {
    goal: pushworld::puzzle::Goal,
}

impl Heuristic for ManhattanDistance {
    type Cost = f32;

    fn estimate_cost_to_goal(&mut self, relative_state: &RelativeState) -> f32 {
        let mut cost = 0;
        for (i, goal_position) in self.goal.iter().enumerate() {
            let (gx, gy) = goal_position.xy();
            let (x, y) = relative_state.state[i + 1].xy();
            cost += (gx - x).abs() + (gy - y).abs();
        }
        cost as f32
    }
}

fn exercise_queue(queue: &mut dyn PriorityQueue<&'static str, i32>) {
    assert!(queue.is_empty());
    assert_eq!(queue.len(), 0);

    queue.push("foo", 1);
    queue.push("bar", 2);
    queue.push("foo", 3);
    queue.push("baz", 2);

    assert!(!queue.is_empty());
    assert_eq!(queue.len(), 4);

    assert_eq!(queue.top(), Some(&"foo"));
    assert_eq!(queue.min_priority(), Some(&1));

    assert_eq!(queue.pop(), Some("foo"));
    assert_eq!(queue.len(), 3);

    let elem = queue.pop().unwrap();
    assert!(elem == "baz" || elem == "bar");

    let other_elem = queue.pop().unwrap();
    assert!(other_elem == "baz" || other_elem == "bar");
    assert_ne!(elem, other_elem);

    assert_eq!(queue.top(), Some(&"foo"));
    assert_eq!(queue.min_priority(), Some(&3));
    assert_eq!(queue.len(), 1);

    queue.clear();
    assert!(queue.is_empty());
    assert_eq!(queue.len(), 0);
    assert_eq!(queue.pop(), None);
    assert_eq!(queue.top(), None);
    assert_eq!(queue.min_priority(), None);

    // The queue stays usable after clearing.
    queue.push("qux", 7);
    assert_eq!(queue.pop(), Some("qux"));
    assert_eq!(queue.pop(), None);
}

#[test]
fn both_priority_queues_agree_on_the_contract() {
    let mut fibonacci: FibonacciQueue<&'static str, i32> = FibonacciQueue::new();
    exercise_queue(&mut fibonacci);
    let mut bucket: BucketQueue<&'static str, i32> = BucketQueue::new();
    exercise_queue(&mut bucket);
}

#[test]
fn fibonacci_queue_orders_float_priorities() {
    let mut queue: FibonacciQueue<usize, f32> = FibonacciQueue::new();
    queue.push(0, 2.5);
    queue.push(1, f32::INFINITY);
    queue.push(2, 0.5);
    queue.push(3, 1.0);

    assert_eq!(queue.pop(), Some(2));
    assert_eq!(queue.pop(), Some(3));
    assert_eq!(queue.pop(), Some(0));
    assert_eq!(queue.pop(), Some(1));
    assert_eq!(queue.pop(), None);
}

#[test]
fn queues_drain_in_priority_order_under_load() {
    let mut fibonacci: FibonacciQueue<i32, i32> = FibonacciQueue::new();
    let mut bucket: BucketQueue<i32, i32> = BucketQueue::new();

    // A fixed pseudo-random-ish interleaving with many duplicate priorities.
    let priorities: Vec<i32> = (0..200).map(|i| (i * 37 + 11) % 23).collect();
    for &priority in &priorities {
        fibonacci.push(priority, priority);
        bucket.push(priority, priority);
    }

    let mut sorted = priorities.clone();
    sorted.sort_unstable();

    for &expected in &sorted {
        assert_eq!(*fibonacci.min_priority().unwrap(), expected);
        assert_eq!(fibonacci.pop(), Some(expected));
        assert_eq!(*bucket.min_priority().unwrap(), expected);
        assert_eq!(bucket.pop(), Some(expected));
    }
    assert!(fibonacci.is_empty());
    assert!(bucket.is_empty());
}

#[test]
fn random_action_orders_are_roughly_uniform() {
    let num_action_groups = 240_000;
    let mut action_iter = RandomActionIterator::new(num_action_groups);

    let mut counts: FxHashMap<[Action; 4], u32> = FxHashMap::default();
    for _ in 0..num_action_groups {
        *counts.entry(*action_iter.next_group()).or_insert(0) += 1;
    }

    // There are 4! orderings of four actions.
    assert_eq!(counts.len(), 24);

    // Each ordering within 10% of uniform; the sample is large enough that
    // this bound sits at roughly ten standard deviations.
    let expected = num_action_groups as f64 / 24.0;
    for &count in counts.values() {
        assert!((count as f64) > 0.9 * expected);
        assert!((count as f64) < 1.1 * expected);
    }
}

#[test]
fn search_solves_an_easy_puzzle_with_a_guiding_heuristic() {
    let puzzle = Puzzle::from_file(puzzle_path("easy_search.pwp")).unwrap();
    let mut heuristic = ManhattanDistance {
        goal: puzzle.goal().clone(),
    };
    let mut frontier = FibonacciQueue::new();
    let mut visited = StateSet::default();

    let plan = best_first_search(&puzzle, &mut heuristic, &mut frontier, &mut visited)
        .unwrap()
        .expect("a plan exists");
    assert_eq!(plan.len(), 3);
    assert!(puzzle.is_valid_plan(&plan));
    assert!(!visited.is_empty());
}

#[test]
fn search_reports_no_solution_after_exhausting_nine_states() {
    let puzzle = Puzzle::from_file(puzzle_path("no_solution.pwp")).unwrap();
    let mut heuristic = NullHeuristic;
    let mut frontier = FibonacciQueue::new();
    let mut visited = StateSet::default();

    let plan = best_first_search(&puzzle, &mut heuristic, &mut frontier, &mut visited).unwrap();
    assert!(plan.is_none());
    assert!(frontier.is_empty());

    // The movable is sealed off, so the reachable space is exactly the nine
    // agent cells.
    assert_eq!(visited.len(), 9);
}

#[test]
fn search_finds_the_unique_plan_of_a_one_way_corridor() {
    // Every action other than pushing right is a wall collision, so any
    // search must return exactly this plan.
    let puzzle = Puzzle::from_file(puzzle_path("corridor.pwp")).unwrap();
    let mut heuristic = NullHeuristic;
    let mut frontier = FibonacciQueue::new();
    let mut visited = StateSet::default();

    let plan = best_first_search(&puzzle, &mut heuristic, &mut frontier, &mut visited)
        .unwrap()
        .expect("a plan exists");
    assert_eq!(plan, vec![Action::Right, Action::Right]);
}

#[test]
fn both_planner_modes_solve_the_trivial_puzzle() {
    let puzzle = Rc::new(Puzzle::from_file(puzzle_path("trivial.pwp")).unwrap());

    for mode in [PlannerMode::Rgd, PlannerMode::NoveltyRgd] {
        let plan = solve(&puzzle, mode).unwrap().expect("a plan exists");
        assert!(puzzle.is_valid_plan(&plan));
    }
}

#[test]
fn search_disproves_an_optimistically_estimated_puzzle() {
    // The movement graphs are one-sided: they ignore where other objects
    // actually are, so the RGD estimate for this puzzle is finite even
    // though the tool's front cell ends up clogging the only doorway in
    // every line of play. The search settles the question by exhausting the
    // reachable states.
    let puzzle = Rc::new(Puzzle::from_file(puzzle_path("shortest_path_tool.pwp")).unwrap());

    let mut visited = StateSet::default();
    let plan = solve_with_visited(&puzzle, PlannerMode::Rgd, &mut visited).unwrap();
    assert_eq!(plan, None);
    assert!(!visited.is_empty());
}

#[test]
fn planner_reports_no_solution() {
    let puzzle = Rc::new(Puzzle::from_file(puzzle_path("no_solution.pwp")).unwrap());

    for mode in [PlannerMode::Rgd, PlannerMode::NoveltyRgd] {
        assert_eq!(solve(&puzzle, mode).unwrap(), None);
    }
}

#[test]
fn an_already_satisfied_goal_yields_the_empty_plan() {
    // A puzzle whose movable starts on its goal.
    let dir = std::env::temp_dir();
    let path = dir.join("pushworld_satisfied.pwp");
    std::fs::write(&path, "a m0+g0 .\n").unwrap();

    let puzzle = Rc::new(Puzzle::from_file(&path).unwrap());
    assert!(puzzle.satisfies_goal(puzzle.initial_state()));

    let plan = solve(&puzzle, PlannerMode::Rgd).unwrap();
    assert_eq!(plan, Some(Plan::new()));
}

#[test]
fn mode_names_parse_and_reject() {
    assert_eq!("RGD".parse::<PlannerMode>().unwrap(), PlannerMode::Rgd);
    assert_eq!(
        "N+RGD".parse::<PlannerMode>().unwrap(),
        PlannerMode::NoveltyRgd
    );
    assert!(matches!(
        "BFS".parse::<PlannerMode>(),
        Err(pushworld::error::PlannerError::InvalidArgument { .. })
    ));
}
