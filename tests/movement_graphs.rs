use std::path::PathBuf;

use rustc_hash::FxHashSet;

use pushworld::core::position::Position;
use pushworld::heuristics::movement_graph::{
    build_feasible_movement_graphs, FeasibleMovementGraph, PathDistances,
};
use pushworld::puzzle::{Action, Puzzle, StateSet, AGENT};

fn puzzle_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/puzzles")
        .join(name)
}

fn xy(x: i32, y: i32) -> Position {
    Position::from_xy(x, y)
}

fn graph_of(edges: &[((i32, i32), &[(i32, i32)])]) -> FeasibleMovementGraph {
    let mut graph = FeasibleMovementGraph::default();
    for ((x, y), ends) in edges {
        let ends: FxHashSet<Position> = ends.iter().map(|&(ex, ey)| xy(ex, ey)).collect();
        graph.insert(xy(*x, *y), ends);
    }
    graph
}

#[test]
fn trivial_movement_graphs_are_exact() {
    let puzzle = Puzzle::from_file(puzzle_path("trivial.pwp")).unwrap();
    let movement_graphs = build_feasible_movement_graphs(&puzzle);

    let agent_graph = graph_of(&[
        ((1, 2), &[(2, 2)]),
        ((2, 1), &[(2, 2), (3, 1)]),
        ((2, 2), &[(1, 2), (3, 2), (2, 1), (2, 3)]),
        ((2, 3), &[(2, 2), (3, 3)]),
        ((3, 1), &[(2, 1), (3, 2)]),
        ((3, 2), &[(3, 1), (3, 3), (2, 2)]),
        ((3, 3), &[(2, 3), (3, 2)]),
    ]);
    assert_eq!(*movement_graphs[AGENT], agent_graph);

    let m0_graph = graph_of(&[
        ((1, 2), &[]),
        ((1, 3), &[]),
        ((2, 1), &[]),
        ((2, 2), &[(1, 2), (3, 2), (2, 1), (2, 3)]),
        ((2, 3), &[(1, 3)]),
        ((3, 1), &[]),
        ((3, 2), &[(3, 1), (3, 3)]),
        ((3, 3), &[]),
    ]);
    assert_eq!(*movement_graphs[1], m0_graph);
}

#[test]
fn tool_puzzle_movement_graphs_are_exact() {
    let puzzle = Puzzle::from_file(puzzle_path("shortest_path_tool.pwp")).unwrap();
    let movement_graphs = build_feasible_movement_graphs(&puzzle);

    // Open cells reachable by the agent: nine corridor cells (the agent-only
    // wall splits the corridor), the two doorway cells, and two full rows.
    assert_eq!(movement_graphs[AGENT].len(), 31);
    assert!(!movement_graphs[AGENT].contains_key(&xy(5, 1)));

    // The goal object moves only inside the corridor: left as far as the
    // agent-only wall cell, right to the corner.
    let m1_graph = graph_of(&[
        ((5, 1), &[(6, 1)]),
        ((6, 1), &[(5, 1), (7, 1)]),
        ((7, 1), &[(6, 1), (8, 1)]),
        ((8, 1), &[(7, 1), (9, 1)]),
        ((9, 1), &[(8, 1), (10, 1)]),
        ((10, 1), &[]),
    ]);
    assert_eq!(*movement_graphs[1], m1_graph);

    // The tool shuttles along four corridor cells; its front pixel may sit
    // on the agent-only wall.
    let m2_graph = graph_of(&[
        ((2, 1), &[(3, 1)]),
        ((3, 1), &[(2, 1), (4, 1)]),
        ((4, 1), &[(3, 1), (5, 1)]),
        ((5, 1), &[(4, 1)]),
    ]);
    assert_eq!(*movement_graphs[2], m2_graph);
}

#[test]
fn movement_graphs_cover_every_reachable_transition() {
    // One-sided soundness: enumerate every reachable state of the trivial
    // puzzle and check that each observed single-step object movement is an
    // edge of that object's movement graph.
    let puzzle = Puzzle::from_file(puzzle_path("trivial.pwp")).unwrap();
    let movement_graphs = build_feasible_movement_graphs(&puzzle);

    let mut frontier = vec![puzzle.initial_state().clone()];
    let mut seen = StateSet::default();
    seen.insert(frontier[0].clone());

    while let Some(state) = frontier.pop() {
        for action in Action::ALL {
            let next = puzzle.next_state(&state, action);
            for &i in &next.moved_object_indices {
                let edges = movement_graphs[i]
                    .get(&state[i])
                    .unwrap_or_else(|| panic!("missing node for object {i}"));
                assert!(edges.contains(&next.state[i]));
            }
            if seen.insert(next.state.clone()) {
                frontier.push(next.state);
            }
        }
    }
}

#[test]
fn every_node_is_at_distance_zero_from_itself() {
    let puzzle = Puzzle::from_file(puzzle_path("trivial.pwp")).unwrap();
    let movement_graphs = build_feasible_movement_graphs(&puzzle);

    for graph in &movement_graphs {
        let mut distances = PathDistances::new(graph);
        for &position in graph.keys() {
            assert_eq!(distances.get_distance(position, position), 0.0);
        }
    }
}

#[test]
fn path_distances_match_known_values() {
    let puzzle = Puzzle::from_file(puzzle_path("trivial.pwp")).unwrap();
    let movement_graphs = build_feasible_movement_graphs(&puzzle);

    let mut agent_distances = PathDistances::new(&movement_graphs[AGENT]);
    let mut object_distances = PathDistances::new(&movement_graphs[1]);

    // Run every query twice to exercise the memoized expansions.
    for _ in 0..2 {
        assert_eq!(agent_distances.get_distance(xy(1, 2), xy(1, 2)), 0.0);
        assert_eq!(agent_distances.get_distance(xy(1, 2), xy(2, 2)), 1.0);
        assert_eq!(agent_distances.get_distance(xy(1, 2), xy(3, 3)), 3.0);
        assert_eq!(agent_distances.get_distance(xy(1, 2), xy(3, 1)), 3.0);
        assert_eq!(agent_distances.get_distance(xy(2, 3), xy(3, 1)), 3.0);
        assert_eq!(agent_distances.get_distance(xy(2, 3), xy(2, 2)), 1.0);
        assert_eq!(agent_distances.get_distance(xy(2, 3), xy(2, 3)), 0.0);

        // (1, 1) is a wall: unreachable in either direction.
        assert_eq!(
            agent_distances.get_distance(xy(1, 1), xy(2, 3)),
            f32::INFINITY
        );
        assert_eq!(
            agent_distances.get_distance(xy(2, 2), xy(1, 1)),
            f32::INFINITY
        );
        // The agent-only wall at (1, 3) is unreachable too.
        assert_eq!(
            agent_distances.get_distance(xy(3, 1), xy(1, 3)),
            f32::INFINITY
        );

        assert_eq!(object_distances.get_distance(xy(2, 2), xy(3, 1)), 2.0);
        assert_eq!(object_distances.get_distance(xy(2, 2), xy(1, 3)), 2.0);
        assert_eq!(object_distances.get_distance(xy(2, 2), xy(3, 3)), 2.0);
        assert_eq!(object_distances.get_distance(xy(2, 2), xy(2, 3)), 1.0);
        assert_eq!(object_distances.get_distance(xy(3, 2), xy(3, 1)), 1.0);
        assert_eq!(object_distances.get_distance(xy(3, 1), xy(3, 1)), 0.0);

        // Movement-graph sinks cannot be escaped.
        assert_eq!(
            object_distances.get_distance(xy(2, 1), xy(3, 1)),
            f32::INFINITY
        );
        assert_eq!(
            object_distances.get_distance(xy(1, 2), xy(1, 3)),
            f32::INFINITY
        );
        assert_eq!(
            object_distances.get_distance(xy(3, 1), xy(2, 2)),
            f32::INFINITY
        );
    }
}
