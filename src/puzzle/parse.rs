use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::core::coord::Coord;
use crate::core::position::{Position, POSITION_LIMIT};
use crate::error::PlannerError;
use crate::puzzle::collisions::{
    populate_bounded_collisions, populate_collisions, ObjectCollisions, PixelSet,
};
use crate::puzzle::{Action, Goal, State, AGENT};

const AGENT_ID: &str = "a";
const WALL_ID: &str = "w";
const AGENT_WALL_ID: &str = "aw";

pub(crate) struct ParsedPuzzle {
    pub initial_state: State,
    pub goal: Goal,
    pub collisions: ObjectCollisions,
}

fn invalid(reason: impl Into<String>) -> PlannerError {
    PlannerError::InvalidPuzzle {
        reason: reason.into(),
    }
}

/// Returns whether `id` is a legal cell token: the agent, a wall, an
/// agent-only wall, or a movable/goal with a non-empty identifier.
fn is_known_token(id: &str) -> bool {
    match id {
        AGENT_ID | WALL_ID | AGENT_WALL_ID => true,
        _ => id.len() > 1 && (id.starts_with('m') || id.starts_with('g')),
    }
}

/// The component-wise minimum over an object's pixels.
fn object_position(pixels: &PixelSet) -> Coord {
    let mut position = Coord::new(i32::MAX, i32::MAX);
    for &pixel in pixels {
        position.x = position.x.min(pixel.x);
        position.y = position.y.min(pixel.y);
    }
    position
}

/// Subtracts the position from every pixel, making them object-relative.
fn offset_object_pixels(pixels: &PixelSet, position: Coord) -> PixelSet {
    pixels.iter().map(|&pixel| pixel - position).collect()
}

/// Parses a `.pwp` puzzle file into an initial state, goal and collision
/// tables.
///
/// Grid cells are separated by runs of spaces; entities within one cell are
/// joined with `+`. An implicit one-cell wall border is added around the
/// grid. Object order in the state is: the agent, then the movables with
/// goals (by goal token), then the remaining movables (by token).
pub(crate) fn parse_puzzle_file(path: &Path) -> Result<ParsedPuzzle, PlannerError> {
    let text = fs::read_to_string(path).map_err(|e| PlannerError::Io {
        path: path.display().to_string(),
        error: e.to_string(),
    })?;

    // Collect every entity's pixels. BTreeMap keeps entity ids sorted, which
    // fixes the object order in the state.
    let mut obj_pixels: BTreeMap<String, PixelSet> = BTreeMap::new();
    let mut elems_per_row = 0usize;
    let mut num_rows = 0i32;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let y = num_rows + 1;

        let cells: Vec<&str> = line.split_whitespace().collect();
        if num_rows == 0 {
            elems_per_row = cells.len();
        } else if cells.len() != elems_per_row {
            return Err(invalid("rows do not contain the same number of cells"));
        }

        for (i, cell) in cells.iter().enumerate() {
            let x = i as i32 + 1;
            for token in cell.split('+') {
                let id = token.to_lowercase();
                if id == "." {
                    continue;
                }
                if !is_known_token(&id) {
                    return Err(invalid(format!("unknown cell token: {token:?}")));
                }
                obj_pixels.entry(id).or_default().insert(Coord::new(x, y));
            }
        }
        num_rows += 1;
    }

    if !obj_pixels.contains_key(AGENT_ID) {
        return Err(invalid(
            "every puzzle must have an agent object whose pixels are indicated by 'a'",
        ));
    }

    // One-cell border on every side.
    let width = elems_per_row as i32 + 2;
    let height = num_rows + 2;

    if width >= POSITION_LIMIT || height >= POSITION_LIMIT {
        return Err(invalid(format!(
            "the maximum width and height of a puzzle is {POSITION_LIMIT}"
        )));
    }

    let walls = obj_pixels.entry(WALL_ID.to_string()).or_default();
    for x in 0..width {
        walls.insert(Coord::new(x, 0));
        walls.insert(Coord::new(x, height - 1));
    }
    for y in 0..height {
        walls.insert(Coord::new(0, y));
        walls.insert(Coord::new(width - 1, y));
    }

    // Compute the origin of every non-wall entity and make its pixels
    // object-relative.
    let mut object_positions: BTreeMap<String, Coord> = BTreeMap::new();
    let ids: Vec<String> = obj_pixels.keys().cloned().collect();
    for id in &ids {
        if id != WALL_ID && id != AGENT_WALL_ID {
            let position = object_position(&obj_pixels[id]);
            object_positions.insert(id.clone(), position);
            let offset = offset_object_pixels(&obj_pixels[id], position);
            obj_pixels.insert(id.clone(), offset);
        }
    }

    // The agent comes first, then goal movables in goal-token order.
    let mut objects: Vec<String> = vec![AGENT_ID.to_string()];
    let mut goals: Vec<String> = Vec::new();

    for id in &ids {
        if let Some(suffix) = id.strip_prefix('g') {
            let movable_id = format!("m{suffix}");
            if !obj_pixels.contains_key(&movable_id) {
                return Err(invalid(format!(
                    "goal has no associated movable object: {movable_id}"
                )));
            }
            goals.push(id.clone());
            objects.push(movable_id);
        }
    }

    let goal: Goal = goals.iter().map(|id| Position::from_coord(object_positions[id])).collect();

    // Remaining movables without goals.
    for id in &ids {
        if id.starts_with('m') && !objects.contains(id) {
            objects.push(id.clone());
        }
    }

    let num_objects = objects.len();
    let initial_state: State = objects
        .iter()
        .map(|id| Position::from_coord(object_positions[id]))
        .collect();

    let mut collisions = ObjectCollisions::with_num_objects(num_objects);

    // Walls for the agent include both 'aw' and 'w' pixels.
    let wall_pixels = obj_pixels[WALL_ID].clone();
    let agent_walls = obj_pixels.entry(AGENT_WALL_ID.to_string()).or_default();
    for &pixel in &wall_pixels {
        agent_walls.insert(pixel);
    }
    let agent_wall_pixels = obj_pixels[AGENT_WALL_ID].clone();

    for action in Action::ALL {
        populate_bounded_collisions(
            collisions.static_collisions_mut(action, AGENT),
            action,
            &obj_pixels[AGENT_ID],
            &agent_wall_pixels,
            width,
            height,
        );
    }

    for (m, id) in objects.iter().enumerate().skip(1) {
        for action in Action::ALL {
            populate_bounded_collisions(
                collisions.static_collisions_mut(action, m),
                action,
                &obj_pixels[id],
                &wall_pixels,
                width,
                height,
            );
        }
    }

    // Pairwise pushing collisions. Nothing ever pushes the agent, so it
    // never appears as a pushee.
    for (pusher, pusher_id) in objects.iter().enumerate() {
        for (pushee, pushee_id) in objects.iter().enumerate().skip(1) {
            if pusher == pushee {
                continue;
            }
            for action in Action::ALL {
                populate_collisions(
                    collisions.dynamic_collisions_mut(action, pusher, pushee),
                    action,
                    &obj_pixels[pusher_id],
                    &obj_pixels[pushee_id],
                );
            }
        }
    }

    Ok(ParsedPuzzle {
        initial_state,
        goal,
        collisions,
    })
}
