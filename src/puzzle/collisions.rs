use rustc_hash::FxHashSet;

use crate::core::coord::Coord;
use crate::core::position::Position;
use crate::puzzle::{Action, NUM_ACTIONS};

pub type PositionSet = FxHashSet<Position>;

/// Pixels of a single object, relative to the object's own origin.
pub type PixelSet = FxHashSet<Coord>;

/// Precomputed collision predicates for every (action, object) pair.
///
/// Membership tests against these sets are the only collision checks the
/// physics step performs; all pixel geometry is resolved once, when a puzzle
/// is constructed.
#[derive(Debug, Clone, Default)]
pub struct ObjectCollisions {
    // statics[action][object]: positions at which moving the object in the
    // action's direction hits a static obstacle.
    statics: Vec<Vec<PositionSet>>,
    // dynamics[action][pusher][pushee]: relative positions
    // `pos(pusher) - pos(pushee)` at which moving the pusher in the action's
    // direction pushes the pushee.
    dynamics: Vec<Vec<Vec<PositionSet>>>,
}

impl ObjectCollisions {
    /// An empty table; call [`ObjectCollisions::resize`] before use.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates collision sets for `num_objects` objects.
    pub fn with_num_objects(num_objects: usize) -> Self {
        let mut collisions = Self::default();
        collisions.resize(num_objects);
        collisions
    }

    /// Widens the tables to hold `num_objects` objects.
    ///
    /// Resizing never shrinks: per-action entries beyond a smaller
    /// `num_objects` are left in place.
    pub fn resize(&mut self, num_objects: usize) {
        self.statics.resize(NUM_ACTIONS, Vec::new());
        self.dynamics.resize(NUM_ACTIONS, Vec::new());

        for a in 0..NUM_ACTIONS {
            if self.statics[a].len() < num_objects {
                self.statics[a].resize(num_objects, PositionSet::default());
            }
            if self.dynamics[a].len() < num_objects {
                self.dynamics[a].resize(num_objects, Vec::new());
            }
            for pushee_sets in &mut self.dynamics[a] {
                if pushee_sets.len() < num_objects {
                    pushee_sets.resize(num_objects, PositionSet::default());
                }
            }
        }
    }

    pub fn num_objects(&self) -> usize {
        self.statics.first().map_or(0, Vec::len)
    }

    /// Positions of `object` at which `action` collides with a static
    /// obstacle.
    #[inline]
    pub fn static_collisions(&self, action: Action, object: usize) -> &PositionSet {
        &self.statics[action.index()][object]
    }

    #[inline]
    pub fn static_collisions_mut(&mut self, action: Action, object: usize) -> &mut PositionSet {
        &mut self.statics[action.index()][object]
    }

    /// Relative positions `pos(pusher) - pos(pushee)` at which moving
    /// `pusher` in the direction of `action` pushes `pushee`.
    #[inline]
    pub fn dynamic_collisions(&self, action: Action, pusher: usize, pushee: usize) -> &PositionSet {
        &self.dynamics[action.index()][pusher][pushee]
    }

    #[inline]
    pub fn dynamic_collisions_mut(
        &mut self,
        action: Action,
        pusher: usize,
        pushee: usize,
    ) -> &mut PositionSet {
        &mut self.dynamics[action.index()][pusher][pushee]
    }
}

/// After adding `offset` to every pixel in `s1`, returns whether any of the
/// resulting pixels occur in `s2`.
fn pixels_overlap(s1: &PixelSet, s2: &PixelSet, offset: Coord) -> bool {
    s1.iter().any(|&p| s2.contains(&(p + offset)))
}

/// The exclusive upper-bound corner of an object's pixel bounding box.
pub(crate) fn object_size(pixels: &PixelSet) -> Coord {
    let mut size = Coord::ORIGIN;
    for &pixel in pixels {
        size.x = size.x.max(pixel.x + 1);
        size.y = size.y.max(pixel.y + 1);
    }
    size
}

/// Computes all positions of a pusher relative to a pushee at which moving
/// the pusher one step in the direction of `action` collides with (pushes)
/// the pushee.
///
/// Both pixel sets are measured in their own object's frame. A relative
/// position only counts as a push when the two objects do not already
/// overlap there: contact must be purely adjacent.
pub(crate) fn populate_collisions(
    collisions: &mut PositionSet,
    action: Action,
    pusher_pixels: &PixelSet,
    pushee_pixels: &PixelSet,
) {
    let step = action.step();
    let mut relative_positions: PixelSet = PixelSet::default();

    for &pusher_px in pusher_pixels {
        for &pushee_px in pushee_pixels {
            relative_positions.insert(pushee_px - (pusher_px + step));
        }
    }

    for &relative_position in &relative_positions {
        if !pixels_overlap(pusher_pixels, pushee_pixels, relative_position) {
            collisions.insert(Position::from_coord(relative_position));
        }
    }
}

/// Identical to [`populate_collisions`] except that relative positions are
/// also required to keep every pusher pixel inside `[0, width) x [0, height)`
/// after the move.
///
/// Used for static collisions, where the "pushee" is the wall set anchored at
/// the grid origin.
pub(crate) fn populate_bounded_collisions(
    collisions: &mut PositionSet,
    action: Action,
    pusher_pixels: &PixelSet,
    pushee_pixels: &PixelSet,
    width: i32,
    height: i32,
) {
    let step = action.step();
    let mut relative_positions: PixelSet = PixelSet::default();

    // If the pusher has size 1, `max_x` is `width - 1`, so `x <= max_x` is
    // the integer form of `x < width`.
    let pusher_size = object_size(pusher_pixels);
    let max_x = width - pusher_size.x;
    let max_y = height - pusher_size.y;

    for &pusher_px in pusher_pixels {
        for &pushee_px in pushee_pixels {
            relative_positions.insert(pushee_px - (pusher_px + step));
        }
    }

    for &relative_position in &relative_positions {
        if relative_position.x >= 0
            && relative_position.y >= 0
            && relative_position.x <= max_x
            && relative_position.y <= max_y
            && !pixels_overlap(pusher_pixels, pushee_pixels, relative_position)
        {
            collisions.insert(Position::from_coord(relative_position));
        }
    }
}
