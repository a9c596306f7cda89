use crate::core::coord::Coord;

/// Every x and y coordinate of a position must stay below this limit. The
/// value 10 000 keeps the packed representation readable when printed.
pub const POSITION_LIMIT: i32 = 10_000;

/// A board position packed into a single `i32` as `x * POSITION_LIMIT + y`.
///
/// We use it to keep states hashable and cheap to compare. Displacements are
/// positions too: they compose with ordinary integer addition, so
/// `Position::from_xy(x, y) + Position::from_xy(dx, dy)` equals
/// `Position::from_xy(x + dx, y + dy)` for in-range values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position(i32);

impl Position {
    #[inline]
    pub const fn from_xy(x: i32, y: i32) -> Position {
        Position(x * POSITION_LIMIT + y)
    }

    #[inline]
    pub fn from_coord(c: Coord) -> Position {
        Position::from_xy(c.x, c.y)
    }

    /// Unpacks into separate x and y values.
    ///
    /// Assumes both coordinates are non-negative, so this cannot invert a
    /// signed displacement back into its original (dx, dy).
    #[inline]
    pub fn xy(self) -> (i32, i32) {
        (self.0 / POSITION_LIMIT, self.0 % POSITION_LIMIT)
    }

    /// Raw packed representation of this position.
    #[inline]
    pub fn raw(self) -> i32 {
        self.0
    }
}

impl std::ops::Add for Position {
    type Output = Position;

    #[inline]
    fn add(self, rhs: Position) -> Position {
        Position(self.0 + rhs.0)
    }
}

impl std::ops::Sub for Position {
    type Output = Position;

    #[inline]
    fn sub(self, rhs: Position) -> Position {
        Position(self.0 - rhs.0)
    }
}
