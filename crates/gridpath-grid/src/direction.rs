use std::f64::consts::SQRT_2;

use enumset::EnumSetType;

/// One of the eight moves on an 8-connected grid.
///
/// North is towards row 0 (negative y), west towards column 0 (negative x).
#[derive(EnumSetType, Debug, Hash)]
pub enum Direction {
    North,
    West,
    South,
    East,
    NorthWest,
    SouthWest,
    SouthEast,
    NorthEast,
}

impl Direction {
    /// Unit step `(dx, dy)` of this direction.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::West => (-1, 0),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::NorthWest => (-1, -1),
            Direction::SouthWest => (-1, 1),
            Direction::SouthEast => (1, 1),
            Direction::NorthEast => (1, -1),
        }
    }

    /// Direction of a unit step, or `None` for `(0, 0)` and non-unit offsets.
    pub fn from_offset(dx: i32, dy: i32) -> Option<Direction> {
        match (dx, dy) {
            (0, -1) => Some(Direction::North),
            (-1, 0) => Some(Direction::West),
            (0, 1) => Some(Direction::South),
            (1, 0) => Some(Direction::East),
            (-1, -1) => Some(Direction::NorthWest),
            (-1, 1) => Some(Direction::SouthWest),
            (1, 1) => Some(Direction::SouthEast),
            (1, -1) => Some(Direction::NorthEast),
            _ => None,
        }
    }

    pub fn is_diagonal(self) -> bool {
        let (dx, dy) = self.offset();
        dx != 0 && dy != 0
    }

    /// Edge cost of a single step: 1 orthogonally, √2 diagonally.
    pub fn cost(self) -> f64 {
        if self.is_diagonal() {
            SQRT_2
        } else {
            1.0
        }
    }
}
