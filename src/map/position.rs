/// Represents the location of a single cell in a 2D grid
///
/// Coordinates are signed so that positions just outside the grid (used when
/// probing neighbors) can be represented; a [`Selection`](crate::Selection)
/// only ever stores in-bounds positions.
///
/// The `Ord` impl orders positions in row-major scan order (top to bottom,
/// then left to right).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub y: i32,
    pub x: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    /// Returns the Euclidean distance from this position to another position
    pub fn distance_to(self, other: Position) -> f64 {
        let dx = (other.x - self.x) as f64;
        let dy = (other.y - self.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }
}
