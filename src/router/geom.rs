use std::fmt;

/// A point on the canvas, in real (unscaled) coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Point {
        Point { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Index of a node in the per-request grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeCoordinate {
    pub column: usize,
    pub row: usize,
}

impl NodeCoordinate {
    pub fn new(column: usize, row: usize) -> NodeCoordinate {
        NodeCoordinate { column, row }
    }

    /// Coordinate one step towards `dir`, or `None` when that would leave
    /// the non-negative quadrant. Upper bounds are checked by the grid.
    pub fn step(self, dir: Direction) -> Option<NodeCoordinate> {
        match dir {
            Direction::Left => self.column.checked_sub(1).map(|column| NodeCoordinate {
                column,
                row: self.row,
            }),
            Direction::Up => self.row.checked_sub(1).map(|row| NodeCoordinate {
                column: self.column,
                row,
            }),
            Direction::Right => Some(NodeCoordinate {
                column: self.column + 1,
                row: self.row,
            }),
            Direction::Down => Some(NodeCoordinate {
                column: self.column,
                row: self.row + 1,
            }),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Up,
    Right,
    Down,
}

impl Direction {
    /// Neighbor expansion order used by the search.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Up,
        Direction::Right,
        Direction::Down,
    ];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }
}

/// Extent of one committed segment along the axis perpendicular to the
/// coordinate it lies on. Always `low <= high`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SortedInterval {
    low: f64,
    high: f64,
}

impl SortedInterval {
    pub fn new(a: f64, b: f64) -> SortedInterval {
        if a < b {
            SortedInterval { low: a, high: b }
        } else {
            SortedInterval { low: b, high: a }
        }
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    /// True when `value` lies in the open interval `(low, high)`.
    pub fn strictly_contains(&self, value: f64) -> bool {
        value > self.low && value < self.high
    }
}
