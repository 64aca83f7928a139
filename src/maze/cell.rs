use std::fmt;

/// Coordinate of a cell in the grid. `x` is the column, `y` the row, with row 0 on the north edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellPosition {
    pub x: u16,
    pub y: u16,
}

impl CellPosition {
    pub const fn new(x: u16, y: u16) -> Self {
        CellPosition { x, y }
    }
}

impl From<(u16, u16)> for CellPosition {
    fn from((x, y): (u16, u16)) -> Self {
        CellPosition { x, y }
    }
}

impl fmt::Display for CellPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The four orthogonal directions, indexed 0 = north, 1 = east, 2 = south, 3 = west.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl Direction {
    /// All directions in index order. Neighbor lists are always built in this order.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Maps a drawn index in `0..4` to its direction.
    pub fn from_index(index: usize) -> Option<Direction> {
        Direction::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// Unit offset `(dx, dy)`. North points towards row 0.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::North => write!(f, "north"),
            Direction::East => write!(f, "east"),
            Direction::South => write!(f, "south"),
            Direction::West => write!(f, "west"),
        }
    }
}

/// Stored state of one cell.
///
/// A cell only owns its east and south walls. Its north and west walls are owned by the
/// neighbors on those sides, or are boundary walls that can never be carved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub(crate) east_wall: bool,
    pub(crate) south_wall: bool,
    pub(crate) visited: bool,
}

impl Cell {
    pub const CLOSED: Cell = Cell {
        east_wall: true,
        south_wall: true,
        visited: false,
    };

    pub fn is_visited(&self) -> bool {
        self.visited
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::CLOSED
    }
}

/// Wall presence on each side of a cell, as seen from that cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellWalls {
    pub north: bool,
    pub east: bool,
    pub south: bool,
    pub west: bool,
}

impl CellWalls {
    pub fn get(&self, direction: Direction) -> bool {
        match direction {
            Direction::North => self.north,
            Direction::East => self.east,
            Direction::South => self.south,
            Direction::West => self.west,
        }
    }

    /// Number of walls still standing around the cell.
    pub fn count(&self) -> usize {
        [self.north, self.east, self.south, self.west]
            .into_iter()
            .filter(|&w| w)
            .count()
    }
}
