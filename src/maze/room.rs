use crate::dims::Dims;

/// Transient per-room state used by the traversal algorithms. It carries no
/// structural meaning and can be rewritten freely between runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Marker {
    #[default]
    Cleared,
    Visited,
    DeadEnd,
}

impl Marker {
    /// Character shown for this marker when the maze is printed.
    pub fn as_char(self) -> char {
        match self {
            Marker::Cleared => ' ',
            Marker::Visited => 'O',
            Marker::DeadEnd => 'X',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// All directions, in the order adjacency queries report neighbors.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Bit of this direction in a room's wall mask.
    pub fn bit(self) -> u8 {
        match self {
            Direction::North => 1,
            Direction::East => 2,
            Direction::South => 4,
            Direction::West => 8,
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// Coordinate offset of the neighbor in this direction.
    pub fn offset(self) -> Dims {
        match self {
            Direction::North => Dims(-1, 0),
            Direction::East => Dims(0, 1),
            Direction::South => Dims(1, 0),
            Direction::West => Dims(0, -1),
        }
    }

    /// Direction from `from` to `to`, if the two coordinates are
    /// grid-adjacent.
    pub fn between(from: Dims, to: Dims) -> Option<Direction> {
        match to - from {
            Dims(-1, 0) => Some(Direction::North),
            Dims(0, 1) => Some(Direction::East),
            Dims(1, 0) => Some(Direction::South),
            Dims(0, -1) => Some(Direction::West),
            _ => None,
        }
    }
}

/// One cell of the grid: a 4-bit wall mask plus the traversal marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Room {
    walls: u8,
    marker: Marker,
}

impl Room {
    /// A room with all four walls up.
    pub fn closed() -> Room {
        Room {
            walls: 0b1111,
            marker: Marker::Cleared,
        }
    }

    /// A room with the given wall mask, as read from an MDF.
    pub fn with_walls(walls: u8) -> Room {
        Room {
            walls,
            marker: Marker::Cleared,
        }
    }

    pub fn walls(&self) -> u8 {
        self.walls
    }

    pub fn has_wall(&self, dir: Direction) -> bool {
        self.walls & dir.bit() != 0
    }

    // Wall consistency with the neighboring room is Maze::tunnel's job, so
    // this stays crate-private.
    pub(crate) fn remove_wall(&mut self, dir: Direction) {
        self.walls &= !dir.bit();
    }

    pub fn marker(&self) -> Marker {
        self.marker
    }

    pub(crate) fn set_marker(&mut self, marker: Marker) {
        self.marker = marker;
    }
}
