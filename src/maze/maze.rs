use rand::Rng;
use smallvec::SmallVec;

use crate::dims::Dims;
use crate::maze::room::{Direction, Marker, Room};

/// Neighbor list returned by [`Maze::adjacent`]. Never longer than four.
pub type Neighbors = SmallVec<[Dims; 4]>;

/// Rectangular grid of rooms with a designated start and finish.
///
/// Coordinates are `Dims(row, column)` with row 0 at the top; the grid is
/// stored row-major. Start and finish are coordinates rather than references,
/// so cloning a maze deep-copies the grid and keeps both valid for free.
#[derive(Debug, Clone)]
pub struct Maze {
    rooms: Vec<Room>,
    height: usize,
    width: usize,
    start: Dims,
    finish: Dims,
}

impl Maze {
    /// Creates a maze with every room fully walled in, ready for carving.
    /// Start and finish both sit at the origin until set otherwise.
    pub fn new_filled(height: usize, width: usize) -> Maze {
        Maze {
            rooms: vec![Room::closed(); height * width],
            height,
            width,
            start: Dims::ZERO,
            finish: Dims::ZERO,
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_in_bounds(&self, pos: Dims) -> bool {
        0 <= pos.0 && (pos.0 as usize) < self.height && 0 <= pos.1 && (pos.1 as usize) < self.width
    }

    fn index(&self, pos: Dims) -> Option<usize> {
        self.is_in_bounds(pos)
            .then(|| pos.0 as usize * self.width + pos.1 as usize)
    }

    pub fn room(&self, pos: Dims) -> Option<&Room> {
        self.index(pos).map(|i| &self.rooms[i])
    }

    pub(crate) fn room_mut(&mut self, pos: Dims) -> Option<&mut Room> {
        self.index(pos).map(move |i| &mut self.rooms[i])
    }

    pub fn start(&self) -> Dims {
        self.start
    }

    pub fn finish(&self) -> Dims {
        self.finish
    }

    /// Moves the start room. Out-of-bounds coordinates are rejected.
    pub fn set_start(&mut self, pos: Dims) -> bool {
        let ok = self.is_in_bounds(pos);
        if ok {
            self.start = pos;
        }
        ok
    }

    /// Moves the finish room. Out-of-bounds coordinates are rejected.
    pub fn set_finish(&mut self, pos: Dims) -> bool {
        let ok = self.is_in_bounds(pos);
        if ok {
            self.finish = pos;
        }
        ok
    }

    /// Every coordinate of the grid, row by row.
    pub fn positions(&self) -> impl Iterator<Item = Dims> {
        let width = self.width as i32;
        (0..self.height as i32).flat_map(move |x| (0..width).map(move |y| Dims(x, y)))
    }

    /// Rooms next to `pos`, in north, east, south, west order. With `walled`
    /// true only neighbors still separated from `pos` by a wall are reported;
    /// with `walled` false only neighbors reachable through an open passage.
    /// The two queries partition the existing neighbors of `pos`.
    pub fn adjacent(&self, pos: Dims, walled: bool) -> Neighbors {
        let mut neighbors = Neighbors::new();
        let Some(room) = self.room(pos) else {
            return neighbors;
        };
        for dir in Direction::ALL {
            if room.has_wall(dir) != walled {
                continue;
            }
            let next = pos + dir.offset();
            if self.is_in_bounds(next) {
                neighbors.push(next);
            }
        }
        neighbors
    }

    /// Opens the wall between two rooms, on both sides at once. Returns false
    /// and leaves the maze untouched when the rooms are not grid-adjacent.
    /// Tunneling an already open pair keeps it open.
    pub fn tunnel(&mut self, from: Dims, to: Dims) -> bool {
        let Some(dir) = Direction::between(from, to) else {
            return false;
        };
        let (Some(from_idx), Some(to_idx)) = (self.index(from), self.index(to)) else {
            return false;
        };
        self.rooms[from_idx].remove_wall(dir);
        self.rooms[to_idx].remove_wall(dir.opposite());
        true
    }

    /// Uniformly random room coordinate, or `None` for an empty grid.
    pub fn random_room(&self, rng: &mut impl Rng) -> Option<Dims> {
        if self.rooms.is_empty() {
            return None;
        }
        Some(Dims(
            rng.gen_range(0..self.height as i32),
            rng.gen_range(0..self.width as i32),
        ))
    }

    pub fn marker(&self, pos: Dims) -> Option<Marker> {
        self.room(pos).map(|room| room.marker())
    }

    /// Sets the marker of the room at `pos`. Out of bounds is a no-op.
    pub fn set_marker(&mut self, pos: Dims, marker: Marker) {
        if let Some(room) = self.room_mut(pos) {
            room.set_marker(marker);
        }
    }

    /// Rewrites every room marked `find` to `replace`.
    pub fn replace_markers(&mut self, find: Marker, replace: Marker) {
        for room in &mut self.rooms {
            if room.marker() == find {
                room.set_marker(replace);
            }
        }
    }

    /// Resets every marker to cleared, making the maze ready for a fresh
    /// traversal.
    pub fn clear_markers(&mut self) {
        for room in &mut self.rooms {
            room.set_marker(Marker::Cleared);
        }
    }
}
