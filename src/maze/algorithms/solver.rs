use log::debug;

use crate::dims::Dims;
use crate::maze::room::Marker;
use crate::maze::Maze;

/// Callback seam between the solvers and whatever displays their progress.
/// Both hooks default to doing nothing; `()` implements the trait for silent
/// solves.
pub trait SolveObserver {
    /// Called after a room is marked visited during a step-by-step walk.
    fn on_step(&mut self, _maze: &Maze) {}

    /// Called each time a complete path to the finish is found.
    fn on_solution(&mut self, _maze: &Maze, _count: usize) {}
}

impl SolveObserver for () {}

/// Walks the maze depth-first from `from` and stops at the first path that
/// reaches the finish. Explored rooms that led nowhere stay marked as dead
/// ends, rooms on the successful path stay marked visited. Returns false when
/// the finish is unreachable.
pub fn solve_from(maze: &mut Maze, from: Dims, observer: &mut dyn SolveObserver) -> bool {
    maze.clear_markers();
    let solved = walk(maze, from, observer);
    debug!("first-solution walk from {:?}: solved={}", from, solved);
    solved
}

fn walk(maze: &mut Maze, pos: Dims, observer: &mut dyn SolveObserver) -> bool {
    if pos == maze.finish() {
        return true;
    }
    // visited and dead-end rooms are dead branches; out of bounds never
    // happens for rooms reached through adjacency
    if maze.marker(pos) != Some(Marker::Cleared) {
        return false;
    }
    maze.set_marker(pos, Marker::Visited);
    observer.on_step(maze);
    for next in maze.adjacent(pos, false) {
        if walk(maze, next, observer) {
            return true;
        }
    }
    maze.set_marker(pos, Marker::DeadEnd);
    false
}

/// Counts every distinct path from `from` to the finish. Rooms are marked
/// visited on the way down and restored on backtrack, so a room can sit on
/// many different paths; the finish itself is never marked, which means paths
/// that agree only up to a common ancestor of the finish each count on their
/// own.
pub fn solve_all(maze: &mut Maze, from: Dims, observer: &mut dyn SolveObserver) -> usize {
    maze.clear_markers();
    let mut found = 0;
    walk_all(maze, from, &mut found, observer);
    debug!("exhaustive walk from {:?}: {} solutions", from, found);
    found
}

fn walk_all(maze: &mut Maze, pos: Dims, found: &mut usize, observer: &mut dyn SolveObserver) {
    if maze.marker(pos) != Some(Marker::Cleared) {
        return;
    }
    if pos == maze.finish() {
        *found += 1;
        observer.on_solution(maze, *found);
        return;
    }
    maze.set_marker(pos, Marker::Visited);
    for next in maze.adjacent(pos, false) {
        walk_all(maze, next, found, observer);
    }
    maze.set_marker(pos, Marker::Cleared);
}

/// Best solution found by [`solve_short`].
#[derive(Debug, Clone)]
pub struct Shortest {
    /// Number of steps from start to finish.
    pub depth: usize,
    /// Deep copy of the maze taken the moment the finish was reached, with
    /// the winning path's marker trail frozen in place.
    pub maze: Maze,
}

/// Finds a shortest path from `from` to the finish by exhaustive depth-first
/// search with depth tracking. Returns `None` when the finish cannot be
/// reached at all; a start that coincides with the finish is a real solution
/// of depth 0.
pub fn solve_short(maze: &mut Maze, from: Dims) -> Option<Shortest> {
    maze.clear_markers();
    let mut best = None;
    walk_short(maze, from, 0, &mut best);
    debug!(
        "shortest walk from {:?}: depth={:?}",
        from,
        best.as_ref().map(|s: &Shortest| s.depth)
    );
    best
}

fn walk_short(maze: &mut Maze, pos: Dims, depth: usize, best: &mut Option<Shortest>) {
    if maze.marker(pos) != Some(Marker::Cleared) {
        return;
    }
    if pos == maze.finish() {
        if best.as_ref().map_or(true, |b| depth < b.depth) {
            *best = Some(Shortest {
                depth,
                maze: maze.clone(),
            });
        }
        return;
    }
    maze.set_marker(pos, Marker::Visited);
    for next in maze.adjacent(pos, false) {
        walk_short(maze, next, depth + 1, best);
    }
    maze.set_marker(pos, Marker::Cleared);
}
