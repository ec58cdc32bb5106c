use log::{debug, warn};
use rand::seq::SliceRandom;
use thiserror::Error;

use super::Random;
use crate::dims::Dims;
use crate::maze::room::Marker;
use crate::maze::Maze;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GenError {
    #[error("cannot generate a {height} by {width} maze")]
    InvalidSize { height: usize, width: usize },
}

/// Extra tunnels punched when the caller does not ask for a specific count.
pub fn default_extra_tunnels(height: usize) -> usize {
    height / 2
}

/// Generates a maze by depth-first backtracking from a random room, then
/// punches up to `extra_tunnels` random shortcuts so the result is not a
/// perfect tree. Start and finish are picked independently at random and may
/// coincide.
pub fn generate(
    height: usize,
    width: usize,
    extra_tunnels: usize,
    rng: &mut Random,
) -> Result<Maze, GenError> {
    if height == 0 || width == 0 {
        return Err(GenError::InvalidSize { height, width });
    }

    let mut maze = Maze::new_filled(height, width);
    let first = maze
        .random_room(rng)
        .ok_or(GenError::InvalidSize { height, width })?;
    carve_from(&mut maze, first, rng);
    maze.replace_markers(Marker::Visited, Marker::Cleared);

    let made = make_random_tunnels(&mut maze, extra_tunnels, rng);
    debug!("carved {}x{} maze with {} extra tunnels", height, width, made);

    if let Some(start) = maze.random_room(rng) {
        maze.set_start(start);
    }
    if let Some(finish) = maze.random_room(rng) {
        maze.set_finish(finish);
    }
    Ok(maze)
}

/// Depth-first carve. Walled-off neighbors are shuffled, and each one still
/// untouched when its turn comes is carved into recursively; the connecting
/// wall is opened on the way back up. Starting from any single room of an
/// all-walled grid this yields a spanning tree: every room reachable, no
/// cycles.
fn carve_from(maze: &mut Maze, pos: Dims, rng: &mut Random) {
    maze.set_marker(pos, Marker::Visited);
    let mut walled = maze.adjacent(pos, true);
    walled.shuffle(rng);
    for next in walled {
        if maze.marker(next) == Some(Marker::Cleared) {
            carve_from(maze, next, rng);
            maze.tunnel(pos, next);
        }
    }
}

/// Opens up to `count` walls between random pairs of still-separated rooms,
/// introducing loops into the maze. Returns the number of tunnels actually
/// made, which falls short of `count` only when the grid runs out of walled
/// adjacent pairs before the quota is met.
pub fn make_random_tunnels(maze: &mut Maze, count: usize, rng: &mut Random) -> usize {
    let mut made = 0;
    let mut dry_picks = 0;
    while made < count {
        let Some(pos) = maze.random_room(rng) else {
            break;
        };
        let walled = maze.adjacent(pos, true);
        match walled.choose(rng) {
            Some(&next) => {
                maze.tunnel(pos, next);
                made += 1;
                dry_picks = 0;
            }
            None => {
                dry_picks += 1;
                // A long dry streak usually means the grid is close to fully
                // open; scan before spinning further.
                if dry_picks > maze.room_count() {
                    if !has_walled_pair(maze) {
                        warn!("maze saturated after {} of {} extra tunnels", made, count);
                        break;
                    }
                    dry_picks = 0;
                }
            }
        }
    }
    made
}

fn has_walled_pair(maze: &Maze) -> bool {
    maze.positions()
        .any(|pos| !maze.adjacent(pos, true).is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::algorithms::random_from_seed;

    fn open_passages(maze: &Maze) -> usize {
        // every open passage is seen from both of its rooms
        let both_sides: usize = maze
            .positions()
            .map(|pos| maze.adjacent(pos, false).len())
            .sum();
        both_sides / 2
    }

    fn reachable_rooms(maze: &Maze) -> usize {
        let mut seen = vec![Dims::ZERO];
        let mut stack = vec![Dims::ZERO];
        while let Some(pos) = stack.pop() {
            for next in maze.adjacent(pos, false) {
                if !seen.contains(&next) {
                    seen.push(next);
                    stack.push(next);
                }
            }
        }
        seen.len()
    }

    #[test]
    fn spanning_tree_has_exactly_rooms_minus_one_passages() {
        let mut rng = random_from_seed(Some(7));
        let maze = generate(6, 9, 0, &mut rng).unwrap();
        assert_eq!(open_passages(&maze), 6 * 9 - 1);
        assert_eq!(reachable_rooms(&maze), 6 * 9);
    }

    #[test]
    fn generation_resets_markers_and_places_endpoints() {
        let mut rng = random_from_seed(Some(3));
        let maze = generate(5, 5, 2, &mut rng).unwrap();
        assert!(maze
            .positions()
            .all(|pos| maze.marker(pos) == Some(Marker::Cleared)));
        assert!(maze.is_in_bounds(maze.start()));
        assert!(maze.is_in_bounds(maze.finish()));
    }

    #[test]
    fn extra_tunnels_add_cycles() {
        let mut rng = random_from_seed(Some(11));
        let maze = generate(8, 8, 4, &mut rng).unwrap();
        assert_eq!(open_passages(&maze), 8 * 8 - 1 + 4);
        assert_eq!(reachable_rooms(&maze), 8 * 8);
    }

    #[test]
    fn same_seed_same_maze() {
        let mut a_rng = random_from_seed(Some(42));
        let mut b_rng = random_from_seed(Some(42));
        let a = generate(7, 4, 3, &mut a_rng).unwrap();
        let b = generate(7, 4, 3, &mut b_rng).unwrap();
        assert_eq!(a.start(), b.start());
        assert_eq!(a.finish(), b.finish());
        for pos in a.positions() {
            assert_eq!(
                a.room(pos).unwrap().walls(),
                b.room(pos).unwrap().walls()
            );
        }
    }

    #[test]
    fn zero_sized_grids_are_rejected() {
        let mut rng = random_from_seed(Some(0));
        assert_eq!(
            generate(0, 10, 0, &mut rng).unwrap_err(),
            GenError::InvalidSize {
                height: 0,
                width: 10
            }
        );
        assert_eq!(
            generate(10, 0, 0, &mut rng).unwrap_err(),
            GenError::InvalidSize {
                height: 10,
                width: 0
            }
        );
    }

    #[test]
    fn random_tunnels_stop_when_the_grid_is_saturated() {
        let mut rng = random_from_seed(Some(5));
        let mut maze = Maze::new_filled(2, 2);
        for pos in maze.positions().collect::<Vec<_>>() {
            for next in maze.adjacent(pos, true) {
                maze.tunnel(pos, next);
            }
        }
        // fully open: the quota is unreachable, the call must still return
        assert_eq!(make_random_tunnels(&mut maze, 10, &mut rng), 0);
    }

    #[test]
    fn random_tunnels_meet_the_quota_when_walls_remain() {
        let mut rng = random_from_seed(Some(9));
        let mut maze = Maze::new_filled(4, 4);
        assert_eq!(make_random_tunnels(&mut maze, 3, &mut rng), 3);
        assert_eq!(open_passages(&maze), 3);
    }
}
