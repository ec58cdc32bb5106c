//! Reading and writing maze description files (MDF).
//!
//! An MDF is whitespace-separated text: the grid height and width, the start
//! and finish coordinates, then one wall mask per room in row order. Masks
//! combine north=1, east=2, south=4, west=8. The filename `-` stands for
//! stdin or stdout.

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};

use log::debug;
use thiserror::Error;

use crate::dims::Dims;
use crate::maze::room::Room;
use crate::maze::Maze;

#[derive(Debug, Error)]
pub enum MdfError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("maze description ended early while reading {0}")]
    Truncated(&'static str),
    #[error("expected {what}, found {token:?}")]
    BadToken { what: &'static str, token: String },
    #[error("invalid maze size {height} by {width}")]
    BadSize { height: i32, width: i32 },
    #[error("{what} {pos:?} is outside the grid")]
    OutOfRange { what: &'static str, pos: Dims },
    #[error("wall mask {0} is out of range")]
    BadMask(i32),
}

/// Parses a maze from MDF text. Nothing of a failed parse survives; markers
/// of a parsed maze are all cleared.
pub fn parse(text: &str) -> Result<Maze, MdfError> {
    let mut tokens = text.split_whitespace();
    let mut next = |what: &'static str| -> Result<i32, MdfError> {
        let token = tokens.next().ok_or(MdfError::Truncated(what))?;
        token.parse().map_err(|_| MdfError::BadToken {
            what,
            token: token.to_string(),
        })
    };

    let height = next("height")?;
    let width = next("width")?;
    if height < 0 || width < 0 {
        return Err(MdfError::BadSize { height, width });
    }
    let mut maze = Maze::new_filled(height as usize, width as usize);

    let start = Dims(next("start row")?, next("start column")?);
    if !maze.set_start(start) {
        return Err(MdfError::OutOfRange {
            what: "start",
            pos: start,
        });
    }
    let finish = Dims(next("finish row")?, next("finish column")?);
    if !maze.set_finish(finish) {
        return Err(MdfError::OutOfRange {
            what: "finish",
            pos: finish,
        });
    }

    for x in 0..height {
        for y in 0..width {
            let mask = next("wall mask")?;
            if !(0..=15).contains(&mask) {
                return Err(MdfError::BadMask(mask));
            }
            if let Some(room) = maze.room_mut(Dims(x, y)) {
                *room = Room::with_walls(mask as u8);
            }
        }
    }
    Ok(maze)
}

/// Reads a maze from any reader carrying MDF text.
pub fn read(reader: &mut impl Read) -> Result<Maze, MdfError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    parse(&text)
}

/// Writes the maze in MDF form: two-column aligned numbers, one grid row per
/// line, a blank line at the end.
pub fn write(maze: &Maze, writer: &mut impl Write) -> Result<(), MdfError> {
    writeln!(writer, "{:2} {:2}", maze.height(), maze.width())?;
    writeln!(writer, "{:2} {:2}", maze.start().0, maze.start().1)?;
    writeln!(writer, "{:2} {:2}", maze.finish().0, maze.finish().1)?;
    for x in 0..maze.height() as i32 {
        for y in 0..maze.width() as i32 {
            if let Some(room) = maze.room(Dims(x, y)) {
                write!(writer, "{:2} ", room.walls())?;
            }
        }
        writeln!(writer)?;
    }
    writeln!(writer)?;
    Ok(())
}

/// Reads a maze from `path`, or from stdin when the path is `-`.
pub fn load(path: &str) -> Result<Maze, MdfError> {
    let maze = if path == "-" {
        read(&mut io::stdin().lock())?
    } else {
        read(&mut File::open(path)?)?
    };
    debug!("loaded {}x{} maze from {}", maze.height(), maze.width(), path);
    Ok(maze)
}

/// Writes a maze to `path`, or to stdout when the path is `-`. An existing
/// file is overwritten.
pub fn save(maze: &Maze, path: &str) -> Result<(), MdfError> {
    if path == "-" {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        write(maze, &mut out)?;
        out.flush()?;
    } else {
        let mut out = BufWriter::new(File::create(path)?);
        write(maze, &mut out)?;
        out.flush()?;
    }
    debug!("saved {}x{} maze to {}", maze.height(), maze.width(), path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::room::Direction;

    // the worked example from the original format documentation
    const EXAMPLE: &str = "\
 4  4
 3  2
 1  1
11  9  5  7
10  8  1  7
 8  4  4  3
12  5  5  6
";

    #[test]
    fn parses_the_documented_example() {
        let maze = parse(EXAMPLE).unwrap();
        assert_eq!(maze.height(), 4);
        assert_eq!(maze.width(), 4);
        assert_eq!(maze.start(), Dims(3, 2));
        assert_eq!(maze.finish(), Dims(1, 1));
        assert_eq!(maze.room(Dims(0, 0)).unwrap().walls(), 11);
        assert_eq!(maze.room(Dims(3, 3)).unwrap().walls(), 6);
        // 11 = north + east + west: a pocket open to the south
        assert!(maze.room(Dims(0, 0)).unwrap().has_wall(Direction::North));
        assert!(!maze.room(Dims(0, 0)).unwrap().has_wall(Direction::South));
    }

    #[test]
    fn round_trip_preserves_everything() {
        let maze = parse(EXAMPLE).unwrap();
        let mut text = Vec::new();
        write(&maze, &mut text).unwrap();
        let again = parse(std::str::from_utf8(&text).unwrap()).unwrap();

        assert_eq!(again.height(), maze.height());
        assert_eq!(again.width(), maze.width());
        assert_eq!(again.start(), maze.start());
        assert_eq!(again.finish(), maze.finish());
        for pos in maze.positions() {
            assert_eq!(
                again.room(pos).unwrap().walls(),
                maze.room(pos).unwrap().walls()
            );
        }
    }

    #[test]
    fn truncated_input_is_reported() {
        assert!(matches!(
            parse("4 4\n0 0\n"),
            Err(MdfError::Truncated("finish row"))
        ));
        assert!(matches!(
            parse("2 2\n0 0\n1 1\n15 15 15"),
            Err(MdfError::Truncated("wall mask"))
        ));
        assert!(matches!(parse(""), Err(MdfError::Truncated("height"))));
    }

    #[test]
    fn bad_tokens_are_reported() {
        assert!(matches!(
            parse("4 four\n"),
            Err(MdfError::BadToken { what: "width", .. })
        ));
    }

    #[test]
    fn out_of_range_coordinates_are_rejected() {
        assert!(matches!(
            parse("2 2\n2 0\n1 1\n15 15\n15 15\n"),
            Err(MdfError::OutOfRange { what: "start", .. })
        ));
        assert!(matches!(
            parse("2 2\n0 0\n1 2\n15 15\n15 15\n"),
            Err(MdfError::OutOfRange { what: "finish", .. })
        ));
        // a zero-sized grid has no valid start at all
        assert!(matches!(
            parse("0 0\n0 0\n0 0\n"),
            Err(MdfError::OutOfRange { what: "start", .. })
        ));
    }

    #[test]
    fn wall_masks_outside_the_nibble_are_rejected() {
        assert!(matches!(
            parse("1 1\n0 0\n0 0\n16\n"),
            Err(MdfError::BadMask(16))
        ));
        assert!(matches!(
            parse("1 1\n0 0\n0 0\n-1\n"),
            Err(MdfError::BadMask(-1))
        ));
    }

    #[test]
    fn negative_dimensions_are_rejected() {
        assert!(matches!(
            parse("-1 4\n0 0\n0 0\n"),
            Err(MdfError::BadSize { .. })
        ));
    }

    #[test]
    fn markers_start_cleared_after_import() {
        use crate::maze::room::Marker;
        let maze = parse(EXAMPLE).unwrap();
        assert!(maze
            .positions()
            .all(|pos| maze.marker(pos) == Some(Marker::Cleared)));
    }
}
