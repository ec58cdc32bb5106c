//! Terminal output of a maze: the classic `+---+` picture, with the start,
//! finish and traversal markers in the room cells.

use std::fmt::Write as _;
use std::io::{self, BufRead, Write};

use crossterm::style::Stylize;
use crossterm::{cursor, queue, terminal};

use crate::dims::Dims;
use crate::maze::room::Direction;
use crate::maze::Maze;

/// Renders the maze as plain text lines, one string per terminal row. The
/// start room shows `S` (and wins when start and finish coincide), the finish
/// `F`, every other room its marker character.
pub fn render(maze: &Maze) -> Vec<String> {
    let mut lines = Vec::with_capacity(maze.height() * 2 + 1);
    lines.push(border_line(maze, 0, Direction::North));
    for x in 0..maze.height() as i32 {
        lines.push(room_line(maze, x));
        lines.push(border_line(maze, x, Direction::South));
    }
    lines
}

fn border_line(maze: &Maze, x: i32, side: Direction) -> String {
    let mut line = String::from("+");
    for y in 0..maze.width() as i32 {
        let walled = maze
            .room(Dims(x, y))
            .map_or(false, |room| room.has_wall(side));
        line.push_str(if walled { "---" } else { "   " });
        line.push('+');
    }
    line
}

fn room_line(maze: &Maze, x: i32) -> String {
    let mut line = String::new();
    let west = maze
        .room(Dims(x, 0))
        .map_or(false, |room| room.has_wall(Direction::West));
    line.push(if west { '|' } else { ' ' });
    for y in 0..maze.width() as i32 {
        let pos = Dims(x, y);
        let glyph = if pos == maze.start() {
            'S'
        } else if pos == maze.finish() {
            'F'
        } else {
            maze.marker(pos).map_or(' ', |marker| marker.as_char())
        };
        line.push(' ');
        line.push(glyph);
        line.push(' ');
        let east = maze
            .room(pos)
            .map_or(false, |room| room.has_wall(Direction::East));
        line.push(if east { '|' } else { ' ' });
    }
    line
}

/// Writes rendered mazes to a terminal. With `color` the start, finish and
/// marker glyphs are styled; with `clear_screen` the screen is wiped and the
/// cursor homed before each draw, which turns a step-by-step solve into an
/// animation.
#[derive(Debug, Clone, Copy)]
pub struct Printer {
    pub color: bool,
    pub clear_screen: bool,
}

impl Printer {
    pub fn print(&self, maze: &Maze, out: &mut impl Write) -> io::Result<()> {
        if self.clear_screen {
            queue!(
                out,
                terminal::Clear(terminal::ClearType::All),
                cursor::MoveTo(0, 0)
            )?;
        }
        for line in render(maze) {
            if self.color {
                writeln!(out, "{}", colorize(&line))?;
            } else {
                writeln!(out, "{}", line)?;
            }
        }
        out.flush()
    }
}

fn colorize(line: &str) -> String {
    let mut out = String::new();
    for ch in line.chars() {
        // the glyph set is disjoint from the border characters, so a plain
        // character match is enough
        match ch {
            'S' => {
                let _ = write!(out, "{}", "S".green().bold());
            }
            'F' => {
                let _ = write!(out, "{}", "F".red().bold());
            }
            'O' => {
                let _ = write!(out, "{}", "O".yellow());
            }
            'X' => {
                let _ = write!(out, "{}", "X".dark_grey());
            }
            _ => out.push(ch),
        }
    }
    out
}

/// Blocks until the user presses enter. Used between solver steps.
pub fn wait_for_enter() -> io::Result<()> {
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::mdf;

    #[test]
    fn renders_the_documented_example() {
        let maze = mdf::parse(
            " 4  4
 3  2
 1  1
11  9  5  7
10  8  1  7
 8  4  4  3
12  5  5  6
",
        )
        .unwrap();

        let expected = [
            "+---+---+---+---+",
            "|   |           |",
            "+   +   +---+---+",
            "|   | F         |",
            "+   +   +   +---+",
            "|               |",
            "+   +---+---+   +",
            "|         S     |",
            "+---+---+---+---+",
        ];
        assert_eq!(render(&maze), expected);
    }

    #[test]
    fn start_wins_when_start_and_finish_coincide() {
        let maze = Maze::new_filled(1, 1);
        assert_eq!(render(&maze), ["+---+", "| S |", "+---+"]);
    }

    #[test]
    fn markers_show_in_room_cells() {
        use crate::maze::room::Marker;
        let mut maze = Maze::new_filled(1, 3);
        maze.set_start(Dims(0, 0));
        maze.set_finish(Dims(0, 2));
        maze.set_marker(Dims(0, 1), Marker::Visited);
        let lines = render(&maze);
        assert_eq!(lines[1], "| S | O | F |");

        maze.set_marker(Dims(0, 1), Marker::DeadEnd);
        assert_eq!(render(&maze)[1], "| S | X | F |");
    }

    #[test]
    fn open_edges_drop_their_bars() {
        let mut maze = Maze::new_filled(1, 2);
        maze.set_finish(Dims(0, 1));
        maze.tunnel(Dims(0, 0), Dims(0, 1));
        assert_eq!(render(&maze), ["+---+---+", "| S   F |", "+---+---+"]);
    }

    #[test]
    fn plain_printer_output_matches_render() {
        let maze = Maze::new_filled(2, 2);
        let printer = Printer {
            color: false,
            clear_screen: false,
        };
        let mut out = Vec::new();
        printer.print(&maze, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let expected: String = render(&maze)
            .into_iter()
            .map(|line| line + "\n")
            .collect();
        assert_eq!(text, expected);
    }
}
