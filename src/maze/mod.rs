pub mod algorithms;
pub mod maze;
pub mod mdf;
pub mod room;

pub use maze::Maze;
pub use room::{Direction, Marker, Room};
