//! Subcommand drivers: the glue between the command line, the maze core and
//! the terminal.

use std::io;

use log::{info, warn};
use thiserror::Error;

use crate::maze::algorithms::{self, generator, solver, GenError, SolveObserver};
use crate::maze::mdf::{self, MdfError};
use crate::maze::room::Marker;
use crate::maze::Maze;
use crate::settings::Settings;
use crate::ui::{self, Printer};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("maze file: {0}")]
    Mdf(#[from] MdfError),
    #[error(transparent)]
    Gen(#[from] GenError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// How `solve` walks the maze.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveMode {
    /// Step-by-step walkthrough, first solution wins.
    First,
    /// Enumerate every solution.
    All,
    /// Report only a shortest solution.
    Shortest,
}

/// Generates a maze and writes it out as an MDF.
pub fn generate(
    height: Option<usize>,
    width: Option<usize>,
    tunnels: Option<usize>,
    seed: Option<u64>,
    file: &str,
    settings: &Settings,
) -> Result<(), AppError> {
    let height = height.unwrap_or(settings.default_height);
    let width = width.unwrap_or(settings.default_width);
    let extra = tunnels
        .or(settings.extra_tunnels)
        .unwrap_or_else(|| generator::default_extra_tunnels(height));

    let mut rng = algorithms::random_from_seed(seed);
    let maze = generator::generate(height, width, extra, &mut rng)?;
    mdf::save(&maze, file)?;
    info!("generated {}x{} maze into {}", height, width, file);
    Ok(())
}

/// Imports a maze and prints it.
pub fn show(file: &str, settings: &Settings) -> Result<(), AppError> {
    let maze = mdf::load(file)?;
    let printer = Printer {
        color: settings.color,
        clear_screen: false,
    };
    printer.print(&maze, &mut io::stdout().lock())?;
    Ok(())
}

/// Imports a maze and solves it in the requested mode.
pub fn solve(file: &str, mode: SolveMode, settings: &Settings) -> Result<(), AppError> {
    let mut maze = mdf::load(file)?;
    let start = maze.start();
    // pausing reads the keyboard; with the maze on stdin there is none
    let pause = settings.step_pause && file != "-";
    let printer = Printer {
        color: settings.color,
        clear_screen: false,
    };

    match mode {
        SolveMode::All => {
            let mut watcher = SolutionPrinter { printer, pause };
            let found = solver::solve_all(&mut maze, start, &mut watcher);
            println!("Found {} solutions.", found);
        }
        SolveMode::Shortest => match solver::solve_short(&mut maze, start) {
            Some(shortest) => {
                println!("Shortest solution:");
                printer.print(&shortest.maze, &mut io::stdout().lock())?;
                println!("Path length: {}", shortest.depth);
            }
            None => println!("No solution found."),
        },
        SolveMode::First => {
            let mut watcher = StepPrinter {
                printer: Printer {
                    clear_screen: pause,
                    ..printer
                },
                pause,
            };
            if solver::solve_from(&mut maze, start, &mut watcher) {
                println!("Solution found!");
                // dead ends are scaffolding; show only the surviving trail
                maze.replace_markers(Marker::DeadEnd, Marker::Cleared);
                printer.print(&maze, &mut io::stdout().lock())?;
            } else {
                println!("No solution found.");
            }
        }
    }
    Ok(())
}

/// Prints the maze after every step of the walkthrough.
struct StepPrinter {
    printer: Printer,
    pause: bool,
}

impl SolveObserver for StepPrinter {
    fn on_step(&mut self, maze: &Maze) {
        print_or_warn(&self.printer, maze);
        if self.pause {
            let _ = ui::wait_for_enter();
        }
    }
}

/// Announces and prints every solution the exhaustive search finds.
struct SolutionPrinter {
    printer: Printer,
    pause: bool,
}

impl SolveObserver for SolutionPrinter {
    fn on_solution(&mut self, maze: &Maze, count: usize) {
        println!("Solution #{}:", count);
        print_or_warn(&self.printer, maze);
        if self.pause {
            let _ = ui::wait_for_enter();
        }
    }
}

fn print_or_warn(printer: &Printer, maze: &Maze) {
    if let Err(err) = printer.print(maze, &mut io::stdout().lock()) {
        warn!("could not draw maze: {}", err);
    }
}
