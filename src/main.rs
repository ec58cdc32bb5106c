use clap::{Parser, Subcommand};

use rmaze::app::{self, AppError, SolveMode};
use rmaze::logging;
use rmaze::settings::Settings;

#[derive(Parser, Debug)]
#[clap(version, about, name = "rmaze")]
struct Args {
    #[clap(subcommand)]
    command: Command,
    #[clap(
        short,
        long,
        global = true,
        action = clap::ArgAction::Count,
        help = "More log output per use"
    )]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a maze and write it out as an MDF
    #[clap(alias = "gen")]
    Generate {
        #[clap(short = 'H', long, help = "Maze height in rooms")]
        height: Option<usize>,
        #[clap(short = 'W', long, help = "Maze width in rooms")]
        width: Option<usize>,
        #[clap(short, long, help = "Extra tunnels past the spanning tree")]
        tunnels: Option<usize>,
        #[clap(short, long, help = "Seed for reproducible mazes")]
        seed: Option<u64>,
        #[clap(default_value = "-", help = "Output file, - for stdout")]
        file: String,
    },
    /// Solve a maze read from an MDF
    Solve {
        #[clap(long, conflicts_with = "all", help = "Report a shortest solution only")]
        shortest: bool,
        #[clap(long, help = "Walk every solution")]
        all: bool,
        #[clap(default_value = "-", help = "Input file, - for stdin")]
        file: String,
    },
    /// Print a maze from an MDF
    Show {
        #[clap(default_value = "-", help = "Input file, - for stdin")]
        file: String,
    },
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();
    logging::init(args.verbose);
    let settings = Settings::load(Settings::default_path());

    match args.command {
        Command::Generate {
            height,
            width,
            tunnels,
            seed,
            file,
        } => app::generate(height, width, tunnels, seed, &file, &settings),
        Command::Solve {
            shortest,
            all,
            file,
        } => {
            let mode = if all {
                SolveMode::All
            } else if shortest {
                SolveMode::Shortest
            } else {
                SolveMode::First
            };
            app::solve(&file, mode, &settings)
        }
        Command::Show { file } => app::show(&file, &settings),
    }
}
