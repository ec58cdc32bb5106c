pub mod generator;
pub mod solver;

pub use generator::{generate, make_random_tunnels, GenError};
pub use solver::{solve_all, solve_from, solve_short, Shortest, SolveObserver};

use rand::{thread_rng, Rng as _, SeedableRng as _};

/// Random number generator used for anything where determinism is required.
pub type Random = rand_xoshiro::Xoshiro256StarStar;

/// Seeds [`Random`] from `seed`, or from OS entropy when no seed is given.
pub fn random_from_seed(seed: Option<u64>) -> Random {
    Random::seed_from_u64(seed.unwrap_or_else(|| thread_rng().gen()))
}
