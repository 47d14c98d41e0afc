pub mod brute_force;
pub mod dfs;
mod error;
pub mod heuristics;
pub mod order;

pub use error::SolverError;
pub use heuristics::Heuristic;
