pub mod knapsack;
pub use knapsack::{Challenge, Solution, Track};
