//! Upper bounds on the value still reachable from a search node.
//!
//! A bound receives the items not yet decided on, in density order, and the
//! capacity left in the knapsack. It must never underestimate the best value
//! those items can add, otherwise pruning could discard the optimum.

use super::SolverError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

pub trait UpperBound {
    fn estimate(&self, remaining_items: &[(usize, u32, u32)], remaining_capacity: u32) -> u64;
}

/// Fills all remaining capacity at the density of the next item. O(1).
#[derive(Debug, Clone, Copy, Default)]
pub struct FastBound;

impl UpperBound for FastBound {
    fn estimate(&self, remaining_items: &[(usize, u32, u32)], remaining_capacity: u32) -> u64 {
        match remaining_items.first() {
            Some(&(_, weight, value)) => ceil_fraction(remaining_capacity, weight, value),
            None => 0,
        }
    }
}

/// Fractional knapsack relaxation over the remaining items. O(n).
#[derive(Debug, Clone, Copy, Default)]
pub struct FractionalBound;

impl UpperBound for FractionalBound {
    fn estimate(&self, remaining_items: &[(usize, u32, u32)], remaining_capacity: u32) -> u64 {
        let mut optimum_rest = 0u64;
        let mut remaining_capacity = remaining_capacity;
        for &(_, weight, value) in remaining_items {
            if weight > remaining_capacity {
                optimum_rest += ceil_fraction(remaining_capacity, weight, value);
                break;
            }
            optimum_rest += value as u64;
            remaining_capacity -= weight;
        }
        optimum_rest
    }
}

/// `ceil(capacity * value / weight)` in exact integer arithmetic.
fn ceil_fraction(capacity: u32, weight: u32, value: u32) -> u64 {
    let weight = weight as u64;
    (capacity as u64 * value as u64 + weight - 1) / weight
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Heuristic {
    #[default]
    None,
    Fast,
    Accurate,
}

impl Heuristic {
    pub const ALL: [Heuristic; 3] = [Heuristic::None, Heuristic::Fast, Heuristic::Accurate];

    pub fn bound(&self) -> Option<Box<dyn UpperBound>> {
        match self {
            Heuristic::None => None,
            Heuristic::Fast => Some(Box::new(FastBound)),
            Heuristic::Accurate => Some(Box::new(FractionalBound)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Heuristic::None => "none",
            Heuristic::Fast => "fast",
            Heuristic::Accurate => "accurate",
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Heuristic {
    type Err = SolverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Heuristic::None),
            "fast" => Ok(Heuristic::Fast),
            "accurate" => Ok(Heuristic::Accurate),
            _ => Err(SolverError::UnknownHeuristic(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ceil_fraction() {
        assert_eq!(ceil_fraction(5, 2, 3), 8);
        assert_eq!(ceil_fraction(4, 2, 3), 6);
        assert_eq!(ceil_fraction(0, 7, 9), 0);
        assert_eq!(ceil_fraction(u32::MAX, 1, u32::MAX), u32::MAX as u64 * u32::MAX as u64);
    }

    #[test]
    fn test_fast_bound() {
        let items = [(0, 2, 3), (1, 3, 4), (2, 4, 5)];
        assert_eq!(FastBound.estimate(&items, 5), 8);
        assert_eq!(FastBound.estimate(&items[1..], 2), 3);
        assert_eq!(FastBound.estimate(&[], 5), 0);
    }

    #[test]
    fn test_fractional_bound() {
        let items = [(0, 2, 3), (1, 3, 4), (2, 4, 5)];
        // 3 + 4 with nothing left over
        assert_eq!(FractionalBound.estimate(&items, 5), 7);
        // 3 + 4 + ceil(1 * 5 / 4)
        assert_eq!(FractionalBound.estimate(&items, 6), 9);
        // everything fits
        assert_eq!(FractionalBound.estimate(&items, 100), 12);
        assert_eq!(FractionalBound.estimate(&items, 0), 0);
    }

    #[test]
    fn test_parse_heuristic() {
        assert_eq!("none".parse::<Heuristic>(), Ok(Heuristic::None));
        assert_eq!("Fast".parse::<Heuristic>(), Ok(Heuristic::Fast));
        assert_eq!("ACCURATE".parse::<Heuristic>(), Ok(Heuristic::Accurate));
        assert_eq!(
            "greedy".parse::<Heuristic>(),
            Err(SolverError::UnknownHeuristic("greedy".to_string()))
        );
        for heuristic in Heuristic::ALL {
            assert_eq!(heuristic.to_string().parse::<Heuristic>(), Ok(heuristic));
        }
    }

    #[test]
    fn test_bound_selection() {
        assert!(Heuristic::None.bound().is_none());
        assert!(Heuristic::Fast.bound().is_some());
        assert!(Heuristic::Accurate.bound().is_some());
    }
}
