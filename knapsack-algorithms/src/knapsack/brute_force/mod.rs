use crate::knapsack::SolverError;
use anyhow::Result;
use knapsack_challenges::{Challenge, Solution};
use tracing::debug;

/// Largest instance the enumerator accepts; all `2^n` subsets are held in memory.
pub const MAX_ITEMS: usize = 20;

/// Every subset of `0..n`. Each new item doubles the collection by being
/// added to a copy of every subset built so far.
pub fn powerset(n: usize) -> Vec<Vec<usize>> {
    let mut subsets = vec![Vec::new()];
    for item in 0..n {
        let extended: Vec<Vec<usize>> = subsets
            .iter()
            .map(|subset| {
                let mut subset = subset.clone();
                subset.push(item);
                subset
            })
            .collect();
        subsets.extend(extended);
    }
    subsets
}

/// Checks every subset against the capacity and keeps the most valuable
/// feasible one. Ties keep the subset found first.
pub fn solve(challenge: &Challenge) -> Result<(Solution, u32)> {
    if challenge.num_items() > MAX_ITEMS {
        return Err(SolverError::TooManyItems {
            num_items: challenge.num_items(),
            max: MAX_ITEMS,
        }
        .into());
    }

    let mut max_items: &[usize] = &[];
    let mut max_value = 0u32;

    let subsets = powerset(challenge.num_items());
    for subset in &subsets {
        let weight: u32 = subset.iter().map(|&i| challenge.weights()[i]).sum();
        if weight > challenge.max_weight() {
            continue;
        }
        let value: u32 = subset.iter().map(|&i| challenge.values()[i]).sum();
        if value > max_value {
            max_value = value;
            max_items = subset.as_slice();
        }
    }
    debug!(
        num_items = challenge.num_items(),
        subsets = subsets.len(),
        value = max_value,
        "brute force finished"
    );

    Ok((Solution::from(max_items.to_vec()), max_value))
}
